//! `folio render` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use folio_renderer::RenderedDocument;
use folio_site::SiteError;
use folio_site::template::render_sidebar;

use crate::error::CliError;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown document to render.
    file: PathBuf,

    /// Print the rendered document as JSON.
    #[arg(long)]
    json: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command, writing to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or stdout cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let doc = folio_renderer::render(&read_body(&self.file)?);

        let text = if self.json {
            serde_json::to_string_pretty(&doc)?
        } else {
            fragment(&doc)
        };

        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{text}")?;
        Ok(())
    }
}

/// Document text with any preamble removed.
fn read_body(path: &Path) -> Result<String, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| SiteError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let (_, body) = folio_site::split(&content);
    Ok(body)
}

/// Body fragment followed by the sidebar fragment, if any.
fn fragment(doc: &RenderedDocument) -> String {
    let sidebar = render_sidebar(&doc.footnotes);
    if sidebar.is_empty() {
        doc.html.clone()
    } else {
        format!("{}\n{sidebar}", doc.html)
    }
}
