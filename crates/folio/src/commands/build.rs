//! `folio build` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_site::{SiteLoader, SiteLoaderConfig, StaticSiteBuilder};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Public site URL used in feeds, sitemaps and canonical links.
    #[arg(long, env = "FOLIO_SITE_URL")]
    site_url: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the site cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            site_url: self.site_url,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let content = &config.content_resolved;

        output.info(&format!("Source: {}", content.source_dir.display()));
        output.info(&format!("Output: {}", content.output_dir.display()));

        let site = SiteLoader::new(SiteLoaderConfig {
            source_dir: content.source_dir.clone(),
            journals_dir: content.journals_path(),
        })
        .load();

        let report = StaticSiteBuilder::new(&config.site, &content.output_dir).build(&site)?;

        if report.skipped > 0 {
            output.warning(&format!("Skipped {} unreadable file(s)", report.skipped));
        }
        output.success(&format!(
            "Built {} posts and {} pages",
            report.posts, report.pages
        ));
        Ok(())
    }
}
