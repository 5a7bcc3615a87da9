//! Status lines for `folio` commands.
//!
//! Everything goes to stderr so `folio render` can keep stdout for the
//! rendered document.

use console::{Style, Term};

/// Styled stderr writer for build progress and failures.
pub(crate) struct Output {
    term: Term,
    done: Style,
    caution: Style,
    failure: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            done: Style::new().green(),
            caution: Style::new().yellow(),
            failure: Style::new().red(),
        }
    }

    fn line(&self, style: Option<&Style>, msg: &str) {
        let text = style.map_or_else(|| msg.to_owned(), |s| s.apply_to(msg).to_string());
        let _ = self.term.write_line(&text);
    }

    /// Plain progress line, e.g. the source and output directories.
    pub(crate) fn info(&self, msg: &str) {
        self.line(None, msg);
    }

    /// Build summary once every file is written.
    pub(crate) fn success(&self, msg: &str) {
        self.line(Some(&self.done), msg);
    }

    /// Non-fatal problems such as skipped source files.
    pub(crate) fn warning(&self, msg: &str) {
        self.line(Some(&self.caution), msg);
    }

    /// The `Error: ...` line printed before exiting with status 1.
    pub(crate) fn error(&self, msg: &str) {
        self.line(Some(&self.failure), msg);
    }
}
