//! `pages.json` manifest listing standalone pages.

use crate::SiteError;
use crate::document::Page;

/// Pretty-printed JSON array of page file names, sorted.
///
/// # Errors
///
/// Returns [`SiteError::Manifest`] if serialization fails.
pub fn render_manifest(pages: &[Page]) -> Result<String, SiteError> {
    let mut names: Vec<&str> = pages.iter().map(|page| page.file_name.as_str()).collect();
    names.sort_unstable();
    Ok(serde_json::to_string_pretty(&names)?)
}
