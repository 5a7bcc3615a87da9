//! Anchor ids derived from header text.

/// Convert text to a lower-case, hyphen-separated slug.
///
/// Every run of characters outside `[a-z0-9]` (after lower-casing) collapses
/// to one hyphen, and leading/trailing hyphens are dropped. The same text
/// always yields the same slug; identical headers therefore share an id.
///
/// # Examples
///
/// ```
/// use folio_renderer::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("  What's New?  "), "what-s-new");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
