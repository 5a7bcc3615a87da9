//! `>`-prefixed quote lines.

/// Content of a trimmed quote line: the text after `> `, or empty for a bare
/// `>`.
pub(crate) fn parse_line(trimmed: &str) -> Option<&str> {
    if trimmed == ">" {
        return Some("");
    }
    trimmed.strip_prefix("> ")
}
