//! Pipe-delimited table rows.

use std::sync::LazyLock;

use regex::Regex;

static ROW: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\|(.+)\|$").unwrap());

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|(?:\s*:?-+:?\s*\|)+$").unwrap());

/// Whether a trimmed line is an alignment row such as `| --- | :-: |`.
pub(crate) fn is_separator(trimmed: &str) -> bool {
    SEPARATOR.is_match(trimmed)
}

/// Split a trimmed `|...|` line into trimmed cells.
///
/// The empty cells before the first and after the last pipe are discarded.
pub(crate) fn parse_row(trimmed: &str) -> Option<Vec<String>> {
    let caps = ROW.captures(trimmed)?;
    Some(
        caps[1]
            .split('|')
            .map(|cell| cell.trim().to_owned())
            .collect(),
    )
}
