//! Bullet and numbered list items.

use std::sync::LazyLock;

use regex::Regex;

static UNORDERED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*]\s+(.+)$").unwrap());

static ORDERED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+\.\s+(.+)$").unwrap());

/// List flavour; a run never mixes the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Unordered => "ul",
            Self::Ordered => "ol",
        }
    }
}

/// Classify a trimmed line as a list item and return its content.
///
/// The author's numeral is dropped; ordered lists always render in sequence.
pub(crate) fn parse_item(trimmed: &str) -> Option<(ListKind, &str)> {
    if let Some(caps) = UNORDERED.captures(trimmed) {
        return caps.get(1).map(|m| (ListKind::Unordered, m.as_str()));
    }
    ORDERED
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| (ListKind::Ordered, m.as_str()))
}
