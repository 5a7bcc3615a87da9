//! Single-line block rewrites: horizontal rules and headers.

use std::sync::LazyLock;

use regex::Regex;

use crate::document::Line;
use crate::html;
use crate::slug::slugify;

static HEADER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,3})\s+(.+)$").unwrap());

/// Whether a line is three or more of the same `-`, `*` or `_`.
fn is_horizontal_rule(trimmed: &str) -> bool {
    let mut chars = trimmed.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    matches!(first, '-' | '*' | '_') && trimmed.len() >= 3 && chars.all(|c| c == first)
}

/// Rewrite one text line, or return it unchanged.
fn format_line(text: String) -> String {
    if is_horizontal_rule(text.trim()) {
        return html::HORIZONTAL_RULE.to_owned();
    }

    // Headers must start at column zero; indented `#` lines stay text.
    if let Some(caps) = HEADER.captures(&text) {
        let title = caps[2].trim_end();
        if !title.is_empty() {
            return html::header(caps[1].len(), &slugify(title), title);
        }
    }

    text
}

/// Apply the line-level rewrites to every text line.
pub(crate) fn format(lines: Vec<Line>) -> Vec<Line> {
    lines
        .into_iter()
        .map(|line| line.map_text(format_line))
        .collect()
}
