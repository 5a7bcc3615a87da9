//! Footnote extraction and sidebar content rendering.
//!
//! Definitions (`[^N]: text`) are pulled out of the body before any other
//! stage runs. References (`[^N]`) stay in the body and are rewritten by the
//! inline formatter; the two are paired only by their literal number.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::code::find_fences;
use crate::document::Line;
use crate::inline;

static DEFINITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[\^([0-9]+)\]:\s*(.+)$").unwrap());

/// Footnote number as written by the author.
///
/// Ordered by numeric value without parsing, so arbitrarily long digit strings
/// never overflow. Labels that differ only in leading zeros are distinct and
/// ordered by their literal text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FootnoteLabel(String);

impl FootnoteLabel {
    fn significant_digits(&self) -> &str {
        let trimmed = self.0.trim_start_matches('0');
        if trimmed.is_empty() { "0" } else { trimmed }
    }
}

impl Ord for FootnoteLabel {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.significant_digits(), other.significant_digits());
        a.len()
            .cmp(&b.len())
            .then_with(|| a.cmp(b))
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for FootnoteLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Raw footnote definitions keyed by number.
#[derive(Debug, Default)]
pub(crate) struct FootnoteTable {
    entries: BTreeMap<FootnoteLabel, String>,
}

impl FootnoteTable {
    /// Record a definition. A repeated number overwrites the earlier text.
    pub fn insert(&mut self, number: &str, text: &str) {
        self.entries
            .insert(FootnoteLabel(number.to_owned()), text.trim().to_owned());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// A rendered footnote, ready for a sidebar.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Footnote {
    /// Footnote number exactly as written in the source.
    pub number: String,
    /// Definition text after link, emphasis and inline code rewriting.
    pub html: String,
}

impl Footnote {
    /// Id of the sidebar entry; target of the in-body reference link.
    pub fn anchor_id(&self) -> String {
        format!("fn{}", self.number)
    }
}

/// Remove definition lines and record their text.
///
/// Each definition line becomes an empty line, so it still separates the
/// paragraphs around it. Lines inside closed code fences are never treated as
/// definitions.
pub(crate) fn extract(mut lines: Vec<Line>) -> (Vec<Line>, FootnoteTable) {
    let mut table = FootnoteTable::default();

    let mut in_fence = vec![false; lines.len()];
    for fence in find_fences(&lines) {
        in_fence[fence.span()].fill(true);
    }

    for (line, fenced) in lines.iter_mut().zip(in_fence) {
        if fenced {
            continue;
        }
        let Line::Text(text) = line else { continue };
        if let Some(caps) = DEFINITION.captures(text) {
            table.insert(&caps[1], &caps[2]);
            text.clear();
        }
    }

    (lines, table)
}

/// Render every definition in ascending numeric order.
pub(crate) fn render_entries(table: FootnoteTable) -> Vec<Footnote> {
    table
        .entries
        .into_iter()
        .map(|(label, text)| Footnote {
            number: label.0,
            html: inline::format_footnote(&text),
        })
        .collect()
}
