//! Fenced code protection and restoration.
//!
//! Fenced regions are found line by line: an opening line of three backticks
//! optionally followed by a language tag, and the next line that is exactly
//! three backticks. An opening fence with no closing line is not a fence at
//! all, so a single typo cannot swallow the rest of the document.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::document::{CodeBlockId, Line};
use crate::html;

static OPEN_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```([A-Za-z0-9_+#-]*)$").unwrap());

const CLOSE_FENCE: &str = "```";

/// A closed fenced region, as line indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Fence {
    /// Index of the opening fence line.
    pub open: usize,
    /// Index of the closing fence line.
    pub close: usize,
    /// Language tag, if one followed the opening backticks.
    pub lang: Option<String>,
}

impl Fence {
    /// Line indices of the payload (between the fence lines).
    pub fn payload(&self) -> Range<usize> {
        self.open + 1..self.close
    }

    /// Line indices of the whole region, fences included.
    pub fn span(&self) -> Range<usize> {
        self.open..self.close + 1
    }
}

/// Find every closed fenced region in document order.
pub(crate) fn find_fences(lines: &[Line]) -> Vec<Fence> {
    let mut fences = Vec::new();
    let mut idx = 0;

    while idx < lines.len() {
        let Some(caps) = lines[idx]
            .as_text()
            .and_then(|text| OPEN_FENCE.captures(text.trim()))
        else {
            idx += 1;
            continue;
        };

        let close = lines[idx + 1..]
            .iter()
            .position(|line| line.as_text().is_some_and(|t| t.trim() == CLOSE_FENCE));

        // No closing line after this opener means none after any later one.
        let Some(offset) = close else { break };

        let lang = caps
            .get(1)
            .map(|m| m.as_str())
            .filter(|lang| !lang.is_empty())
            .map(str::to_owned);
        let fence = Fence {
            open: idx,
            close: idx + 1 + offset,
            lang,
        };
        idx = fence.close + 1;
        fences.push(fence);
    }

    fences
}

/// Side table of rendered code blocks, indexed by [`CodeBlockId`].
#[derive(Debug, Default)]
pub(crate) struct CodeBlocks {
    blocks: Vec<String>,
}

impl CodeBlocks {
    /// Store rendered HTML and return its id.
    pub fn push(&mut self, html: String) -> CodeBlockId {
        self.blocks.push(html);
        CodeBlockId(self.blocks.len() - 1)
    }

    pub fn get(&self, id: CodeBlockId) -> Option<&str> {
        self.blocks.get(id.0).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }
}

/// Replace each fenced region with a single [`Line::Code`] entry.
///
/// The payload is escaped exactly as written, blank lines and indentation
/// included.
pub(crate) fn protect(lines: Vec<Line>, code: &mut CodeBlocks) -> Vec<Line> {
    let fences = find_fences(&lines);
    if fences.is_empty() {
        return lines;
    }

    let mut output = Vec::with_capacity(lines.len());
    let mut cursor = 0;

    for fence in &fences {
        output.extend_from_slice(&lines[cursor..fence.open]);

        let payload: Vec<&str> = lines[fence.payload()]
            .iter()
            .filter_map(Line::as_text)
            .collect();
        let id = code.push(html::code_block(fence.lang.as_deref(), &payload.join("\n")));
        output.push(Line::Code(id));

        cursor = fence.span().end;
    }
    output.extend_from_slice(&lines[cursor..]);

    output
}

/// Join the final lines, swapping code placeholders for their HTML.
pub(crate) fn restore(lines: &[Line], code: &CodeBlocks) -> String {
    lines
        .iter()
        .map(|line| match line {
            Line::Text(text) => text.as_str(),
            Line::Code(id) => code.get(*id).unwrap_or_default(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
