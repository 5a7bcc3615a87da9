//! Paragraph wrapping over the fully formatted lines.

use crate::document::Line;
use crate::html;

/// Whether a trimmed text line is already block-level HTML.
fn is_block(trimmed: &str) -> bool {
    let is_header = trimmed
        .strip_prefix("<h")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|level| ('1'..='6').contains(&level));

    is_header
        || trimmed == html::HORIZONTAL_RULE
        || html::BLOCK_PREFIXES
            .iter()
            .any(|prefix| trimmed.starts_with(prefix))
}

/// Merge runs of bare lines into paragraphs.
///
/// Blank lines close the open paragraph and are dropped from the output.
/// Block lines and code placeholders pass through unchanged.
pub(crate) fn wrap(lines: Vec<Line>) -> Vec<Line> {
    let mut output = Vec::with_capacity(lines.len());
    let mut open: Vec<String> = Vec::new();

    let close = |open: &mut Vec<String>, output: &mut Vec<Line>| {
        if !open.is_empty() {
            output.push(Line::Text(html::paragraph(open)));
            open.clear();
        }
    };

    for line in lines {
        let Line::Text(text) = &line else {
            close(&mut open, &mut output);
            output.push(line);
            continue;
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            close(&mut open, &mut output);
        } else if is_block(trimmed) {
            close(&mut open, &mut output);
            output.push(Line::text(trimmed));
        } else {
            open.push(trimmed.to_owned());
        }
    }
    close(&mut open, &mut output);

    output
}
