//! Typed line buffer shared by all render stages.

/// Index of a protected code block in the code side table.
///
/// Only the code protection stage mints these, so an id always refers to a
/// block of the document it was created for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CodeBlockId(pub(crate) usize);

/// A single line of a document in flight.
///
/// Protected code never appears as text: the protection stage swaps the whole
/// fenced region for one [`Line::Code`] entry, which every later stage treats
/// as an opaque block boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Line {
    /// Markdown source or HTML emitted by an earlier stage.
    Text(String),
    /// Placeholder for a protected code block.
    Code(CodeBlockId),
}

impl Line {
    /// Create a text line.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Text content, or `None` for a code placeholder.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Code(_) => None,
        }
    }

    /// Apply `f` to a text line, passing code placeholders through untouched.
    pub(crate) fn map_text(self, f: impl FnOnce(String) -> String) -> Self {
        match self {
            Self::Text(text) => Self::Text(f(text)),
            code @ Self::Code(_) => code,
        }
    }
}

/// Split a document body into text lines.
///
/// `\r\n` and `\n` both end a line, so CRLF input renders with LF line
/// endings everywhere, code payloads included.
pub(crate) fn split_lines(body: &str) -> Vec<Line> {
    body.lines().map(Line::text).collect()
}
