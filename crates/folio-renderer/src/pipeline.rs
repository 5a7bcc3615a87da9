//! Typed render pipeline.
//!
//! [`Document`] carries a stage marker. Every stage method consumes a document
//! in one stage and returns it in the next, so the only way to reach
//! [`RenderedDocument`] is through every stage in order.

use std::marker::PhantomData;

use crate::block;
use crate::code::{self, CodeBlocks};
use crate::document::{Line, split_lines};
use crate::footnote::{self, Footnote, FootnoteTable};
use crate::inline;
use crate::line;
use crate::paragraph;

/// Stage markers for [`Document`].
pub mod stage {
    /// Freshly split source.
    #[derive(Debug)]
    pub struct Raw;
    /// Footnote definitions removed and recorded.
    #[derive(Debug)]
    pub struct FootnotesExtracted;
    /// Fenced code replaced by [`Line::Code`](crate::Line::Code) entries.
    #[derive(Debug)]
    pub struct CodeProtected;
    /// Tables, blockquotes and lists collapsed.
    #[derive(Debug)]
    pub struct BlocksFormatted;
    /// Horizontal rules and headers rewritten.
    #[derive(Debug)]
    pub struct LinesFormatted;
    /// Inline markup rewritten.
    #[derive(Debug)]
    pub struct InlineFormatted;
    /// Bare lines merged into paragraphs.
    #[derive(Debug)]
    pub struct ParagraphsWrapped;
}

/// A document part-way through rendering.
#[derive(Debug)]
pub struct Document<S> {
    lines: Vec<Line>,
    code: CodeBlocks,
    footnotes: FootnoteTable,
    _stage: PhantomData<S>,
}

impl<S> Document<S> {
    /// Current lines.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    fn advance<T>(self, f: impl FnOnce(Vec<Line>) -> Vec<Line>) -> Document<T> {
        Document {
            lines: f(self.lines),
            code: self.code,
            footnotes: self.footnotes,
            _stage: PhantomData,
        }
    }
}

impl Document<stage::Raw> {
    /// Split a body into lines.
    pub fn new(body: &str) -> Self {
        Self {
            lines: split_lines(body),
            code: CodeBlocks::default(),
            footnotes: FootnoteTable::default(),
            _stage: PhantomData,
        }
    }

    /// Remove `[^N]: text` definitions outside code fences.
    pub fn extract_footnotes(self) -> Document<stage::FootnotesExtracted> {
        let (lines, footnotes) = footnote::extract(self.lines);
        Document {
            lines,
            code: self.code,
            footnotes,
            _stage: PhantomData,
        }
    }
}

impl Document<stage::FootnotesExtracted> {
    /// Escape each fenced region and swap it for a single code line.
    pub fn protect_code(mut self) -> Document<stage::CodeProtected> {
        let lines = code::protect(std::mem::take(&mut self.lines), &mut self.code);
        self.advance(|_| lines)
    }
}

impl Document<stage::CodeProtected> {
    /// Collapse table, blockquote and list runs.
    pub fn format_blocks(self) -> Document<stage::BlocksFormatted> {
        self.advance(block::format)
    }
}

impl Document<stage::BlocksFormatted> {
    /// Rewrite horizontal rules and headers.
    pub fn format_lines(self) -> Document<stage::LinesFormatted> {
        self.advance(line::format)
    }
}

impl Document<stage::LinesFormatted> {
    /// Rewrite images, links, emphasis, inline code and footnote references.
    ///
    /// Code lines are opaque and never reach the inline formatter.
    pub fn format_inline(self) -> Document<stage::InlineFormatted> {
        self.advance(|lines| {
            lines
                .into_iter()
                .map(|line| line.map_text(|text| inline::format(&text)))
                .collect()
        })
    }
}

impl Document<stage::InlineFormatted> {
    /// Wrap remaining bare lines into paragraphs.
    pub fn wrap_paragraphs(self) -> Document<stage::ParagraphsWrapped> {
        self.advance(paragraph::wrap)
    }
}

impl Document<stage::ParagraphsWrapped> {
    /// Restore code blocks and render footnote contents.
    pub fn finish(self) -> RenderedDocument {
        RenderedDocument {
            html: code::restore(&self.lines, &self.code),
            footnotes: footnote::render_entries(self.footnotes),
        }
    }
}

/// Output of a render: the article fragment and its sidebar footnotes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderedDocument {
    /// Article body HTML.
    pub html: String,
    /// Footnotes in ascending numeric order.
    pub footnotes: Vec<Footnote>,
}

/// Render a document body.
///
/// Never fails: malformed markup is kept as literal text.
pub fn render(body: &str) -> RenderedDocument {
    let doc = Document::new(body).extract_footnotes().protect_code();
    let code_blocks = doc.code.len();
    let footnotes = doc.footnotes.len();

    let rendered = doc
        .format_blocks()
        .format_lines()
        .format_inline()
        .wrap_paragraphs()
        .finish();

    tracing::debug!(
        code_blocks,
        footnotes,
        bytes = rendered.html.len(),
        "Rendered document"
    );
    rendered
}
