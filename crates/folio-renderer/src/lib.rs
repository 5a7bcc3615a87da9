//! Line-oriented markdown to HTML transformer.
//!
//! This crate turns the body of an author-written document into two
//! coordinated artifacts: an HTML fragment for the article and an ordered
//! list of rendered footnotes for a sidebar.
//!
//! # Architecture
//!
//! Rendering is a fixed sequence of stages over a typed line buffer
//! ([`Document`]). Each stage consumes the document in one state and returns
//! it in the next, so stages cannot be reordered or skipped:
//!
//! 1. Footnote definitions are removed and recorded.
//! 2. Fenced code is escaped and replaced by an opaque [`Line::Code`] entry.
//! 3. Table, blockquote and list runs are collapsed into HTML blocks.
//! 4. Horizontal rules and headers are rewritten line by line.
//! 5. Images, links, emphasis, inline code and footnote references are
//!    rewritten inside each line.
//! 6. Remaining bare lines are merged into paragraphs.
//! 7. Code blocks are restored and footnote contents are rendered.
//!
//! Malformed markup never fails a render; it degrades to literal text.
//!
//! # Example
//!
//! ```
//! let doc = folio_renderer::render("# Hello World\n\nSee [^1].\n\n[^1]: A note.");
//!
//! assert!(doc.html.starts_with(r#"<h1 id="hello-world">"#));
//! assert_eq!(doc.footnotes.len(), 1);
//! assert_eq!(doc.footnotes[0].anchor_id(), "fn1");
//! ```

mod block;
mod code;
mod document;
mod footnote;
mod html;
mod inline;
mod line;
mod paragraph;
mod pipeline;
mod slug;

pub use document::{CodeBlockId, Line};
pub use footnote::Footnote;
pub use html::escape_html;
pub use pipeline::{Document, RenderedDocument, render, stage};
pub use slug::slugify;
