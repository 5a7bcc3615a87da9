//! HTML snippets emitted by the render stages.
//!
//! Every tag the transformer produces is built here, so the paragraph wrapper's
//! list of block prefixes and the markup it has to recognise stay in one place.

use std::fmt::Write;

/// Opening prefixes of lines that are already block-level HTML.
///
/// Headers are matched separately (`<h1` to `<h6`).
pub(crate) const BLOCK_PREFIXES: &[&str] = &[
    "<blockquote>",
    "<pre>",
    "<table>",
    "<img",
    "<ul>",
    "</ul>",
    "<ol>",
    "</ol>",
    "<li>",
];

/// Horizontal rule output.
pub(crate) const HORIZONTAL_RULE: &str = "<hr>";

/// Escape HTML special characters.
///
/// # Examples
///
/// ```
/// use folio_renderer::escape_html;
///
/// assert_eq!(escape_html("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
/// ```
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Fenced code block with the payload escaped verbatim.
pub(crate) fn code_block(lang: Option<&str>, content: &str) -> String {
    match lang {
        Some(lang) => format!(
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            escape_html(lang),
            escape_html(content)
        ),
        None => format!("<pre><code>{}</code></pre>", escape_html(content)),
    }
}

/// Header with a stable id and a hover-revealed self link.
pub(crate) fn header(level: usize, id: &str, text: &str) -> String {
    format!(r##"<h{level} id="{id}">{text} <a href="#{id}" class="header-link">#</a></h{level}>"##)
}

/// Table with the first row as header cells.
///
/// Returns `None` for an empty run.
pub(crate) fn table(rows: &[Vec<String>]) -> Option<String> {
    let (head, body) = rows.split_first()?;

    let mut out = String::from("<table>\n<tr>");
    for cell in head {
        write!(out, "<th>{cell}</th>").unwrap();
    }
    out.push_str("</tr>\n");
    for row in body {
        out.push_str("<tr>");
        for cell in row {
            write!(out, "<td>{cell}</td>").unwrap();
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>");
    Some(out)
}

/// Blockquote whose source lines are separated by line breaks.
pub(crate) fn blockquote(lines: &[String]) -> String {
    format!("<blockquote>{}</blockquote>", lines.join("<br>"))
}

/// List with one `<li>` per item.
pub(crate) fn list(tag: &str, items: &[String]) -> String {
    let mut out = format!("<{tag}>");
    for item in items {
        write!(out, "<li>{item}</li>").unwrap();
    }
    write!(out, "</{tag}>").unwrap();
    out
}

/// Paragraph from already-trimmed source lines.
pub(crate) fn paragraph(lines: &[String]) -> String {
    format!("<p>{}</p>", lines.join(" "))
}

pub(crate) fn image(src: &str, alt: &str) -> String {
    format!(r#"<img src="{}" alt="{}">"#, escape_html(src), escape_html(alt))
}

pub(crate) fn link_open(href: &str) -> String {
    format!(r#"<a href="{}">"#, escape_html(href))
}

pub(crate) fn inline_code(content: &str) -> String {
    format!("<code>{}</code>", escape_html(content))
}

/// Superscript reference pointing at sidebar entry `fnN`.
pub(crate) fn footnote_ref(number: &str) -> String {
    format!(
        r##"<span class="footnote-ref"><sup><a href="#fn{number}" id="fnref{number}">{number}</a></sup></span>"##
    )
}
