//! HTML page templates for static site generation.
//!
//! Articles are laid out as a content column plus a footnote sidebar whose
//! entries carry the `fnN` ids that in-body references link to.

use std::fmt::Write;

use folio_config::SiteConfig;
use folio_renderer::{Footnote, escape_html};

use crate::document::{Page, Post};

/// Body of the 404 page.
pub const NOT_FOUND: &str = "404: Page not found";

/// Head metadata for one page.
pub struct PageMeta<'a> {
    pub title: &'a str,
    pub description: &'a str,
    /// Site-relative URL path, without a leading slash.
    pub url_path: &'a str,
}

/// Render the footnote sidebar; empty when there are no footnotes.
pub fn render_sidebar(footnotes: &[Footnote]) -> String {
    if footnotes.is_empty() {
        return String::new();
    }

    let mut html = String::from("<div class=\"footnotes-sidebar\">\n");
    for note in footnotes {
        let _ = writeln!(
            html,
            "<div class=\"footnote-item\" id=\"{}\"><sup>{}</sup> {}</div>",
            note.anchor_id(),
            note.number,
            note.html
        );
    }
    html.push_str("</div>");
    html
}

/// Content column followed by its sidebar.
fn render_article(content: &str, footnotes: &[Footnote]) -> String {
    let mut html = String::with_capacity(content.len() + 256);
    html.push_str("<div class=\"article-container\">\n");
    html.push_str("<div class=\"article-content\">\n");
    html.push_str(content);
    html.push_str("\n</div>\n");
    let sidebar = render_sidebar(footnotes);
    if !sidebar.is_empty() {
        html.push_str(&sidebar);
        html.push('\n');
    }
    html.push_str("</div>");
    html
}

/// Post article: back link, title, date, then the body.
pub fn render_post_article(post: &Post) -> String {
    let mut content = String::new();
    content.push_str("<a href=\"/\">&larr; Back</a>\n<br><br>\n");
    let _ = write!(
        content,
        "<b>{}</b>\n<br>\n{}\n<br><br>\n",
        escape_html(&post.title),
        escape_html(&post.display_date)
    );
    content.push_str(&post.rendered.html);
    render_article(&content, &post.rendered.footnotes)
}

pub fn render_page_article(page: &Page) -> String {
    render_article(&page.rendered.html, &page.rendered.footnotes)
}

/// One link per post, in the order given.
pub fn render_home(posts: &[Post]) -> String {
    let mut html = String::new();
    for post in posts {
        let _ = writeln!(
            html,
            "<a href=\"/{}\">{}</a><br>",
            escape_html(&post.url_path()),
            escape_html(&post.title)
        );
    }
    html
}

/// Wrap page content in the full HTML document.
pub fn render_shell(site: &SiteConfig, meta: &PageMeta<'_>, content: &str) -> String {
    let title = escape_html(meta.title);
    let description = escape_html(meta.description);
    let base = site.base_url();

    let mut html = String::with_capacity(content.len() + 1024);
    let _ = writeln!(
        html,
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>",
        escape_html(&site.language)
    );
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{title}</title>");
    let _ = writeln!(html, "<meta name=\"description\" content=\"{description}\">");
    let _ = writeln!(html, "<meta property=\"og:title\" content=\"{title}\">");
    let _ = writeln!(
        html,
        "<meta property=\"og:description\" content=\"{description}\">"
    );
    let _ = writeln!(
        html,
        "<link rel=\"canonical\" href=\"{base}/{}\">",
        escape_html(meta.url_path)
    );
    let _ = writeln!(
        html,
        "<link rel=\"alternate\" type=\"application/rss+xml\" title=\"{}\" href=\"{base}/rss.xml\">",
        escape_html(&site.title)
    );
    html.push_str("</head>\n<body>\n<main id=\"app\">\n");
    html.push_str(content);
    html.push_str("\n</main>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn note(number: &str, html: &str) -> Footnote {
        Footnote {
            number: number.to_owned(),
            html: html.to_owned(),
        }
    }

    #[test]
    fn test_sidebar_empty() {
        assert_eq!(render_sidebar(&[]), "");
    }

    #[test]
    fn test_sidebar_entries() {
        let html = render_sidebar(&[note("1", "One."), note("10", "<em>Ten</em>.")]);
        assert_eq!(
            html,
            "<div class=\"footnotes-sidebar\">\n\
             <div class=\"footnote-item\" id=\"fn1\"><sup>1</sup> One.</div>\n\
             <div class=\"footnote-item\" id=\"fn10\"><sup>10</sup> <em>Ten</em>.</div>\n\
             </div>"
        );
    }

    #[test]
    fn test_page_article_without_footnotes() {
        let page = Page::from_source("about.md", "Hello.");
        assert_eq!(
            render_page_article(&page),
            "<div class=\"article-container\">\n<div class=\"article-content\">\n<p>Hello.</p>\n</div>\n</div>"
        );
    }

    #[test]
    fn test_post_article_has_header_and_sidebar() {
        let post = Post::from_source(
            "2023-01-29.md",
            "+++\ntitle = \"A <b> title\"\ndate = \"29 Jan 2023\"\n+++\nText[^1].\n[^1]: Note.",
        );
        let html = render_post_article(&post);

        assert!(html.contains("<b>A &lt;b&gt; title</b>"));
        assert!(html.contains("29 Jan 2023"));
        assert!(html.contains("id=\"fnref1\""));
        assert!(html.contains("<div class=\"footnote-item\" id=\"fn1\"><sup>1</sup> Note.</div>"));
    }

    #[test]
    fn test_home_links() {
        let posts = vec![Post::from_source(
            "2024-02-17.md",
            "+++\ntitle = \"Fish & Chips\"\n+++\nx",
        )];
        assert_eq!(
            render_home(&posts),
            "<a href=\"/journals/2024-02-17/fish-chips\">Fish &amp; Chips</a><br>\n"
        );
    }

    #[test]
    fn test_shell_meta() {
        let site = SiteConfig {
            url: "https://hisam.dev/".to_owned(),
            ..SiteConfig::default()
        };
        let meta = PageMeta {
            title: "About \"me\"",
            description: "Who I am",
            url_path: "about",
        };
        let html = render_shell(&site, &meta, "<p>Hi</p>");

        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en-us\">"));
        assert!(html.contains("<title>About &quot;me&quot;</title>"));
        assert!(html.contains("<meta property=\"og:description\" content=\"Who I am\">"));
        assert!(html.contains("<link rel=\"canonical\" href=\"https://hisam.dev/about\">"));
        assert!(html.contains("<main id=\"app\">\n<p>Hi</p>\n</main>"));
    }
}
