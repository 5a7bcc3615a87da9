//! XML sitemap generation.

use std::fmt::Write;

use folio_config::SiteConfig;
use folio_renderer::escape_html;

use crate::date::parse_iso;
use crate::document::{Page, Post};

fn push_url(xml: &mut String, loc: &str, lastmod: Option<&str>, changefreq: &str, priority: &str) {
    xml.push_str("  <url>\n");
    let _ = writeln!(xml, "    <loc>{}</loc>", escape_html(loc));
    if let Some(lastmod) = lastmod {
        let _ = writeln!(xml, "    <lastmod>{lastmod}</lastmod>");
    }
    let _ = writeln!(xml, "    <changefreq>{changefreq}</changefreq>");
    let _ = writeln!(xml, "    <priority>{priority}</priority>");
    xml.push_str("  </url>\n");
}

/// Render `sitemap.xml`: the homepage, every page and every titled post.
pub fn render_sitemap(site: &SiteConfig, pages: &[Page], posts: &[Post]) -> String {
    let base = site.base_url();
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    push_url(&mut xml, &format!("{base}/"), None, "weekly", "1.0");

    for page in pages {
        let loc = format!("{base}/{}", page.url_path());
        push_url(&mut xml, &loc, None, "monthly", "0.7");
    }

    for post in posts.iter().filter(|post| post.has_title) {
        let loc = format!("{base}/{}", post.url_path());
        let lastmod = parse_iso(&post.file_name).map(|date| date.format("%Y-%m-%d").to_string());
        push_url(&mut xml, &loc, lastmod.as_deref(), "monthly", "0.8");
    }

    xml.push_str("</urlset>\n");
    xml
}
