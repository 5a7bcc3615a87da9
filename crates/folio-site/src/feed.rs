//! RSS 2.0 feed generation.

use std::io::Cursor;

use chrono::NaiveDate;
use folio_config::SiteConfig;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::SiteError;
use crate::document::Post;

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

/// RFC 2822 timestamp at midnight UTC.
pub(crate) fn naive_to_rfc2822(date: NaiveDate) -> Option<String> {
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().to_rfc2822())
}

type XmlWriter = Writer<Cursor<Vec<u8>>>;

fn text_element(writer: &mut XmlWriter, name: &str, text: &str) -> std::io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))
}

fn write_item(
    writer: &mut XmlWriter,
    base: &str,
    post: &Post,
    pub_date: &str,
) -> std::io::Result<()> {
    let link = format!("{base}/{}", post.url_path());

    writer.write_event(Event::Start(BytesStart::new("item")))?;
    text_element(writer, "title", &post.title)?;
    text_element(writer, "link", &link)?;
    text_element(writer, "description", &post.description)?;
    writer.write_event(Event::Start(
        BytesStart::new("guid").with_attributes([("isPermaLink", "true")]),
    ))?;
    writer.write_event(Event::Text(BytesText::new(&link)))?;
    writer.write_event(Event::End(BytesEnd::new("guid")))?;
    text_element(writer, "pubDate", pub_date)?;
    writer.write_event(Event::End(BytesEnd::new("item")))
}

fn write_feed(writer: &mut XmlWriter, site: &SiteConfig, posts: &[Post]) -> std::io::Result<()> {
    let base = site.base_url();
    let self_link = format!("{base}/rss.xml");

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("rss").with_attributes([("version", "2.0"), ("xmlns:atom", ATOM_NS)]),
    ))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;
    text_element(writer, "title", &site.title)?;
    text_element(writer, "link", base)?;
    text_element(writer, "description", &site.description)?;
    text_element(writer, "language", &site.language)?;
    writer.write_event(Event::Empty(BytesStart::new("atom:link").with_attributes([
        ("href", self_link.as_str()),
        ("rel", "self"),
        ("type", "application/rss+xml"),
    ])))?;

    let items = posts
        .iter()
        .filter(|post| post.has_title)
        .filter_map(|post| Some((post, naive_to_rfc2822(post.date?)?)))
        .take(site.feed_limit);
    for (post, pub_date) in items {
        write_item(writer, base, post, &pub_date)?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))
}

/// Render the RSS feed for `posts`, which must already be newest first.
///
/// Only titled, dated posts are included, up to `site.feed_limit`.
///
/// # Errors
///
/// Returns [`SiteError::Feed`] if the XML writer fails.
pub fn render_feed(site: &SiteConfig, posts: &[Post]) -> Result<String, SiteError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    write_feed(&mut writer, site, posts).map_err(SiteError::Feed)?;
    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
