//! Journal posts and standalone pages.

use std::path::Path;

use chrono::NaiveDate;
use folio_renderer::{RenderedDocument, render, slugify};

use crate::date::parse_date;
use crate::frontmatter::{self, Frontmatter};
use crate::summary::extract_description;

const UNTITLED: &str = "Untitled";

/// File name without its `.md` extension.
fn file_stem(file_name: &str) -> &str {
    Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name)
}

fn description(meta: &Frontmatter, body: &str) -> String {
    meta.description()
        .map_or_else(|| extract_description(body), str::to_owned)
}

/// A dated journal entry.
#[derive(Debug, Clone)]
pub struct Post {
    /// Source file name, e.g. `2023-01-29.md`.
    pub file_name: String,
    /// File stem, e.g. `2023-01-29`.
    pub date_slug: String,
    /// `<date_slug>/<title slug>`.
    pub slug: String,
    pub title: String,
    /// Whether the preamble set a title. Untitled posts stay out of the feed
    /// and the sitemap.
    pub has_title: bool,
    pub description: String,
    /// Date as written in the preamble (may be empty).
    pub display_date: String,
    /// Parsed date; `None` sorts after every dated post.
    pub date: Option<NaiveDate>,
    pub rendered: RenderedDocument,
}

impl Post {
    /// Parse and render a journal entry.
    pub fn from_source(file_name: &str, content: &str) -> Self {
        let (meta, body) = frontmatter::split(content);
        let date_slug = file_stem(file_name).to_owned();
        let title = meta.title().unwrap_or(UNTITLED).to_owned();
        let slug = format!("{date_slug}/{}", slugify(&title));
        let display_date = meta.date().unwrap_or_default().to_owned();

        Self {
            file_name: file_name.to_owned(),
            date: parse_date(&display_date, file_name),
            description: description(&meta, &body),
            has_title: meta.title().is_some(),
            rendered: render(&body),
            date_slug,
            slug,
            title,
            display_date,
        }
    }

    /// Site-relative URL path, without a leading slash.
    pub fn url_path(&self) -> String {
        format!("journals/{}", self.slug)
    }
}

/// A standalone page such as `about.md`.
#[derive(Debug, Clone)]
pub struct Page {
    /// Source file name, e.g. `about.md`.
    pub file_name: String,
    /// File stem; also the page's URL path.
    pub name: String,
    pub title: String,
    pub description: String,
    pub rendered: RenderedDocument,
}

impl Page {
    /// Parse and render a standalone page.
    pub fn from_source(file_name: &str, content: &str) -> Self {
        let (meta, body) = frontmatter::split(content);

        Self {
            file_name: file_name.to_owned(),
            name: file_stem(file_name).to_owned(),
            title: meta.title().unwrap_or(UNTITLED).to_owned(),
            description: description(&meta, &body),
            rendered: render(&body),
        }
    }

    /// Site-relative URL path, without a leading slash.
    pub fn url_path(&self) -> &str {
        &self.name
    }
}
