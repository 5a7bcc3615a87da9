//! Publishing pipeline for Folio.
//!
//! This crate provides:
//! - [`SiteLoader`]: discovers and renders pages and journal posts
//! - [`StaticSiteBuilder`]: writes HTML pages, the RSS feed, the sitemap and
//!   the pages manifest
//! - Page templates with the footnote sidebar
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use folio_config::Config;
//! use folio_site::{SiteLoader, SiteLoaderConfig, StaticSiteBuilder};
//!
//! let config = Config::load(None, None)?;
//! let content = &config.content_resolved;
//!
//! let site = SiteLoader::new(SiteLoaderConfig {
//!     source_dir: content.source_dir.clone(),
//!     journals_dir: content.journals_path(),
//! })
//! .load();
//!
//! let report = StaticSiteBuilder::new(&config.site, &content.output_dir).build(&site)?;
//! println!("{} posts", report.posts);
//! # Ok(())
//! # }
//! ```

mod builder;
mod date;
mod document;
mod error;
mod feed;
mod frontmatter;
mod loader;
mod manifest;
mod sitemap;
mod summary;
pub mod template;

pub use builder::{BuildReport, StaticSiteBuilder};
pub use date::{parse_date, parse_iso};
pub use document::{Page, Post};
pub use error::SiteError;
pub use feed::render_feed;
pub use frontmatter::{Frontmatter, split};
pub use loader::{Site, SiteLoader, SiteLoaderConfig};
pub use manifest::render_manifest;
pub use sitemap::render_sitemap;
pub use summary::extract_description;
