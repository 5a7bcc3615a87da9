//! Static site builder.
//!
//! Renders a loaded [`Site`] into a directory of HTML files plus the RSS
//! feed, sitemap and pages manifest.

use std::fs;
use std::path::{Path, PathBuf};

use folio_config::SiteConfig;
use rayon::prelude::*;

use crate::SiteError;
use crate::document::{Page, Post};
use crate::feed::render_feed;
use crate::loader::Site;
use crate::manifest::render_manifest;
use crate::sitemap::render_sitemap;
use crate::template::{
    NOT_FOUND, PageMeta, render_home, render_page_article, render_post_article, render_shell,
};

/// Summary of a completed build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub posts: usize,
    pub pages: usize,
    /// Source files skipped while loading.
    pub skipped: usize,
}

/// Writes a static site to an output directory.
pub struct StaticSiteBuilder<'a> {
    site: &'a SiteConfig,
    output_dir: PathBuf,
}

impl<'a> StaticSiteBuilder<'a> {
    #[must_use]
    pub fn new(site: &'a SiteConfig, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            site,
            output_dir: output_dir.into(),
        }
    }

    /// Write every output file for `site`.
    ///
    /// # Errors
    ///
    /// Returns an error if an output file cannot be written or the feed or
    /// manifest cannot be serialized.
    pub fn build(&self, site: &Site) -> Result<BuildReport, SiteError> {
        tracing::info!(output = %self.output_dir.display(), "Building site");

        self.write_home(&site.posts)?;
        let not_found = self.shell("404 - Page Not Found", "Page not found", "", NOT_FOUND);
        self.write("404.html", &not_found)?;

        site.posts.par_iter().try_for_each(|post| self.write_post(post))?;
        site.pages.par_iter().try_for_each(|page| self.write_page(page))?;

        self.write("rss.xml", &render_feed(self.site, &site.posts)?)?;
        self.write("sitemap.xml", &render_sitemap(self.site, &site.pages, &site.posts))?;
        self.write("pages.json", &render_manifest(&site.pages)?)?;

        let report = BuildReport {
            posts: site.posts.len(),
            pages: site.pages.len(),
            skipped: site.skipped,
        };
        tracing::info!(
            posts = report.posts,
            pages = report.pages,
            skipped = report.skipped,
            "Site built"
        );
        Ok(report)
    }

    fn shell(&self, title: &str, description: &str, url_path: &str, content: &str) -> String {
        let meta = PageMeta {
            title,
            description,
            url_path,
        };
        render_shell(self.site, &meta, content)
    }

    fn write_home(&self, posts: &[Post]) -> Result<(), SiteError> {
        let html = self.shell(
            &self.site.title,
            &self.site.description,
            "",
            &render_home(posts),
        );
        self.write("index.html", &html)
    }

    fn write_post(&self, post: &Post) -> Result<(), SiteError> {
        let url_path = post.url_path();
        let html = self.shell(
            &post.title,
            &post.description,
            &url_path,
            &render_post_article(post),
        );
        self.write(&format!("{url_path}/index.html"), &html)
    }

    fn write_page(&self, page: &Page) -> Result<(), SiteError> {
        let html = self.shell(
            &page.title,
            &page.description,
            page.url_path(),
            &render_page_article(page),
        );
        self.write(&format!("{}/index.html", page.url_path()), &html)
    }

    /// Write `content` to `relative` under the output directory.
    fn write(&self, relative: &str, content: &str) -> Result<(), SiteError> {
        let path = self.output_dir.join(relative);
        write_file(&path, content)?;
        tracing::debug!(path = %path.display(), "Wrote file");
        Ok(())
    }
}

/// Write a file, creating parent directories as needed.
fn write_file(path: &Path, content: &str) -> Result<(), SiteError> {
    let to_error = |source| SiteError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    fs::write(path, content).map_err(to_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{SiteLoader, SiteLoaderConfig};
    use pretty_assertions::assert_eq;

    fn fixture(root: &Path) {
        let journals = root.join("journals");
        fs::create_dir_all(&journals).unwrap();
        fs::write(
            root.join("about.md"),
            "+++\ntitle = \"About\"\n+++\nI write[^1].\n\n[^1]: Sometimes.",
        )
        .unwrap();
        fs::write(
            journals.join("2023-01-29.md"),
            "+++\ntitle = \"Hello, World!\"\ndate = \"29 Jan 2023\"\n+++\nFirst post.",
        )
        .unwrap();
        fs::write(journals.join("2024-02-08.md"), "No preamble here.").unwrap();
    }

    fn build(root: &Path, out: &Path) -> BuildReport {
        let site = SiteLoader::new(SiteLoaderConfig {
            source_dir: root.to_path_buf(),
            journals_dir: root.join("journals"),
        })
        .load();
        let config = SiteConfig::default();
        StaticSiteBuilder::new(&config, out).build(&site).unwrap()
    }

    #[test]
    fn test_build_writes_all_outputs() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fixture(src.path());

        let report = build(src.path(), out.path());

        assert_eq!(
            report,
            BuildReport {
                posts: 2,
                pages: 1,
                skipped: 0
            }
        );
        for file in [
            "index.html",
            "404.html",
            "rss.xml",
            "sitemap.xml",
            "pages.json",
            "about/index.html",
            "journals/2023-01-29/hello-world/index.html",
            "journals/2024-02-08/untitled/index.html",
        ] {
            assert!(out.path().join(file).is_file(), "missing {file}");
        }
    }

    #[test]
    fn test_build_page_contents() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fixture(src.path());
        build(src.path(), out.path());

        let home = fs::read_to_string(out.path().join("index.html")).unwrap();
        let newer = home.find("/journals/2024-02-08/untitled").unwrap();
        let older = home.find("/journals/2023-01-29/hello-world").unwrap();
        assert!(newer < older);

        let about = fs::read_to_string(out.path().join("about/index.html")).unwrap();
        assert!(about.contains("<title>About</title>"));
        assert!(about.contains("<a href=\"#fn1\" id=\"fnref1\">1</a>"));
        assert!(about.contains("id=\"fn1\"><sup>1</sup> Sometimes.</div>"));

        let not_found = fs::read_to_string(out.path().join("404.html")).unwrap();
        assert!(not_found.contains("404: Page not found"));

        let manifest = fs::read_to_string(out.path().join("pages.json")).unwrap();
        assert_eq!(manifest, "[\n  \"about.md\"\n]");

        let feed = fs::read_to_string(out.path().join("rss.xml")).unwrap();
        assert_eq!(feed.matches("<item>").count(), 1);
    }

    #[test]
    fn test_write_error_reports_path() {
        let out = tempfile::tempdir().unwrap();
        let blocker = out.path().join("blocker");
        fs::write(&blocker, "file").unwrap();

        let err = write_file(&blocker.join("index.html"), "x").unwrap_err();
        assert!(matches!(err, SiteError::Write { .. }));
        assert!(err.to_string().contains("blocker"));
    }
}
