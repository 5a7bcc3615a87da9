//! Site loading from the content directory.
//!
//! Pages are the `*.md` files directly inside the source directory; posts are
//! the `*.md` files inside its journals directory. Every document is read and
//! rendered independently, so loading fans out across a rayon pool and only
//! the final ordering is done sequentially.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use rayon::prelude::*;
use regex::Regex;

use crate::SiteError;
use crate::document::{Page, Post};

static DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4}-\d{2}-\d{2})").unwrap());

/// Legacy URL prefixes that now live under `journals/`.
const LEGACY_PREFIXES: &[&str] = &["essays/", "essay/", "journal/"];

/// Configuration for [`SiteLoader`].
#[derive(Clone, Debug)]
pub struct SiteLoaderConfig {
    /// Directory holding standalone pages.
    pub source_dir: PathBuf,
    /// Directory holding journal entries.
    pub journals_dir: PathBuf,
}

/// All loaded documents.
#[derive(Debug, Default)]
pub struct Site {
    /// Posts, newest first.
    pub posts: Vec<Post>,
    /// Pages, by file name.
    pub pages: Vec<Page>,
    /// Number of source files that could not be read.
    pub skipped: usize,
}

impl Site {
    /// Find a post by URL path.
    ///
    /// Accepts `journals/<date>/<title>`, a bare `<date>` or `<date>/<title>`,
    /// and the legacy `essay/`, `essays/` and `journal/` prefixes. The date
    /// alone identifies a post, so a stale title slug still resolves.
    pub fn find_post(&self, path: &str) -> Option<&Post> {
        let path = path.trim_matches('/');
        let path = LEGACY_PREFIXES
            .iter()
            .find_map(|prefix| path.strip_prefix(prefix))
            .or_else(|| path.strip_prefix("journals/"))
            .unwrap_or(path);

        if let Some(caps) = DATE_PREFIX.captures(path)
            && let Some(post) = self.posts.iter().find(|p| p.date_slug == caps[1])
        {
            return Some(post);
        }

        self.posts
            .iter()
            .find(|p| p.slug == path || p.date_slug == path)
    }
}

/// Loads and renders every document under the content directory.
pub struct SiteLoader {
    config: SiteLoaderConfig,
}

impl SiteLoader {
    #[must_use]
    pub fn new(config: SiteLoaderConfig) -> Self {
        Self { config }
    }

    /// Load the site.
    ///
    /// Missing directories and unreadable files are logged and skipped.
    pub fn load(&self) -> Site {
        let page_paths = list_markdown(&self.config.source_dir);
        let post_paths = list_markdown(&self.config.journals_dir);

        let (pages, page_errors) = load_all(&page_paths, Page::from_source);
        let (mut posts, post_errors) = load_all(&post_paths, Post::from_source);
        posts.sort_by(newest_first);

        let skipped = page_errors + post_errors;
        tracing::info!(
            pages = pages.len(),
            posts = posts.len(),
            skipped,
            "Site loaded"
        );

        Site {
            posts,
            pages,
            skipped,
        }
    }
}

/// Newest first; undated posts last; ties by file name descending.
fn newest_first(a: &Post, b: &Post) -> Ordering {
    let by_date = match (a.date, b.date) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_date.then_with(|| b.file_name.cmp(&a.file_name))
}

/// Sorted `*.md` files directly inside `dir`.
fn list_markdown(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "Failed to list content directory");
            return Vec::new();
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "md"))
        .collect();
    paths.sort();
    paths
}

fn read_source(path: &Path) -> Result<String, SiteError> {
    std::fs::read_to_string(path).map_err(|source| SiteError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and build documents in parallel, keeping input order.
///
/// Returns the documents and the number of files skipped.
fn load_all<T, F>(paths: &[PathBuf], build: F) -> (Vec<T>, usize)
where
    T: Send,
    F: Fn(&str, &str) -> T + Sync,
{
    let results: Vec<Result<T, SiteError>> = paths
        .par_iter()
        .map(|path| -> Result<T, SiteError> {
            let content = read_source(path)?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy())
                .unwrap_or_default();
            Ok(build(&file_name, &content))
        })
        .collect();

    let mut documents = Vec::with_capacity(results.len());
    let mut skipped = 0;
    for result in results {
        match result {
            Ok(doc) => documents.push(doc),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable document");
                skipped += 1;
            }
        }
    }
    (documents, skipped)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use pretty_assertions::assert_eq;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    fn post(title: &str, date: &str) -> String {
        format!("+++\ntitle = \"{title}\"\ndate = \"{date}\"\n+++\nBody of {title}.")
    }

    fn load(root: &Path) -> Site {
        SiteLoader::new(SiteLoaderConfig {
            source_dir: root.to_path_buf(),
            journals_dir: root.join("journals"),
        })
        .load()
    }

    #[test]
    fn test_load_pages_and_posts() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "now.md", "+++\ntitle = \"Now\"\n+++\nBusy.");
        write(root, "about.md", "+++\ntitle = \"About\"\n+++\nHi.");
        write(root, "notes.txt", "ignored");
        write(&root.join("journals"), "2023-01-29.md", &post("First", "29 Jan 2023"));
        write(&root.join("journals"), "2024-07-06.md", &post("Second", "6 Jul 2024"));

        let site = load(root);

        let pages: Vec<_> = site.pages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(pages, vec!["about", "now"]);
        let posts: Vec<_> = site.posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(posts, vec!["Second", "First"]);
        assert_eq!(site.skipped, 0);
    }

    #[test]
    fn test_undated_posts_sort_last() {
        let dir = tempfile::tempdir().unwrap();
        let journals = dir.path().join("journals");
        write(&journals, "draft.md", "+++\ntitle = \"Draft\"\n+++\nx");
        write(&journals, "2020-01-01.md", &post("Old", ""));

        let site = load(dir.path());

        let posts: Vec<_> = site.posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(posts, vec!["Old", "Draft"]);
    }

    #[test]
    fn test_same_date_ties_by_file_name_descending() {
        let dir = tempfile::tempdir().unwrap();
        let journals = dir.path().join("journals");
        write(&journals, "a.md", &post("A", "1 Mar 2024"));
        write(&journals, "b.md", &post("B", "1 Mar 2024"));

        let site = load(dir.path());

        assert_eq!(site.posts[0].title, "B");
        assert_eq!(site.posts[1].title, "A");
    }

    #[test]
    fn test_missing_directories_yield_empty_site() {
        let dir = tempfile::tempdir().unwrap();
        let site = load(&dir.path().join("missing"));
        assert!(site.posts.is_empty());
        assert!(site.pages.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "good.md", "ok");
        fs::write(dir.path().join("bad.md"), [0xff, 0xfe, 0x00]).unwrap();

        let site = load(dir.path());

        assert_eq!(site.pages.len(), 1);
        assert_eq!(site.skipped, 1);
    }

    fn sample_site() -> Site {
        Site {
            posts: vec![
                Post::from_source("2023-09-23.md", &post("Hello World", "23 Sep 2023")),
                Post::from_source("2023-02-03.md", &post("Earlier", "3 Feb 2023")),
            ],
            pages: vec![Page::from_source("about.md", "About")],
            skipped: 0,
        }
    }

    #[test]
    fn test_find_post_by_full_path() {
        let site = sample_site();
        let post = site.find_post("/journals/2023-09-23/hello-world").unwrap();
        assert_eq!(post.title, "Hello World");
    }

    #[test]
    fn test_find_post_by_date_with_stale_title() {
        let site = sample_site();
        let post = site.find_post("journals/2023-02-03/old-title").unwrap();
        assert_eq!(post.title, "Earlier");
    }

    #[test]
    fn test_find_post_legacy_prefixes() {
        let site = sample_site();
        for path in [
            "essay/2023-09-23/hello-world",
            "essays/2023-09-23",
            "journal/2023-09-23/anything",
        ] {
            assert_eq!(
                site.find_post(path).map(|p| p.title.as_str()),
                Some("Hello World"),
                "path: {path}"
            );
        }
    }

    #[test]
    fn test_find_post_miss() {
        let site = sample_site();
        assert!(site.find_post("journals/1999-01-01").is_none());
        assert!(site.find_post("about").is_none());
    }
}
