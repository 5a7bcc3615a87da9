//! `+++`-delimited key/value preamble.
//!
//! ```text
//! +++
//! title = "Hello"
//! date = "29 Jan 2023"
//! +++
//! Body text.
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

static FIELD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^(\w+)\s*=\s*"(.+)"$"#).unwrap());

const DELIMITER: &str = "+++";

/// Fields parsed from a document preamble.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Frontmatter {
    fields: BTreeMap<String, String>,
}

impl Frontmatter {
    /// Raw value of a field.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    pub fn description(&self) -> Option<&str> {
        self.get("description")
    }

    /// Display date as written, e.g. `29 Jan 2023`.
    pub fn date(&self) -> Option<&str> {
        self.get("date")
    }
}

/// Split a source document into its preamble fields and trimmed body.
///
/// Without an opening `+++` line the whole text is body. An opening line with
/// no closing line still yields fields but strips nothing from the body.
pub fn split(content: &str) -> (Frontmatter, String) {
    let lines: Vec<&str> = content.lines().collect();
    let mut frontmatter = Frontmatter::default();

    if lines.first() != Some(&DELIMITER) {
        return (frontmatter, content.trim().to_owned());
    }

    let mut body_start = 0;
    for (idx, line) in lines.iter().enumerate().skip(1) {
        if *line == DELIMITER {
            body_start = idx + 1;
            break;
        }
        if let Some(caps) = FIELD.captures(line) {
            frontmatter
                .fields
                .insert(caps[1].to_owned(), caps[2].to_owned());
        }
    }

    let body = lines[body_start..].join("\n").trim().to_owned();
    (frontmatter, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_with_preamble() {
        let (meta, body) = split(
            "+++\ntitle = \"Hello World\"\ndate = \"29 Jan 2023\"\n+++\n\n# Heading\n\nBody.\n",
        );
        assert_eq!(meta.title(), Some("Hello World"));
        assert_eq!(meta.date(), Some("29 Jan 2023"));
        assert_eq!(meta.description(), None);
        assert_eq!(body, "# Heading\n\nBody.");
    }

    #[test]
    fn test_split_without_preamble() {
        let (meta, body) = split("\n  Just text.  \n");
        assert_eq!(meta, Frontmatter::default());
        assert_eq!(body, "Just text.");
    }

    #[test]
    fn test_split_ignores_malformed_fields() {
        let (meta, _) = split("+++\ntitle = Hello\nkey: \"v\"\nempty = \"\"\nok=\"yes\"\n+++\n");
        assert_eq!(meta.title(), None);
        assert_eq!(meta.get("key"), None);
        assert_eq!(meta.get("empty"), None);
        assert_eq!(meta.get("ok"), Some("yes"));
    }

    #[test]
    fn test_split_unclosed_preamble_keeps_body() {
        let (meta, body) = split("+++\ntitle = \"Draft\"\nText");
        assert_eq!(meta.title(), Some("Draft"));
        assert_eq!(body, "+++\ntitle = \"Draft\"\nText");
    }

    #[test]
    fn test_split_value_keeps_inner_quotes() {
        let (meta, _) = split("+++\ntitle = \"Say \"hi\"\"\n+++\n");
        assert_eq!(meta.title(), Some("Say \"hi\""));
    }

    #[test]
    fn test_split_indented_delimiter_is_body() {
        let (meta, body) = split(" +++\ntitle = \"x\"\n+++");
        assert_eq!(meta.title(), None);
        assert_eq!(body, "+++\ntitle = \"x\"\n+++");
    }
}
