//! Inline rewriting: images, links, emphasis, inline code and footnote
//! references.
//!
//! Each line is first *masked*: every HTML tag already present (from the
//! author or from an earlier stage) is moved into a stash and replaced by an
//! opaque token built from private-use characters. The rewrite rules then only
//! ever see literal markdown, so they cannot touch an `href` or `class`
//! attribute. Every tag the rules emit is stashed the same way, and the tokens
//! are swapped back in a single pass at the end.
//!
//! Tokens for the structural tags a collapsed block run carries (list items,
//! table rows and cells, blockquote line breaks) and embedded newlines split
//! the line into segments. Every
//! rule runs per segment, so a span can never open in one cell or item and
//! close in the next. Inline tokens such as links and code stay inside their
//! segment and may sit within emphasis.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::html;

const TOKEN_OPEN: char = '\u{E000}';
const TOKEN_CLOSE: char = '\u{E001}';

static MASKABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"</?[A-Za-z][A-Za-z0-9-]*(?:\s[^<>]*)?/?>|[\x{E000}\x{E001}]").unwrap()
});

static STRUCTURAL_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^</?(?:li|ul|ol|table|tr|td|th|blockquote|br)(?:\s[^<>]*)?/?>$").unwrap()
});

static SEGMENT_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x{E000}[0-9]+\x{E001}|\n").unwrap());

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x{E000}([0-9]+)\x{E001}").unwrap());

static CODE_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());

static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());

static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());

static ITALIC_UNDERSCORE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_([^_]+)_").unwrap());

static FOOTNOTE_REF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\^([0-9]+)\]").unwrap());

/// Opaque HTML fragments removed from the line while it is rewritten.
#[derive(Debug, Default)]
struct Stash(Vec<String>);

impl Stash {
    /// Store `html` and return the token that stands in for it.
    fn hold(&mut self, html: impl Into<String>) -> String {
        self.0.push(html.into());
        format!("{TOKEN_OPEN}{}{TOKEN_CLOSE}", self.0.len() - 1)
    }

    /// Swap every token in `text` back for its fragment.
    ///
    /// Fragments never contain tokens themselves, so one pass is enough.
    fn unmask(&self, text: &str) -> String {
        TOKEN
            .replace_all(text, |caps: &Captures<'_>| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|idx| self.0.get(idx))
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_owned())
            })
            .into_owned()
    }

    /// Whether `piece` (a token or a newline) ends a segment.
    fn is_boundary(&self, piece: &str) -> bool {
        if piece == "\n" {
            return true;
        }
        TOKEN
            .captures(piece)
            .and_then(|caps| caps[1].parse::<usize>().ok())
            .and_then(|idx| self.0.get(idx))
            .is_some_and(|fragment| STRUCTURAL_TAG.is_match(fragment))
    }

    /// Apply `f` to each segment of `text` between structural boundaries.
    fn per_segment(
        &mut self,
        text: &str,
        mut f: impl FnMut(&str, &mut Stash) -> String,
    ) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for piece in SEGMENT_BREAK.find_iter(text) {
            if !self.is_boundary(piece.as_str()) {
                continue;
            }
            out.push_str(&f(&text[last..piece.start()], self));
            out.push_str(piece.as_str());
            last = piece.end();
        }
        out.push_str(&f(&text[last..], self));
        out
    }
}

/// A line in the middle of inline rewriting.
struct Inline {
    text: String,
    stash: Stash,
}

impl Inline {
    /// Mask existing tags and any stray token characters.
    fn new(line: &str) -> Self {
        let mut stash = Stash::default();
        let text = MASKABLE
            .replace_all(line, |caps: &Captures<'_>| stash.hold(&caps[0]))
            .into_owned();
        Self { text, stash }
    }

    fn rewrite(
        mut self,
        re: &Regex,
        mut f: impl FnMut(&Captures<'_>, &mut Stash) -> String,
    ) -> Self {
        self.text = self.stash.per_segment(&self.text, |segment, stash| {
            re.replace_all(segment, |caps: &Captures<'_>| f(caps, stash))
                .into_owned()
        });
        self
    }

    /// Lift code spans out first so their payload is never styled.
    fn code(self) -> Self {
        self.rewrite(&CODE_SPAN, |caps, stash| {
            let payload = stash.unmask(&caps[1]);
            stash.hold(html::inline_code(&payload))
        })
    }

    fn images(self) -> Self {
        self.rewrite(&IMAGE, |caps, stash| {
            let alt = stash.unmask(&caps[1]);
            let src = stash.unmask(&caps[2]);
            stash.hold(html::image(&src, &alt))
        })
    }

    /// Link text stays in the line so emphasis still applies to it.
    fn links(self) -> Self {
        self.rewrite(&LINK, |caps, stash| {
            let href = stash.unmask(&caps[2]);
            let open = stash.hold(html::link_open(&href));
            let close = stash.hold("</a>");
            format!("{open}{}{close}", &caps[1])
        })
    }

    fn emphasis(self) -> Self {
        let this = self
            .rewrite(&BOLD, |caps, stash| wrap(stash, "strong", &caps[1]))
            .rewrite(&ITALIC_UNDERSCORE, |caps, stash| wrap(stash, "em", &caps[1]));
        let Self { text, mut stash } = this;
        let text = stash.per_segment(&text, italicize_asterisks);
        Self { text, stash }
    }

    fn footnote_refs(self) -> Self {
        self.rewrite(&FOOTNOTE_REF, |caps, stash| {
            stash.hold(html::footnote_ref(&caps[1]))
        })
    }

    fn finish(self) -> String {
        self.stash.unmask(&self.text)
    }
}

fn wrap(stash: &mut Stash, tag: &str, content: &str) -> String {
    let open = stash.hold(format!("<{tag}>"));
    let close = stash.hold(format!("</{tag}>"));
    format!("{open}{content}{close}")
}

/// Wrap `*text*` in `<em>`, skipping any star that is part of a `**` pair.
fn italicize_asterisks(text: &str, stash: &mut Stash) -> String {
    let chars: Vec<char> = text.chars().collect();
    let is_single = |idx: usize| {
        chars[idx] == '*'
            && (idx == 0 || chars[idx - 1] != '*')
            && chars.get(idx + 1) != Some(&'*')
    };

    let mut out = String::with_capacity(text.len());
    let mut idx = 0;
    while idx < chars.len() {
        if is_single(idx)
            && let Some(close) = (idx + 1..chars.len()).find(|&j| chars[j] == '*')
            && close > idx + 1
            && chars.get(close + 1) != Some(&'*')
        {
            out.push_str(&stash.hold("<em>"));
            out.extend(&chars[idx + 1..close]);
            out.push_str(&stash.hold("</em>"));
            idx = close + 1;
            continue;
        }
        out.push(chars[idx]);
        idx += 1;
    }
    out
}

/// Full inline pass for a body line.
pub(crate) fn format(line: &str) -> String {
    Inline::new(line)
        .code()
        .images()
        .links()
        .emphasis()
        .footnote_refs()
        .finish()
}

/// Reduced pass for footnote definitions: no images and no nested references.
pub(crate) fn format_footnote(text: &str) -> String {
    Inline::new(text).code().links().emphasis().finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(format("Just some words."), "Just some words.");
    }

    #[test]
    fn test_bold_and_italics() {
        assert_eq!(
            format("**bold** and *star* and _under_"),
            "<strong>bold</strong> and <em>star</em> and <em>under</em>"
        );
    }

    #[test]
    fn test_unbalanced_markers_stay_literal() {
        assert_eq!(format("**unclosed"), "**unclosed");
        assert_eq!(format("2 * 3"), "2 * 3");
        assert_eq!(format("***"), "***");
    }

    #[test]
    fn test_bold_containing_italic() {
        assert_eq!(
            format("**very *much* so**"),
            "<strong>very <em>much</em> so</strong>"
        );
    }

    #[test]
    fn test_image() {
        assert_eq!(
            format("![A cat](/img/cat.png)"),
            r#"<img src="/img/cat.png" alt="A cat">"#
        );
    }

    #[test]
    fn test_image_not_treated_as_link() {
        let out = format("![x](a.png) and [y](b)");
        assert_eq!(out, r#"<img src="a.png" alt="x"> and <a href="b">y</a>"#);
    }

    #[test]
    fn test_link_url_not_italicized() {
        assert_eq!(
            format("[docs](https://x.dev/some_long_path)"),
            r#"<a href="https://x.dev/some_long_path">docs</a>"#
        );
    }

    #[test]
    fn test_link_text_is_styled() {
        assert_eq!(
            format("[**bold** link](/a)"),
            r#"<a href="/a"><strong>bold</strong> link</a>"#
        );
    }

    #[test]
    fn test_existing_tags_untouched() {
        let line = r#"<a href="/a_b_c" class="x*y*z">keep</a>"#;
        assert_eq!(format(line), line);
    }

    #[test]
    fn test_header_markup_survives() {
        let line = r##"<h1 id="my_id">A _b_ <a href="#my_id" class="header-link">#</a></h1>"##;
        assert_eq!(
            format(line),
            r##"<h1 id="my_id">A <em>b</em> <a href="#my_id" class="header-link">#</a></h1>"##
        );
    }

    #[test]
    fn test_emphasis_stays_inside_list_items() {
        let line = "<ul><li>set my_var</li><li>then other_var</li></ul>";
        assert_eq!(format(line), line);
    }

    #[test]
    fn test_emphasis_stays_inside_table_cells() {
        let table = "<table>\n<tr><th>a_b</th><th>c</th></tr>\n<tr><td>d</td><td>e_f</td></tr>\n</table>";
        assert_eq!(format(table), table);

        let stars = "<table>\n<tr><td>x*y</td><td>z*w</td></tr>\n</table>";
        assert_eq!(format(stars), stars);
    }

    #[test]
    fn test_emphasis_still_applies_per_item() {
        assert_eq!(
            format("<ul><li>a *b* and [link](/x)</li><li>**c** _d_</li></ul>"),
            r#"<ul><li>a <em>b</em> and <a href="/x">link</a></li><li><strong>c</strong> <em>d</em></li></ul>"#
        );
    }

    #[test]
    fn test_emphasis_may_wrap_a_link() {
        assert_eq!(
            format("**see [docs](/d)**"),
            r#"<strong>see <a href="/d">docs</a></strong>"#
        );
    }

    #[test]
    fn test_comparison_signs_are_not_tags() {
        assert_eq!(
            format("a < b and **c** > d"),
            "a < b and <strong>c</strong> > d"
        );
        assert_eq!(format("x<3 and _y_ >2"), "x<3 and <em>y</em> >2");
    }

    #[test]
    fn test_inline_code_not_styled() {
        assert_eq!(format("`**x** _y_`"), "<code>**x** _y_</code>");
    }

    #[test]
    fn test_inline_code_escapes_payload() {
        assert_eq!(
            format("use `<div class=\"a\">` here"),
            "use <code>&lt;div class=&quot;a&quot;&gt;</code> here"
        );
    }

    #[test]
    fn test_inline_code_hides_link_syntax() {
        assert_eq!(format("`[a](b)`"), "<code>[a](b)</code>");
    }

    #[test]
    fn test_footnote_ref() {
        assert_eq!(
            format("Some [^1] reference."),
            r##"Some <span class="footnote-ref"><sup><a href="#fn1" id="fnref1">1</a></sup></span> reference."##
        );
    }

    #[test]
    fn test_footnote_ref_requires_digits() {
        assert_eq!(format("[^a] and [^]"), "[^a] and [^]");
    }

    #[test]
    fn test_stray_token_characters_preserved() {
        let line = "a\u{E000}0\u{E001}b \u{E001}";
        assert_eq!(format(line), line);
    }

    #[test]
    fn test_footnote_pass_skips_images_and_refs() {
        assert_eq!(
            format_footnote("![a](b.png) see [^2]"),
            r#"!<a href="b.png">a</a> see [^2]"#
        );
    }

    #[test]
    fn test_footnote_pass_styles_text() {
        assert_eq!(
            format_footnote("*Ibid.* `p. 4`"),
            "<em>Ibid.</em> <code>p. 4</code>"
        );
    }
}
