//! Run-based block formatting: tables, blockquotes and lists.
//!
//! A single [`BlockScanner`] walks the lines once. Its state records which
//! kind of run is open, so two run kinds can never be open at the same time.
//! When a line does not continue the open run, the run is rendered into one
//! HTML line and the scanner moves on.
//!
//! Claim order for a line is table, then blockquote, then list: a line that
//! could start more than one run belongs to the first.

mod blockquote;
mod list;
mod table;

use crate::document::Line;
use crate::html;

use list::ListKind;

/// Scanner state. Accumulators live only inside the state that owns them.
#[derive(Debug)]
enum State {
    /// No run open.
    None,
    InTable(Vec<Vec<String>>),
    InBlockquote(Vec<String>),
    InList(ListKind, Vec<String>),
}

/// Line-by-line state machine that collapses block runs into HTML.
pub(crate) struct BlockScanner {
    state: State,
    output: Vec<Line>,
}

impl BlockScanner {
    pub fn new() -> Self {
        Self {
            state: State::None,
            output: Vec::new(),
        }
    }

    /// Feed the next line.
    pub fn push(&mut self, line: Line) {
        let text = match line {
            Line::Code(_) => {
                self.flush();
                self.output.push(line);
                return;
            }
            Line::Text(text) => text,
        };

        let trimmed = text.trim();

        // Alignment rows are metadata; they never render and never end a run.
        if table::is_separator(trimmed) {
            return;
        }

        if let Some(cells) = table::parse_row(trimmed) {
            if let State::InTable(rows) = &mut self.state {
                rows.push(cells);
            } else {
                self.flush();
                self.state = State::InTable(vec![cells]);
            }
            return;
        }

        if let Some(content) = blockquote::parse_line(trimmed) {
            let content = content.to_owned();
            if let State::InBlockquote(lines) = &mut self.state {
                lines.push(content);
            } else {
                self.flush();
                self.state = State::InBlockquote(vec![content]);
            }
            return;
        }

        if let Some((kind, item)) = list::parse_item(trimmed) {
            let item = item.to_owned();
            match &mut self.state {
                State::InList(open, items) if *open == kind => items.push(item),
                _ => {
                    self.flush();
                    self.state = State::InList(kind, vec![item]);
                }
            }
            return;
        }

        self.flush();
        self.output.push(Line::Text(text));
    }

    /// Close any open run and return the formatted lines.
    pub fn finish(mut self) -> Vec<Line> {
        self.flush();
        self.output
    }

    /// Render the open run, if any, and return to [`State::None`].
    fn flush(&mut self) {
        let rendered = match std::mem::replace(&mut self.state, State::None) {
            State::None => None,
            State::InTable(rows) => html::table(&rows),
            State::InBlockquote(lines) => Some(html::blockquote(&lines)),
            State::InList(kind, items) => Some(html::list(kind.tag(), &items)),
        };
        if let Some(block) = rendered {
            self.output.push(Line::Text(block));
        }
    }
}

/// Collapse every table, blockquote and list run.
pub(crate) fn format(lines: Vec<Line>) -> Vec<Line> {
    let mut scanner = BlockScanner::new();
    for line in lines {
        scanner.push(line);
    }
    scanner.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{CodeBlockId, split_lines};
    use pretty_assertions::assert_eq;

    fn format_str(input: &str) -> Vec<Line> {
        format(split_lines(input))
    }

    #[test]
    fn test_table_with_separator() {
        let lines = format_str("| A | B |\n| - | - |\n| 1 | 2 |");
        assert_eq!(
            lines,
            vec![Line::text(
                "<table>\n<tr><th>A</th><th>B</th></tr>\n<tr><td>1</td><td>2</td></tr>\n</table>"
            )]
        );
    }

    #[test]
    fn test_table_without_separator() {
        let lines = format_str("|x|\n|y|");
        assert_eq!(
            lines,
            vec![Line::text(
                "<table>\n<tr><th>x</th></tr>\n<tr><td>y</td></tr>\n</table>"
            )]
        );
    }

    #[test]
    fn test_separator_alone_renders_nothing() {
        assert_eq!(format_str("|---|---|"), Vec::<Line>::new());
    }

    #[test]
    fn test_separator_first_then_header() {
        let lines = format_str("|---|\n| H |\n| d |");
        assert_eq!(
            lines,
            vec![Line::text(
                "<table>\n<tr><th>H</th></tr>\n<tr><td>d</td></tr>\n</table>"
            )]
        );
    }

    #[test]
    fn test_table_ends_on_text() {
        let lines = format_str("| a |\nafter");
        assert_eq!(
            lines,
            vec![
                Line::text("<table>\n<tr><th>a</th></tr>\n</table>"),
                Line::text("after"),
            ]
        );
    }

    #[test]
    fn test_code_line_splits_table() {
        let code = Line::Code(CodeBlockId(0));
        let mut lines = split_lines("| a |");
        lines.push(code.clone());
        lines.extend(split_lines("| b |"));

        assert_eq!(
            format(lines),
            vec![
                Line::text("<table>\n<tr><th>a</th></tr>\n</table>"),
                code,
                Line::text("<table>\n<tr><th>b</th></tr>\n</table>"),
            ]
        );
    }

    #[test]
    fn test_blockquote_multi_line() {
        let lines = format_str("> one\n>\n> two\nafter");
        assert_eq!(
            lines,
            vec![
                Line::text("<blockquote>one<br><br>two</blockquote>"),
                Line::text("after"),
            ]
        );
    }

    #[test]
    fn test_blockquote_indented_lines() {
        let lines = format_str("  > a\n    > b");
        assert_eq!(lines, vec![Line::text("<blockquote>a<br>b</blockquote>")]);
    }

    #[test]
    fn test_unordered_list() {
        let lines = format_str("- a\n* b\n\nnext");
        assert_eq!(
            lines,
            vec![
                Line::text("<ul><li>a</li><li>b</li></ul>"),
                Line::text(""),
                Line::text("next"),
            ]
        );
    }

    #[test]
    fn test_ordered_list_renumbers() {
        let lines = format_str("3. First\n7. Second");
        assert_eq!(
            lines,
            vec![Line::text("<ol><li>First</li><li>Second</li></ol>")]
        );
    }

    #[test]
    fn test_list_kind_switch_closes_previous() {
        let lines = format_str("- a\n1. b\n- c");
        assert_eq!(
            lines,
            vec![
                Line::text("<ul><li>a</li></ul>"),
                Line::text("<ol><li>b</li></ol>"),
                Line::text("<ul><li>c</li></ul>"),
            ]
        );
    }

    #[test]
    fn test_list_closed_at_end_of_input() {
        assert_eq!(
            format_str("text\n- last"),
            vec![Line::text("text"), Line::text("<ul><li>last</li></ul>")]
        );
    }

    #[test]
    fn test_quote_line_is_not_list() {
        let lines = format_str("> - quoted dash");
        assert_eq!(
            lines,
            vec![Line::text("<blockquote>- quoted dash</blockquote>")]
        );
    }

    #[test]
    fn test_run_kinds_do_not_merge() {
        let lines = format_str("| t |\n> q\n- l");
        assert_eq!(
            lines,
            vec![
                Line::text("<table>\n<tr><th>t</th></tr>\n</table>"),
                Line::text("<blockquote>q</blockquote>"),
                Line::text("<ul><li>l</li></ul>"),
            ]
        );
    }

    #[test]
    fn test_plain_lines_untouched() {
        let input = "  indented text\n# Header";
        assert_eq!(format_str(input), split_lines(input));
    }
}
