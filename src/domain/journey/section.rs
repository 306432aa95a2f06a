//! Lines found under a markdown heading

use super::{NoteContent, NoteId};
use pulldown_cmark::{Event, Parser as MdParser, Tag, TagEnd};
use std::collections::VecDeque;
use std::ops::Range;

/// A markdown note held in memory
#[derive(Debug, Clone)]
pub struct MarkdownNote {
    id: NoteId,
    content: String,
}

impl MarkdownNote {
    pub fn new(id: NoteId, content: impl Into<String>) -> Self {
        MarkdownNote {
            id,
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl NoteContent for MarkdownNote {
    fn id(&self) -> &NoteId {
        &self.id
    }

    fn lines_under_heading<'a>(&'a self, heading: &str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        Box::new(SectionLines::new(&self.content, heading))
    }
}

/// Remove a list marker and an optional task checkbox from an item line
fn strip_list_marker(line: &str) -> &str {
    let line = line.trim_start();
    let rest = if let Some(rest) = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .or_else(|| line.strip_prefix("+ "))
    {
        rest
    } else {
        let digits = line.bytes().take_while(u8::is_ascii_digit).count();
        let after = &line[digits..];
        match after.strip_prefix(". ").or_else(|| after.strip_prefix(") ")) {
            Some(rest) if digits > 0 => rest,
            _ => line,
        }
    };
    let rest = rest.trim_start();
    ["[ ] ", "[x] ", "[X] "]
        .iter()
        .find_map(|checkbox| rest.strip_prefix(checkbox))
        .unwrap_or(rest)
        .trim()
}

/// Lazily yields the lines of every section titled `heading`
///
/// A section runs until the next heading of the same or a higher level.
/// List items yield their first line without the marker; paragraphs yield
/// each of their lines. Text is sliced from the source, so wikilinks and
/// other inline syntax come through untouched.
pub struct SectionLines<'a> {
    content: &'a str,
    events: Box<dyn Iterator<Item = (Event<'a>, Range<usize>)> + 'a>,
    heading: String,
    section_level: Option<usize>,
    open_heading: Option<usize>,
    heading_text: String,
    item_depth: usize,
    pending: VecDeque<&'a str>,
}

impl<'a> SectionLines<'a> {
    pub fn new(content: &'a str, heading: &str) -> Self {
        SectionLines {
            content,
            events: Box::new(MdParser::new(content).into_offset_iter()),
            heading: heading.trim().to_string(),
            section_level: None,
            open_heading: None,
            heading_text: String::new(),
            item_depth: 0,
            pending: VecDeque::new(),
        }
    }

    fn close_heading(&mut self) {
        let Some(level) = self.open_heading.take() else {
            return;
        };
        if self.section_level.is_some_and(|current| level <= current) {
            self.section_level = None;
        }
        if self.section_level.is_none() && self.heading_text.trim() == self.heading {
            self.section_level = Some(level);
        }
    }
}

impl<'a> Iterator for SectionLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            if let Some(line) = self.pending.pop_front() {
                return Some(line);
            }

            let content = self.content;
            let (event, range) = self.events.next()?;
            let in_section = self.section_level.is_some();

            match event {
                Event::Start(Tag::Heading { level, .. }) => {
                    self.open_heading = Some(level as usize);
                    self.heading_text.clear();
                }
                Event::End(TagEnd::Heading(_)) => self.close_heading(),
                Event::Text(text) | Event::Code(text) if self.open_heading.is_some() => {
                    self.heading_text.push_str(&text);
                }
                Event::Start(Tag::Item) => {
                    self.item_depth += 1;
                    if in_section {
                        let raw = &content[range];
                        let first = strip_list_marker(raw.lines().next().unwrap_or_default());
                        if !first.is_empty() {
                            self.pending.push_back(first);
                        }
                    }
                }
                Event::End(TagEnd::Item) => {
                    self.item_depth = self.item_depth.saturating_sub(1);
                }
                Event::Start(Tag::Paragraph) if in_section && self.item_depth == 0 => {
                    let raw = &content[range];
                    self.pending
                        .extend(raw.lines().map(str::trim).filter(|l| !l.is_empty()));
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(content: &str, heading: &str) -> Vec<String> {
        SectionLines::new(content, heading)
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_strip_list_marker() {
        assert_eq!(strip_list_marker("- Started [[Dune]]"), "Started [[Dune]]");
        assert_eq!(strip_list_marker("  * item"), "item");
        assert_eq!(strip_list_marker("+ item"), "item");
        assert_eq!(strip_list_marker("12. item"), "item");
        assert_eq!(strip_list_marker("3) item"), "item");
        assert_eq!(strip_list_marker("- [x] done"), "done");
        assert_eq!(strip_list_marker("- [ ] todo"), "todo");
        assert_eq!(strip_list_marker("2024-01-15: 10"), "2024-01-15: 10");
    }

    #[test]
    fn test_list_items_under_heading() {
        let markdown = r#"# 2024-10-12

## Reading

- Started [[Book A]]
- Read [[Book B]]: 42

## Work

- Not reading
"#;
        assert_eq!(
            lines(markdown, "Reading"),
            vec!["Started [[Book A]]", "Read [[Book B]]: 42"]
        );
    }

    #[test]
    fn test_paragraph_lines_under_heading() {
        let markdown = "## Reading\n\nStarted [[Book A]]\nRead [[Book B]]: 42\n\n# Next\n\nOther\n";
        assert_eq!(
            lines(markdown, "Reading"),
            vec!["Started [[Book A]]", "Read [[Book B]]: 42"]
        );
    }

    #[test]
    fn test_section_includes_subheadings() {
        let markdown = r#"## Reading Log

- 2024-01-01: 10

### Notes

- 2024-01-02: 20

## Quotes

- 2024-01-03: 30
"#;
        assert_eq!(
            lines(markdown, "Reading Log"),
            vec!["2024-01-01: 10", "2024-01-02: 20"]
        );
    }

    #[test]
    fn test_nested_items_yield_each_first_line() {
        let markdown = "## Reading\n\n- Started [[A]]\n  - Finished [[B]]\n";
        assert_eq!(lines(markdown, "Reading"), vec!["Started [[A]]", "Finished [[B]]"]);
    }

    #[test]
    fn test_loose_list_items_are_not_repeated() {
        let markdown = "## Reading\n\n- Started [[A]]\n\n- Finished [[B]]\n";
        assert_eq!(lines(markdown, "Reading"), vec!["Started [[A]]", "Finished [[B]]"]);
    }

    #[test]
    fn test_missing_heading_yields_nothing() {
        let markdown = "## Work\n\n- Started [[A]]\n";
        assert!(lines(markdown, "Reading").is_empty());
    }

    #[test]
    fn test_setext_heading_and_repeated_sections() {
        let markdown = "Reading\n-------\n\n- one\n\n## Other\n\n- two\n\n## Reading\n\n- three\n";
        assert_eq!(lines(markdown, "Reading"), vec!["one", "three"]);
    }

    #[test]
    fn test_markdown_note_restarts_per_call() {
        let note = MarkdownNote::new(NoteId::new("2024-10-12.md"), "## Reading\n\n- one\n");
        assert_eq!(note.lines_under_heading("Reading").count(), 1);
        assert_eq!(note.lines_under_heading("Reading").count(), 1);
        assert_eq!(note.id().as_str(), "2024-10-12.md");
        assert!(note.content().starts_with("## Reading"));
    }
}
