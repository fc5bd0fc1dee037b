//! Annotated INI parsing.
//!
//! The [`Deserializer`] is a line-at-a-time state machine that assembles a
//! [`DocumentBuilder`]. It is fed by in-memory parsing ([`crate::from_str`],
//! [`DocumentBuilder::parse`]) and by the streaming [`crate::loader`], so a
//! file loaded in pages goes through exactly the same transitions as a file
//! parsed in one go.
//!
//! ## State
//!
//! - **pending comment**: comment lines seen since the last section or
//!   property; they attach to whichever of the two comes next
//! - **current section**: the name properties are appended to
//! - **section limit**: when set, the machine stops at the first section line
//!   that would exceed it and reports where to resume
//!
//! Header and footer lines go straight to the document and never become
//! pending. Blank lines are skipped without clearing the pending comment.
//! Unrecognized lines, and properties that appear before any section, are
//! dropped.
//!
//! ## Usage
//!
//! ```rust
//! use annotini::from_str;
//!
//! let doc = from_str("###--top--###\n;about people\n[Person]\nName=Jon\n##--end--##");
//! let person = doc.section("Person");
//! assert_eq!(person.comment().lines(), ["about people"]);
//! assert_eq!(doc.header().lines(), ["top"]);
//! assert_eq!(doc.footer().lines(), ["end"]);
//! ```

use crate::comment::CommentBuilder;
use crate::document::DocumentBuilder;
use crate::line::{classify, Line};
use crate::loader::ResumeCursor;
use crate::property::Property;
use crate::section::Section;

/// Splits `text` on `\r\n`, `\r` and `\n`.
///
/// A `\r\n` pair yields an extra empty piece, which every consumer skips as a
/// blank line.
pub(crate) fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c| c == '\n' || c == '\r')
}

/// What the caller should do after feeding a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// The section limit was reached; the line was not consumed.
    Stop(ResumeCursor),
}

/// Feeds classified lines into a [`DocumentBuilder`].
pub struct Deserializer<'a> {
    document: &'a mut DocumentBuilder,
    pending: CommentBuilder,
    pending_start: Option<usize>,
    current: Option<String>,
    limit: usize,
}

impl<'a> Deserializer<'a> {
    /// Creates a deserializer writing into `document`.
    ///
    /// `limit` is the number of sections the document may hold before the
    /// machine stops; `0` means no limit.
    pub fn new(document: &'a mut DocumentBuilder, limit: usize) -> Self {
        Deserializer {
            document,
            pending: CommentBuilder::default(),
            pending_start: None,
            current: None,
            limit,
        }
    }

    /// Processes the line at `index` of the input.
    pub fn feed(&mut self, index: usize, raw: &str) -> Step {
        match classify(raw) {
            Line::Blank => {}
            Line::Header(text) => self.document.push_header_line(&text),
            Line::Footer(text) => self.document.push_footer_line(&text),
            Line::Comment(text) => {
                if self.pending.line_count() == 0 {
                    self.pending_start = Some(index);
                }
                self.pending = std::mem::take(&mut self.pending).append_line(&text);
            }
            Line::Section { name, enabled } => {
                if self.limit > 0 && self.document.section_count() >= self.limit {
                    let cursor = ResumeCursor::new(self.pending_start.unwrap_or(index));
                    tracing::debug!(
                        line = index,
                        cursor = cursor.line(),
                        sections = self.document.section_count(),
                        "section limit reached"
                    );
                    return Step::Stop(cursor);
                }
                let comment = self.take_pending();
                if let Ok(builder) = Section::builder().with_name(name) {
                    self.document
                        .push_section(builder.enabled(enabled).with_comment(comment).build());
                    self.current = Some(name.to_string());
                }
            }
            Line::Property {
                key,
                value,
                enabled,
            } => {
                let comment = self.take_pending();
                match (&self.current, Property::builder().with_key(key)) {
                    (Some(section), Ok(builder)) => {
                        let property = builder
                            .with_value(value)
                            .with_comment(comment)
                            .enabled(enabled)
                            .build();
                        self.document.push_property(section, property);
                    }
                    _ => tracing::trace!(line = index, key, "property outside of a section dropped"),
                }
            }
            Line::Unrecognized => tracing::trace!(line = index, "unrecognized line dropped"),
        }
        Step::Continue
    }

    fn take_pending(&mut self) -> crate::Comment {
        self.pending_start = None;
        std::mem::take(&mut self.pending).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Document;

    fn feed_all(text: &str, limit: usize) -> (DocumentBuilder, Option<ResumeCursor>) {
        let mut builder = Document::builder();
        let mut stop = None;
        {
            let mut de = Deserializer::new(&mut builder, limit);
            for (i, line) in text.lines().enumerate() {
                if let Step::Stop(cursor) = de.feed(i, line) {
                    stop = Some(cursor);
                    break;
                }
            }
        }
        (builder, stop)
    }

    #[test]
    fn test_split_lines() {
        let lines: Vec<_> = split_lines("a\r\nb\rc\nd").filter(|l| !l.is_empty()).collect();
        assert_eq!(lines, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_comment_attaches_to_next_element() {
        let (builder, _) = feed_all(";s\n\n[a]\n;p\n\nk=v", 0);
        let doc = builder.build();
        let section = doc.section("a");
        assert_eq!(section.comment().lines(), ["s"]);
        assert_eq!(section.property_at(0).comment().lines(), ["p"]);
    }

    #[test]
    fn test_property_before_section_is_dropped() {
        let (builder, _) = feed_all("k=v\n[a]\nx=y", 0);
        let doc = builder.build();
        assert_eq!(doc.section_count(), 1);
        assert_eq!(doc.section("a").property_count(), 1);
    }

    #[test]
    fn test_stop_cursor_points_at_leading_comment() {
        let text = "[a]\nk=v\n\n;about b\n;more\n[b]\nk=v";
        let (builder, stop) = feed_all(text, 1);
        assert_eq!(stop, Some(ResumeCursor::new(3)));
        assert_eq!(builder.build().section_count(), 1);
    }

    #[test]
    fn test_stop_cursor_without_comment() {
        let (_, stop) = feed_all("[a]\nk=v\n[b]\nk=v", 1);
        assert_eq!(stop, Some(ResumeCursor::new(2)));
    }

    #[test]
    fn test_repeated_section_merges() {
        let (builder, _) = feed_all("[a]\nx=1\n[b]\ny=2\n[a]\nz=3", 0);
        let doc = builder.build();
        assert_eq!(doc.section_count(), 2);
        assert_eq!(doc.section("a").property_count(), 2);
    }
}
