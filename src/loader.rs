//! Bounded, resumable loading of large files.
//!
//! A [`Loader`] reads a line source from the top and feeds the
//! [`Deserializer`] until either the input ends or the document holds `limit`
//! sections. In the second case it records a [`ResumeCursor`] on the
//! document: the index of the line a following load has to start from.
//!
//! Resuming re-reads the source from the beginning and skips every line
//! before the cursor, so no reader position has to survive between calls.
//! The cursor points at the comment block leading into the section that did
//! not fit, which keeps that comment attached to its section on the next
//! page.
//!
//! ## Examples
//!
//! ```rust
//! use annotini::Document;
//! use std::io::Cursor;
//!
//! let text = "[a]\nk=1\n;about b\n[b]\nk=2\n[c]\nk=3";
//!
//! let first = Document::builder().load_from_reader(Cursor::new(text), 2).unwrap().build();
//! assert_eq!(first.section_count(), 2);
//! assert!(first.resume_cursor().is_some());
//!
//! let next = first.to_builder().load_next_from_reader(Cursor::new(text), 0).unwrap().build();
//! assert_eq!(next.section_count(), 1);
//! assert_eq!(next.section_at(0).name(), "c");
//! assert_eq!(next.resume_cursor(), None);
//! ```

use crate::de::{Deserializer, Step};
use crate::document::DocumentBuilder;
use crate::line::LineReader;
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead};

/// Line index at which a bounded load stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResumeCursor(usize);

impl ResumeCursor {
    #[must_use]
    pub const fn new(line: usize) -> Self {
        ResumeCursor(line)
    }

    /// Zero-based index of the first line the next load processes.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.0
    }
}

/// Drives a [`Deserializer`] over a line source.
#[derive(Clone, Copy, Debug, Default)]
pub struct Loader {
    limit: usize,
}

impl Loader {
    /// Creates a loader that stops once the document holds `limit` sections.
    /// `0` loads everything.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Loader { limit }
    }

    /// Feeds `reader` into `document`, skipping lines before `start`.
    ///
    /// On return the document's resume cursor is set when the limit was hit,
    /// and cleared when the input was exhausted.
    ///
    /// # Errors
    ///
    /// Returns the first error of `reader`. Lines read before it stay in the
    /// document and its resume cursor is cleared.
    pub fn run<R: BufRead>(
        &self,
        reader: R,
        document: &mut DocumentBuilder,
        start: Option<ResumeCursor>,
    ) -> io::Result<()> {
        let skip = start.map_or(0, |c| c.line());
        tracing::debug!(limit = self.limit, skip, "loading sections");

        let mut stopped_at = None;
        let mut failure = None;
        {
            let mut de = Deserializer::new(document, self.limit);
            for (index, line) in LineReader::new(reader).enumerate() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        failure = Some((index, e));
                        break;
                    }
                };
                if index < skip {
                    continue;
                }
                if let Step::Stop(cursor) = de.feed(index, &line) {
                    stopped_at = Some(cursor);
                    break;
                }
            }
        }

        // a failed load never leaves a cursor behind
        document.set_resume_cursor(stopped_at);
        if let Some((line, e)) = failure {
            tracing::warn!(line, error = %e, "load aborted");
            return Err(e);
        }
        tracing::debug!(
            sections = document.section_count(),
            cursor = ?stopped_at,
            "load finished"
        );
        Ok(())
    }
}
