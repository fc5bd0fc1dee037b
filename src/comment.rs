//! Comments attached to documents, sections and properties.
//!
//! A [`Comment`] is an ordered list of unique, non-blank lines. The same type
//! backs plain comments (`;text`) as well as the document-level header
//! (`###--text--###`) and footer (`##--text--##`) blocks; [`CommentKind`]
//! selects the affix used when rendering.
//!
//! Lines are stored without affixes. Appending `"; hello"` or `"hello"`
//! stores the same line, and the second append is dropped as a duplicate.
//!
//! ## Examples
//!
//! ```rust
//! use annotini::{Comment, CommentKind};
//!
//! let comment = Comment::builder()
//!     .append_line("; first")
//!     .append_line("second")
//!     .append_line("first")
//!     .build();
//!
//! assert_eq!(comment.lines(), ["first", "second"]);
//! assert_eq!(comment.to_string(), ";first\n;second");
//!
//! let header = comment.to_builder().kind(CommentKind::Header).build();
//! assert_eq!(header.to_string(), "###--first--###\n###--second--###");
//! ```

use crate::affix::{clean_affix, Affix};
use crate::de::split_lines;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which affix a comment renders with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CommentKind {
    #[default]
    Plain,
    Header,
    Footer,
}

impl CommentKind {
    #[must_use]
    pub const fn affix(&self) -> Affix {
        match self {
            CommentKind::Plain => Affix::Comment,
            CommentKind::Header => Affix::Header,
            CommentKind::Footer => Affix::Footer,
        }
    }
}

/// An immutable, ordered set of comment lines.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize)]
pub struct Comment {
    kind: CommentKind,
    lines: Vec<String>,
}

impl Comment {
    /// Starts building a new, empty plain comment.
    #[must_use]
    pub fn builder() -> CommentBuilder {
        CommentBuilder::default()
    }

    /// Builds a comment of `kind` from raw lines.
    ///
    /// Lines go through the same cleaning and deduplication as
    /// [`CommentBuilder::append_line`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use annotini::{Comment, CommentKind};
    ///
    /// let footer = Comment::from_lines(CommentKind::Footer, ["Generated", "", "Generated"]);
    /// assert_eq!(footer.line_count(), 1);
    /// ```
    pub fn from_lines<I, S>(kind: CommentKind, lines: I) -> Comment
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .fold(Comment::builder().kind(kind), |b, line| {
                b.append_line(line.as_ref())
            })
            .build()
    }

    /// Returns a builder holding a copy of this comment.
    #[must_use]
    pub fn to_builder(&self) -> CommentBuilder {
        CommentBuilder::from(self)
    }

    #[must_use]
    pub fn kind(&self) -> CommentKind {
        self.kind
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::ser::comment_to_string(self))
    }
}

/// Stages changes to a [`Comment`].
///
/// Every method consumes and returns the builder so calls can be chained;
/// invalid input is ignored rather than reported.
#[derive(Clone, Debug, Default)]
pub struct CommentBuilder {
    kind: CommentKind,
    lines: Vec<String>,
}

impl CommentBuilder {
    /// Finishes the comment.
    #[must_use]
    pub fn build(self) -> Comment {
        Comment {
            kind: self.kind,
            lines: self.lines,
        }
    }

    /// Sets the rendering kind.
    #[must_use]
    pub fn kind(mut self, kind: CommentKind) -> Self {
        self.kind = kind;
        self
    }

    /// Appends a line after stripping its affixes.
    ///
    /// Blank lines, and lines already present after cleaning, are dropped.
    #[must_use]
    pub fn append_line(mut self, line: &str) -> Self {
        let clean = clean_affix(line);
        if !clean.is_empty() && !self.lines.contains(&clean) {
            self.lines.push(clean);
        }
        self
    }

    /// Removes the line at `index`; out of range indices are ignored.
    #[must_use]
    pub fn remove_line_at(mut self, index: usize) -> Self {
        if index < self.lines.len() {
            self.lines.remove(index);
        }
        self
    }

    /// Appends the lines of `other` that are not present yet.
    #[must_use]
    pub fn merge(mut self, other: &Comment) -> Self {
        for line in &other.lines {
            if !self.lines.contains(line) {
                self.lines.push(line.clone());
            }
        }
        self
    }

    /// Appends every line of `text`, split on any line ending.
    #[must_use]
    pub fn parse(self, text: &str) -> Self {
        split_lines(text).fold(self, |b, line| b.append_line(line))
    }

    pub(crate) fn line_count(&self) -> usize {
        self.lines.len()
    }
}

impl From<&Comment> for CommentBuilder {
    fn from(comment: &Comment) -> Self {
        CommentBuilder {
            kind: comment.kind,
            lines: comment.lines.clone(),
        }
    }
}

impl From<Comment> for CommentBuilder {
    fn from(comment: Comment) -> Self {
        CommentBuilder {
            kind: comment.kind,
            lines: comment.lines,
        }
    }
}
