//! Whole annotated INI documents.
//!
//! A [`Document`] is a header block, an ordered set of uniquely named
//! [`Section`]s and a footer block. It also remembers the file it came from
//! and, after a bounded load, where the next load should resume.
//!
//! Documents are immutable; every change goes through a [`DocumentBuilder`],
//! which always works on its own deep copy.
//!
//! ## Examples
//!
//! ```rust
//! use annotini::{Document, Property, Section};
//!
//! let doc = Document::builder()
//!     .with_header_lines(["Generated file."])
//!     .append_property("Person", Property::new("FirstName", "Jon").unwrap())
//!     .append_property("Person", Property::new("LastName", "Doe").unwrap())
//!     .append_property("Animal", Property::new("Kind", "Cat").unwrap())
//!     .build();
//!
//! assert_eq!(doc.section_count(), 2);
//! assert_eq!(
//!     doc.to_string(),
//!     "###--Generated file.--###\n[Person]\nFirstName=Jon\nLastName=Doe\n[Animal]\nKind=Cat"
//! );
//! ```

use crate::comment::{Comment, CommentKind};
use crate::de::{split_lines, Deserializer};
use crate::loader::{Loader, ResumeCursor};
use crate::map::SectionMap;
use crate::options::Filters;
use crate::property::Property;
use crate::section::{Section, Status};
use crate::writer::is_valid_file;
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// An immutable annotated INI document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Document {
    header: Comment,
    footer: Comment,
    enabled: bool,
    file_path: Option<PathBuf>,
    resume_cursor: Option<ResumeCursor>,
    sections: SectionMap,
}

impl Default for Document {
    fn default() -> Self {
        Document {
            header: Comment::builder().kind(CommentKind::Header).build(),
            footer: Comment::builder().kind(CommentKind::Footer).build(),
            enabled: true,
            file_path: None,
            resume_cursor: None,
            sections: SectionMap::new(),
        }
    }
}

impl Document {
    #[must_use]
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::default()
    }

    /// Returns a builder holding a deep copy of this document.
    #[must_use]
    pub fn to_builder(&self) -> DocumentBuilder {
        DocumentBuilder::from(self)
    }

    #[must_use]
    pub fn header(&self) -> &Comment {
        &self.header
    }

    #[must_use]
    pub fn footer(&self) -> &Comment {
        &self.footer
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The file this document was loaded from or will be written to.
    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Where a following [`DocumentBuilder::load_next`] resumes, if the last
    /// load stopped early.
    #[must_use]
    pub fn resume_cursor(&self) -> Option<ResumeCursor> {
        self.resume_cursor
    }

    #[must_use]
    pub fn sections(&self) -> &SectionMap {
        &self.sections
    }

    /// Returns the sections whose enabled flag matches `status`.
    pub fn sections_by(&self, status: Status) -> impl Iterator<Item = &Section> {
        self.sections
            .iter()
            .filter(move |s| status.accepts(s.is_enabled()))
    }

    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Returns the section named `name`, or the empty section.
    #[must_use]
    pub fn section(&self, name: &str) -> Section {
        self.sections.get(name).cloned().unwrap_or_default()
    }

    /// Returns the section at `index`, or the empty section.
    #[must_use]
    pub fn section_at(&self, index: usize) -> Section {
        self.sections.get_index(index).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn contains_section(&self, name: &str) -> bool {
        self.sections.contains(name)
    }

    /// A document is empty when it has no sections or only empty ones.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(Section::is_empty)
    }

    /// Renders the document under `filters`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use annotini::{from_str, Filters};
    ///
    /// let doc = from_str("###--h--###\n[a]\nk=v\n[b]\nk=v\n##--f--##");
    /// assert_eq!(
    ///     doc.to_string_with_filters(&Filters::TRIM_HEADER_FOOTER_FORMATTED),
    ///     "[a]\nk=v\n\n[b]\nk=v"
    /// );
    /// ```
    #[must_use]
    pub fn to_string_with_filters(&self, filters: &Filters) -> String {
        crate::ser::document_to_string(self, filters)
    }

    /// Writes the rendered document to `path`, or to the stored file path
    /// when `path` is `None`.
    ///
    /// Missing parent directories are created, and the file is replaced
    /// atomically.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPath`] before touching the disk when
    /// neither path is usable, and [`crate::Error::Io`] when writing fails.
    pub fn write(&self, path: Option<&Path>, filters: &Filters) -> crate::Result<()> {
        crate::writer::write_document(self, path, filters)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with_filters(&Filters::none()))
    }
}

/// Stages changes to a [`Document`].
#[derive(Clone, Debug, Default)]
pub struct DocumentBuilder {
    inner: Document,
}

impl DocumentBuilder {
    #[must_use]
    pub fn build(self) -> Document {
        self.inner
    }

    /// Sets the file used by [`DocumentBuilder::load`],
    /// [`DocumentBuilder::load_next`] and [`Document::write`].
    ///
    /// Blank paths are ignored.
    #[must_use]
    pub fn set_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.as_os_str().to_string_lossy().trim().is_empty() {
            self.inner.file_path = Some(path.to_path_buf());
        }
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.inner.enabled = enabled;
        self
    }

    /// Replaces the header. `None` resets it to an empty header.
    #[must_use]
    pub fn with_header(mut self, header: impl Into<Option<Comment>>) -> Self {
        self.inner.header = retype(header.into(), CommentKind::Header);
        self
    }

    /// Replaces the footer. `None` resets it to an empty footer.
    #[must_use]
    pub fn with_footer(mut self, footer: impl Into<Option<Comment>>) -> Self {
        self.inner.footer = retype(footer.into(), CommentKind::Footer);
        self
    }

    /// Replaces the header with the given lines.
    #[must_use]
    pub fn with_header_lines<I, S>(self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.with_header(Comment::from_lines(CommentKind::Header, lines))
    }

    /// Replaces the footer with the given lines.
    #[must_use]
    pub fn with_footer_lines<I, S>(self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.with_footer(Comment::from_lines(CommentKind::Footer, lines))
    }

    /// Appends `section`, merging it into an existing section with the same
    /// name.
    #[must_use]
    pub fn append_section(mut self, section: Section) -> Self {
        self.push_section(section);
        self
    }

    /// Removes the section named `name`, if present.
    #[must_use]
    pub fn remove_section(mut self, name: &str) -> Self {
        self.inner.sections.remove(name);
        self
    }

    /// Removes the section at `index`; out of range indices are ignored.
    #[must_use]
    pub fn remove_section_at(mut self, index: usize) -> Self {
        self.inner.sections.remove_index(index);
        self
    }

    /// Appends `property` to the section named `section`, creating the
    /// section when it does not exist. A blank section name is ignored.
    #[must_use]
    pub fn append_property(mut self, section: &str, property: Property) -> Self {
        self.push_property(section, property);
        self
    }

    /// Removes the property matching `key` and `value` from `section`.
    #[must_use]
    pub fn remove_property(self, section: &str, key: &str, value: &str) -> Self {
        self.update_section(section, |b| b.remove_property(key, value))
    }

    /// Removes the property at `index` from `section`.
    #[must_use]
    pub fn remove_property_at(self, section: &str, index: usize) -> Self {
        self.update_section(section, |b| b.remove_property_at(index))
    }

    /// Merges `other` into this document.
    ///
    /// Header and footer lines are unioned and every section of `other` is
    /// appended (or merged by name). The file path and resume cursor are taken
    /// from `other` only when this document has none.
    #[must_use]
    pub fn merge(mut self, other: &Document) -> Self {
        if self.inner.file_path.is_none() {
            self.inner.file_path = other.file_path.clone();
        }
        if self.inner.resume_cursor.is_none() {
            self.inner.resume_cursor = other.resume_cursor;
        }
        self.inner.header = self.inner.header.to_builder().merge(&other.header).build();
        self.inner.footer = self.inner.footer.to_builder().merge(&other.footer).build();
        for section in &other.sections {
            self.push_section(section.clone());
        }
        self
    }

    /// Parses `text` into this document.
    #[must_use]
    pub fn parse(mut self, text: &str) -> Self {
        {
            let mut de = Deserializer::new(&mut self, 0);
            for (index, line) in split_lines(text).enumerate() {
                de.feed(index, line);
            }
        }
        self
    }

    /// Loads up to `limit` sections (`0` for all) from the start of a file.
    ///
    /// `path` replaces the stored file path when it names a readable,
    /// non-empty file. When neither does, the builder is returned unchanged.
    /// I/O failures are logged and leave whatever was read so far.
    #[must_use]
    pub fn load(mut self, limit: usize, path: Option<&Path>) -> Self {
        if let Some(path) = path.filter(|p| is_valid_file(p)) {
            self.inner.file_path = Some(path.to_path_buf());
        }
        let Some(file) = self.open_file() else {
            return self;
        };
        let result = Loader::new(limit).run(file, &mut self, None);
        self.log_failure(result);
        self
    }

    /// Loads the next `limit` sections (`0` for all remaining) after a bounded
    /// [`DocumentBuilder::load`].
    ///
    /// The section list is replaced by the new page; header and footer lines
    /// accumulate. Without a stored file or resume cursor this does nothing.
    #[must_use]
    pub fn load_next(mut self, limit: usize) -> Self {
        let Some(cursor) = self.inner.resume_cursor else {
            return self;
        };
        let Some(file) = self.open_file() else {
            return self;
        };
        self.inner.sections.clear();
        let result = Loader::new(limit).run(file, &mut self, Some(cursor));
        self.log_failure(result);
        self
    }

    /// Loads up to `limit` sections from any line source.
    ///
    /// # Errors
    ///
    /// Returns the first read error of `reader`.
    pub fn load_from_reader<R: BufRead>(mut self, reader: R, limit: usize) -> io::Result<Self> {
        Loader::new(limit).run(reader, &mut self, None)?;
        Ok(self)
    }

    /// Continues a bounded load from a fresh line source positioned at the
    /// start of the same input. Does nothing without a resume cursor.
    ///
    /// # Errors
    ///
    /// Returns the first read error of `reader`.
    pub fn load_next_from_reader<R: BufRead>(
        mut self,
        reader: R,
        limit: usize,
    ) -> io::Result<Self> {
        let Some(cursor) = self.inner.resume_cursor else {
            return Ok(self);
        };
        self.inner.sections.clear();
        Loader::new(limit).run(reader, &mut self, Some(cursor))?;
        Ok(self)
    }

    pub(crate) fn section_count(&self) -> usize {
        self.inner.sections.len()
    }

    pub(crate) fn set_resume_cursor(&mut self, cursor: Option<ResumeCursor>) {
        self.inner.resume_cursor = cursor;
    }

    pub(crate) fn push_header_line(&mut self, line: &str) {
        self.inner.header = std::mem::take(&mut self.inner.header)
            .to_builder()
            .kind(CommentKind::Header)
            .append_line(line)
            .build();
    }

    pub(crate) fn push_footer_line(&mut self, line: &str) {
        self.inner.footer = std::mem::take(&mut self.inner.footer)
            .to_builder()
            .kind(CommentKind::Footer)
            .append_line(line)
            .build();
    }

    pub(crate) fn push_section(&mut self, section: Section) {
        self.inner.sections.append(section);
    }

    pub(crate) fn push_property(&mut self, section: &str, property: Property) {
        if section.trim().is_empty() {
            return;
        }
        let updated = match self.inner.sections.get(section) {
            Some(existing) => existing.to_builder().append_property(property).build(),
            None => match Section::builder().with_name(section) {
                Ok(builder) => builder.append_property(property).build(),
                Err(_) => return,
            },
        };
        self.inner.sections.replace(updated);
    }

    fn update_section<F>(mut self, name: &str, f: F) -> Self
    where
        F: FnOnce(crate::SectionBuilder) -> crate::SectionBuilder,
    {
        if let Some(existing) = self.inner.sections.get(name) {
            let updated = f(existing.to_builder()).build();
            self.inner.sections.replace(updated);
        }
        self
    }

    fn open_file(&self) -> Option<BufReader<File>> {
        let path = self.inner.file_path.as_deref().filter(|p| is_valid_file(p))?;
        match File::open(path) {
            Ok(file) => Some(BufReader::new(file)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot open file for loading");
                None
            }
        }
    }

    fn log_failure(&self, result: io::Result<()>) {
        if let Err(e) = result {
            let path = self.inner.file_path.as_deref().unwrap_or(Path::new(""));
            tracing::warn!(path = %path.display(), error = %e, "load stopped by read error");
        }
    }
}

fn retype(comment: Option<Comment>, kind: CommentKind) -> Comment {
    comment
        .map(|c| c.to_builder())
        .unwrap_or_default()
        .kind(kind)
        .build()
}

impl From<&Document> for DocumentBuilder {
    fn from(document: &Document) -> Self {
        DocumentBuilder {
            inner: document.clone(),
        }
    }
}

impl From<Document> for DocumentBuilder {
    fn from(document: Document) -> Self {
        DocumentBuilder { inner: document }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_sections() -> Document {
        Document::builder()
            .append_property("Person", Property::new("FirstName", "Jon").unwrap())
            .append_property("Animal", Property::new("Kind", "Cat").unwrap())
            .build()
    }

    #[test]
    fn test_default_is_empty() {
        let doc = Document::builder().build();
        assert!(doc.is_empty());
        assert!(doc.is_enabled());
        assert_eq!(doc.header().kind(), CommentKind::Header);
        assert_eq!(doc.footer().kind(), CommentKind::Footer);
        assert_eq!(doc.resume_cursor(), None);
        assert_eq!(doc.to_string(), "");
    }

    #[test]
    fn test_append_section_merges_by_name() {
        let extra = Section::builder()
            .with_name("Person")
            .unwrap()
            .append_property(Property::new("LastName", "Doe").unwrap())
            .build();
        let doc = two_sections().to_builder().append_section(extra).build();
        assert_eq!(doc.section_count(), 2);
        assert_eq!(doc.section("Person").property_count(), 2);
    }

    #[test]
    fn test_remove_section_at_out_of_range() {
        let doc = two_sections()
            .to_builder()
            .remove_section_at(999)
            .remove_section_at(usize::MAX)
            .remove_section("Nope")
            .build();
        assert_eq!(doc.section_count(), 2);
    }

    #[test]
    fn test_remove_section() {
        let doc = two_sections().to_builder().remove_section("Person").build();
        assert_eq!(doc.section_count(), 1);
        assert_eq!(doc.section_at(0).name(), "Animal");
    }

    #[test]
    fn test_append_property_blank_section_ignored() {
        let doc = two_sections()
            .to_builder()
            .append_property(" ", Property::new("a", "b").unwrap())
            .build();
        assert_eq!(doc.section_count(), 2);
    }

    #[test]
    fn test_remove_property() {
        let doc = two_sections()
            .to_builder()
            .remove_property("Person", "FirstName", "Jon")
            .remove_property_at("Animal", 7)
            .remove_property("Missing", "a", "b")
            .build();
        assert!(doc.section("Person").is_empty());
        assert_eq!(doc.section("Animal").property_count(), 1);
    }

    #[test]
    fn test_merge_copies_path_only_when_unset() {
        let other = two_sections()
            .to_builder()
            .set_file("other.ini")
            .with_header_lines(["h"])
            .build();
        let merged = Document::builder().merge(&other).build();
        assert_eq!(merged.file_path(), Some(Path::new("other.ini")));
        assert_eq!(merged.header().lines(), ["h"]);
        assert_eq!(merged.section_count(), 2);

        let kept = Document::builder()
            .set_file("mine.ini")
            .merge(&other)
            .build();
        assert_eq!(kept.file_path(), Some(Path::new("mine.ini")));
    }

    #[test]
    fn test_with_header_none_resets() {
        let doc = Document::builder()
            .with_header_lines(["a"])
            .with_header(None)
            .build();
        assert!(doc.header().is_empty());
        assert_eq!(doc.header().kind(), CommentKind::Header);
    }

    #[test]
    fn test_builder_clone_is_deep() {
        let original = two_sections();
        let changed = original
            .to_builder()
            .append_property("Person", Property::new("Age", "1").unwrap())
            .build();
        assert_eq!(original.section("Person").property_count(), 1);
        assert_eq!(changed.section("Person").property_count(), 2);
    }

    #[test]
    fn test_sections_by_status() {
        let doc = Document::builder()
            .parse("[a]\nk=v\n#--[b]--#\nk=v")
            .build();
        assert_eq!(doc.sections_by(Status::Enabled).count(), 1);
        assert_eq!(
            doc.sections_by(Status::Disabled).map(Section::name).collect::<Vec<_>>(),
            ["b"]
        );
    }

    #[test]
    fn test_load_next_without_cursor_is_noop() {
        let doc = two_sections().to_builder().load_next(1).build();
        assert_eq!(doc.section_count(), 2);
    }
}
