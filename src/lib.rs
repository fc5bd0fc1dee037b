//! # annotini
//!
//! A codec and immutable document model for annotated INI files.
//!
//! ## What is annotated INI?
//!
//! Plain INI with a few line shapes that carry the metadata plain INI loses:
//!
//! ```text
//! ###--Generated by the build, do not edit--###
//! ;People we know
//! [Person]
//! ;Given name
//! FirstName=Jon
//! #--Age=30--#
//! #--[Robot]--#
//! #--Model=3000--#
//! ##--end of file--##
//! ```
//!
//! Header and footer blocks wrap the document, comments attach to the
//! section or property that follows them, and whole sections or single
//! properties can be switched off without losing them. See [`grammar`] for
//! the exact line rules.
//!
//! ## Key Features
//!
//! - **Lossless round trips**: what is parsed renders back the same way, in
//!   the same order
//! - **Immutable model**: [`Document`], [`Section`], [`Property`] and
//!   [`Comment`] only change through their builders
//! - **Paged loading**: read a few sections of a large file at a time with
//!   [`load`] and [`load_next`]
//! - **Point writes**: [`write_value`] updates one property by streaming the
//!   file through a bounded cache and replacing it atomically
//! - **Filters**: drop comments, header, footer or disabled elements when
//!   rendering
//!
//! ## Quick Start
//!
//! ```rust
//! use annotini::{from_str, to_string_with_filters, Filters};
//!
//! let doc = from_str("[Person]\n;Given name\nFirstName=Jon\n#--Age=30--#");
//!
//! let person = doc.section("Person");
//! assert_eq!(person.property("FirstName", None).value(), "Jon");
//! assert!(!person.property("Age", None).is_enabled());
//!
//! assert_eq!(
//!     to_string_with_filters(&doc, &Filters::TRIM_COMMENT_DISABLED),
//!     "[Person]\nFirstName=Jon"
//! );
//! ```
//!
//! ### Building documents
//!
//! ```rust
//! use annotini::{ini, Property, Section};
//!
//! let doc = ini! {
//!     "Person" => {
//!         "FirstName" => "Jon",
//!         "LastName" => "Doe",
//!     },
//! };
//!
//! let doc = doc
//!     .to_builder()
//!     .append_section(
//!         Section::builder()
//!             .with_name("Animal")
//!             .unwrap()
//!             .append_property(Property::new("Kind", "Cat").unwrap())
//!             .build(),
//!     )
//!     .build();
//!
//! assert_eq!(doc.to_string(), "[Person]\nFirstName=Jon\nLastName=Doe\n[Animal]\nKind=Cat");
//! ```
//!
//! ## Error handling
//!
//! Parsing never fails; unrecognized lines are dropped. Errors come from
//! blank keys or section names, unusable write paths and write-side I/O. See
//! [`Error`].
//!
//! ## Logging
//!
//! The crate logs through [`tracing`]: load progress and file replacement at
//! `debug`, dropped lines at `trace`, swallowed read failures at `warn`. No
//! subscriber is installed.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - parse, inspect and render
//! - **`macro.rs`** - building documents with `ini!`
//! - **`paged_loading.rs`** - walking a large file a few sections at a time
//! - **`point_write.rs`** - updating single values in place
//! - **`custom_filters.rs`** - rendering with filters
//!
//! Run any example with: `cargo run --example <name>`

pub mod affix;
pub mod comment;
pub mod de;
pub mod document;
pub mod error;
pub mod grammar;
pub mod line;
pub mod loader;
pub mod macros;
pub mod map;
pub mod options;
pub mod property;
pub mod reader;
pub mod section;
pub mod ser;
pub mod writer;

pub use comment::{Comment, CommentBuilder, CommentKind};
pub use de::{Deserializer, Step};
pub use document::{Document, DocumentBuilder};
pub use error::{Error, Result};
pub use line::Line;
pub use loader::{Loader, ResumeCursor};
pub use map::SectionMap;
pub use options::{Filters, WriterOptions};
pub use property::{Property, PropertyBuilder};
pub use reader::{read_section, read_value};
pub use section::{Section, SectionBuilder, Status};
pub use ser::Serializer;
pub use writer::{write_document, write_value};

use std::io;
use std::path::Path;

/// Parses annotated INI text into a [`Document`].
///
/// Parsing is lenient: lines that match no construct are dropped, as are
/// properties that appear before the first section.
///
/// # Examples
///
/// ```rust
/// use annotini::from_str;
///
/// let doc = from_str("[a]\nk=v\nnot a line we know");
/// assert_eq!(doc.section("a").property_count(), 1);
/// ```
#[must_use]
pub fn from_str(s: &str) -> Document {
    Document::builder().parse(s).build()
}

/// Parses annotated INI text read to the end of `reader`.
///
/// # Examples
///
/// ```rust
/// use annotini::from_reader;
/// use std::io::Cursor;
///
/// let doc = from_reader(Cursor::new(b"[a]\nk=v")).unwrap();
/// assert_eq!(doc.section("a").property("k", None).value(), "v");
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails and [`Error::Utf8`] if the input is
/// not valid UTF-8.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<Document>
where
    R: io::Read,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io("<reader>", e))?;
    from_slice(&bytes)
}

/// Parses annotated INI text from bytes.
///
/// # Examples
///
/// ```rust
/// use annotini::{from_slice, Error};
///
/// assert_eq!(from_slice(b"[a]\nk=v").unwrap().section_count(), 1);
/// assert!(matches!(from_slice(b"[a]\nk=\xff"), Err(Error::Utf8(_))));
/// ```
///
/// # Errors
///
/// Returns [`Error::Utf8`] if the bytes are not valid UTF-8.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Document> {
    let s = std::str::from_utf8(v).map_err(|e| Error::Utf8(e.to_string()))?;
    Ok(from_str(s))
}

/// Renders `document` with no filters.
#[must_use]
pub fn to_string(document: &Document) -> String {
    to_string_with_filters(document, &Filters::none())
}

/// Renders `document` under `filters`.
///
/// # Examples
///
/// ```rust
/// use annotini::{from_str, to_string_with_filters, Filters};
///
/// let doc = from_str("###--h--###\n[a]\n;c\nk=v");
/// assert_eq!(to_string_with_filters(&doc, &Filters::TRIM_HEADER), "[a]\n;c\nk=v");
/// ```
#[must_use]
pub fn to_string_with_filters(document: &Document, filters: &Filters) -> String {
    let mut serializer = Serializer::new(*filters);
    serializer.serialize_document(document);
    serializer.into_inner()
}

/// Writes the rendered `document` to `writer`.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, document: &Document) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_filters(writer, document, &Filters::none())
}

/// Writes `document` rendered under `filters` to `writer`.
///
/// # Examples
///
/// ```rust
/// use annotini::{from_str, to_writer_with_filters, Filters};
///
/// let doc = from_str("[a]\n;c\nk=v");
/// let mut buffer = Vec::new();
/// to_writer_with_filters(&mut buffer, &doc, &Filters::TRIM_COMMENT).unwrap();
/// assert_eq!(buffer, b"[a]\nk=v");
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_filters<W>(mut writer: W, document: &Document, filters: &Filters) -> Result<()>
where
    W: io::Write,
{
    let text = to_string_with_filters(document, filters);
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io("<writer>", e))?;
    Ok(())
}

/// Loads up to `limit` sections of `path` (`0` for all).
///
/// The returned document remembers `path` and, when the limit cut the load
/// short, where [`load_next`] continues. A missing or empty file yields an
/// empty document.
///
/// # Examples
///
/// ```rust
/// let dir = tempfile::tempdir().unwrap();
/// let file = dir.path().join("big.ini");
/// std::fs::write(&file, "[a]\nk=1\n[b]\nk=2\n[c]\nk=3").unwrap();
///
/// let first = annotini::load(&file, 2);
/// assert_eq!(first.section_count(), 2);
///
/// let rest = annotini::load_next(&first, 0);
/// assert_eq!(rest.section_at(0).name(), "c");
/// ```
#[must_use]
pub fn load(path: impl AsRef<Path>, limit: usize) -> Document {
    let path = path.as_ref();
    Document::builder()
        .set_file(path)
        .load(limit, Some(path))
        .build()
}

/// Loads the page of up to `limit` sections following `previous`.
///
/// Header and footer lines carry over; the sections are only those of the
/// new page. Without a resume cursor the document is returned as is.
#[must_use]
pub fn load_next(previous: &Document, limit: usize) -> Document {
    previous.to_builder().load_next(limit).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEOPLE: &str = "###--People--###\n;All people\n[Person]\n;Name\nFirstName=Jon\n#--Age=30--#\n[Animal]\nKind=Cat\n##--end--##";

    #[test]
    fn test_round_trip() {
        assert_eq!(to_string(&from_str(PEOPLE)), PEOPLE);
    }

    #[test]
    fn test_from_slice_matches_from_str() {
        assert_eq!(from_slice(PEOPLE.as_bytes()).unwrap(), from_str(PEOPLE));
    }

    #[test]
    fn test_from_reader() {
        let doc = from_reader(io::Cursor::new(PEOPLE)).unwrap();
        assert_eq!(doc.section_count(), 2);
        assert_eq!(doc.header().lines(), ["People"]);
    }

    #[test]
    fn test_to_writer_matches_to_string() {
        let doc = from_str(PEOPLE);
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &doc).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), to_string(&doc));
    }

    #[test]
    fn test_filters() {
        let doc = from_str(PEOPLE);
        assert_eq!(
            to_string_with_filters(&doc, &Filters::TRIM_COMMENT_HEADER_FOOTER_DISABLED),
            "[Person]\nFirstName=Jon\n[Animal]\nKind=Cat"
        );
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let doc = load("/no/such/dir/file.ini", 0);
        assert!(doc.is_empty());
        assert_eq!(doc.resume_cursor(), None);
    }

    #[test]
    fn test_serde_snapshot() {
        let json = serde_json::to_value(from_str("[a]\nk=v")).unwrap();
        assert_eq!(json["sections"][0]["name"], "a");
        assert_eq!(json["sections"][0]["properties"][0]["value"], "v");
    }
}
