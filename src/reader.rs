//! Targeted reads that stream a file instead of loading it.
//!
//! A section name may occur several times in a file. Like [`crate::Document`],
//! both readers treat every block with that name as one section.
//! [`read_value`] stops at the first match, so looking up a value near the top
//! of a large file touches only the first lines. Missing, empty and
//! unreadable files read as absent; read failures are logged.

use crate::comment::CommentBuilder;
use crate::line::{classify, Line, LineReader};
use crate::property::Property;
use crate::section::{Section, SectionBuilder};
use crate::writer::is_valid_file;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Returns the value of the first property named `key` in any block of
/// section `section`, or an empty string.
///
/// Disabled properties and sections are read like enabled ones.
///
/// # Examples
///
/// ```rust
/// let dir = tempfile::tempdir().unwrap();
/// let file = dir.path().join("a.ini");
/// std::fs::write(&file, "[Person]\nName=Jon\n[Animal]\nName=Tom").unwrap();
///
/// assert_eq!(annotini::read_value(&file, "Animal", "Name"), "Tom");
/// assert_eq!(annotini::read_value(&file, "Animal", "Age"), "");
/// ```
#[must_use]
pub fn read_value(file: impl AsRef<Path>, section: &str, key: &str) -> String {
    let file = file.as_ref();
    let Some(reader) = open(file) else {
        return String::new();
    };
    match scan_value(reader, section, key) {
        Ok(value) => value.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(path = %file.display(), error = %e, "read_value failed");
            String::new()
        }
    }
}

/// Reads section `name`, with its comment and the comments of its
/// properties. Repeated blocks of the section are merged in file order.
///
/// Returns `None` when the file is missing or the section is absent or
/// empty.
#[must_use]
pub fn read_section(file: impl AsRef<Path>, name: &str) -> Option<Section> {
    let file = file.as_ref();
    let reader = open(file)?;
    match scan_section(reader, name) {
        Ok(section) => section.filter(|s| !s.is_empty()),
        Err(e) => {
            tracing::warn!(path = %file.display(), error = %e, "read_section failed");
            None
        }
    }
}

fn open(file: &Path) -> Option<BufReader<File>> {
    if !is_valid_file(file) {
        return None;
    }
    match File::open(file) {
        Ok(f) => Some(BufReader::new(f)),
        Err(e) => {
            tracing::warn!(path = %file.display(), error = %e, "cannot open file");
            None
        }
    }
}

fn scan_value<R: BufRead>(reader: R, section: &str, key: &str) -> io::Result<Option<String>> {
    let mut inside = false;
    for line in LineReader::new(reader) {
        let line = line?;
        match classify(&line) {
            Line::Section { name, .. } => inside = name == section,
            Line::Property { key: k, value, .. } if inside && k == key => {
                return Ok(Some(value.to_string()));
            }
            _ => {}
        }
    }
    Ok(None)
}

fn scan_section<R: BufRead>(reader: R, name: &str) -> io::Result<Option<Section>> {
    let mut pending = CommentBuilder::default();
    let mut found: Option<SectionBuilder> = None;
    let mut inside = false;

    for line in LineReader::new(reader) {
        let line = line?;
        match classify(&line) {
            Line::Comment(text) => pending = pending.append_line(&text),
            Line::Section {
                name: current,
                enabled,
            } => {
                let comment = std::mem::take(&mut pending).build();
                inside = current == name;
                if !inside {
                    continue;
                }
                found = match found {
                    Some(section) => {
                        Some(section.merge(&Section::builder().with_comment(comment).build()))
                    }
                    None => Section::builder()
                        .with_name(current)
                        .ok()
                        .map(|builder| builder.enabled(enabled).with_comment(comment)),
                };
            }
            Line::Property {
                key,
                value,
                enabled,
            } => {
                let comment = std::mem::take(&mut pending).build();
                if !inside {
                    continue;
                }
                let Ok(builder) = Property::builder().with_key(key) else {
                    continue;
                };
                let property = builder
                    .with_value(value)
                    .with_comment(comment)
                    .enabled(enabled)
                    .build();
                found = found.map(|section| section.append_property(property));
            }
            _ => {}
        }
    }
    Ok(found.map(SectionBuilder::build))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TEXT: &str = "[Person]\nName=Jon\n#--Age=30--#\n;Cats only\n[Animal]\n;Kind of animal\nKind=Cat\nName=Tom\n[Person]\nName=Ann";

    #[test]
    fn test_scan_value_stays_in_section() {
        let value = |s, k| scan_value(Cursor::new(TEXT), s, k).unwrap();
        assert_eq!(value("Person", "Name"), Some("Jon".to_string()));
        assert_eq!(value("Person", "Age"), Some("30".to_string()));
        assert_eq!(value("Animal", "Name"), Some("Tom".to_string()));
        assert_eq!(value("Person", "Kind"), None);
        assert_eq!(value("Insect", "Name"), None);
    }

    #[test]
    fn test_scan_section_collects_comments() {
        let section = scan_section(Cursor::new(TEXT), "Animal").unwrap().unwrap();
        assert_eq!(section.comment().lines(), ["Cats only"]);
        assert_eq!(section.property_count(), 2);
        assert_eq!(section.property_at(0).comment().lines(), ["Kind of animal"]);
        assert_eq!(section.property("Name", None).value(), "Tom");
    }

    #[test]
    fn test_scan_section_merges_repeated_blocks() {
        let section = scan_section(Cursor::new(TEXT), "Person").unwrap().unwrap();
        let keys: Vec<_> = section.properties().iter().map(|p| p.key()).collect();
        assert_eq!(keys, ["Name", "Age", "Name"]);
        assert!(!section.property("Age", None).is_enabled());
        assert_eq!(section.property("Name", Some("Ann")).value(), "Ann");
    }

    #[test]
    fn test_scan_value_searches_every_block() {
        let text = "[Person]\nName=Jon\n[Animal]\nKind=Cat\n[Person]\nAge=30";
        let value = scan_value(Cursor::new(text), "Person", "Age").unwrap();
        assert_eq!(value, Some("30".to_string()));
    }

    #[test]
    fn test_carriage_return_line_endings() {
        let text = "[a]\rk=v\r;about b\r[b]\rk=2";
        assert_eq!(scan_value(Cursor::new(text), "b", "k").unwrap(), Some("2".to_string()));
        let section = scan_section(Cursor::new(text), "b").unwrap().unwrap();
        assert_eq!(section.comment().lines(), ["about b"]);
    }

    #[test]
    fn test_missing_file() {
        assert_eq!(read_value("/definitely/not/here.ini", "a", "b"), "");
        assert!(read_section("/definitely/not/here.ini", "a").is_none());
    }
}
