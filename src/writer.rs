//! Persisting documents and single properties.
//!
//! [`write_document`] renders a whole [`Document`] and replaces the target
//! file in one step.
//!
//! [`write_value`] upserts one property without building a document. It
//! streams the existing file line by line, holds at most
//! [`WriterOptions::cache_capacity`] lines in memory before appending them to
//! a temp file next to the target, and finally renames the temp file over the
//! target. A crash before the rename leaves the target untouched.
//!
//! Lines may end in `\r\n`, `\r` or `\n`; the rewritten file uses `\n`.
//!
//! Footer lines are held back while streaming and written last, so the
//! footer stays at the bottom even when a new section is appended.
//!
//! ## Examples
//!
//! ```rust
//! use annotini::{read_value, write_value, WriterOptions};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let file = dir.path().join("settings.ini");
//!
//! write_value(&file, "Person", "Age", "30", &WriterOptions::new()).unwrap();
//! write_value(&file, "Person", "Age", "90", &WriterOptions::new().with_update_existing(true)).unwrap();
//!
//! assert_eq!(read_value(&file, "Person", "Age"), "90");
//! ```

use crate::affix::as_section;
use crate::document::Document;
use crate::line::{classify, Line, LineReader};
use crate::options::{Filters, WriterOptions};
use crate::property::Property;
use crate::section::Section;
use crate::{Error, Result};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Returns `true` when `path` can name a file: not blank, no NUL byte, and
/// not ending in a directory component.
pub(crate) fn is_valid_path(path: &Path) -> bool {
    let text = path.as_os_str().to_string_lossy();
    !text.trim().is_empty() && !text.contains('\0') && path.file_name().is_some()
}

/// Returns `true` for an existing, non-empty regular file.
pub(crate) fn is_valid_file(path: &Path) -> bool {
    is_valid_path(path)
        && fs::metadata(path)
            .map(|m| m.is_file() && m.len() > 0)
            .unwrap_or(false)
}

/// Writes `document` to `path`, falling back to its stored file path.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] when neither path is usable, and
/// [`Error::Io`] when the file cannot be written.
pub fn write_document(document: &Document, path: Option<&Path>, filters: &Filters) -> Result<()> {
    let target = path
        .filter(|p| is_valid_path(p))
        .or_else(|| document.file_path().filter(|p| is_valid_path(p)))
        .ok_or_else(|| Error::invalid_path(path.unwrap_or(Path::new(""))))?;

    let mut temp = create_temp_beside(target)?;
    let text = document.to_string_with_filters(filters);
    temp.write_all(text.as_bytes())
        .map_err(|e| Error::io(temp.path(), e))?;
    persist(temp, target)
}

/// Sets `key=value` in section `section` of `file`.
///
/// Every block named `section` belongs to the section, the same way
/// [`Document`] merges repeated names.
///
/// - A missing or empty file is created holding just that section and
///   property.
/// - The first property with `key` in any block of the section is replaced
///   when [`WriterOptions::update_existing`] is set; otherwise the new line is
///   inserted right after it, leaving a duplicate key on purpose.
/// - A section without `key` gets the property after the last body line of
///   its last block.
/// - A missing section is appended at the end, before the footer.
///
/// The file is read twice: once to locate the target line, once to stream
/// the edited copy.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`], [`Error::InvalidSectionName`] or
/// [`Error::InvalidKey`] before any I/O, and [`Error::Io`] for I/O failures.
/// Keys and names are rejected when the written line would not read back as
/// that property or section.
pub fn write_value(
    file: impl AsRef<Path>,
    section: &str,
    key: &str,
    value: &str,
    options: &WriterOptions,
) -> Result<()> {
    let file = file.as_ref();
    if !is_valid_path(file) {
        return Err(Error::invalid_path(file));
    }
    let property = Property::builder().with_key(key)?.with_value(value).build();
    let fresh = Section::builder()
        .with_name(section)?
        .append_property(property.clone())
        .build();
    if !reads_back_as_property(key, value) {
        return Err(Error::InvalidKey);
    }
    if !reads_back_as_section(section) {
        return Err(Error::InvalidSectionName);
    }

    if !is_valid_file(file) {
        tracing::debug!(path = %file.display(), section, key, "creating new file");
        let document = Document::builder().append_section(fresh).build();
        return write_document(&document, Some(file), &Filters::none());
    }

    let placement = locate(open(file)?, section, key).map_err(|e| Error::io(file, e))?;
    tracing::debug!(path = %file.display(), section, key, ?placement, "upserting property");

    let mut temp = create_temp_beside(file)?;
    {
        let mut upsert =
            Upsert::new(section, &property, placement, options, temp.as_file_mut(), file);
        for (index, line) in LineReader::new(open(file)?).enumerate() {
            let line = line.map_err(|e| Error::io(file, e))?;
            upsert.feed(index, line)?;
        }
        upsert.finish()?;
    }
    persist(temp, file)
}

fn reads_back_as_property(key: &str, value: &str) -> bool {
    let line = format!("{}={}", key, value);
    matches!(classify(&line), Line::Property { key: k, .. } if k == key)
}

fn reads_back_as_section(name: &str) -> bool {
    let line = as_section(name);
    !line.contains(['\r', '\n'])
        && matches!(classify(&line), Line::Section { name: n, enabled: true } if n == name)
}

fn open(file: &Path) -> Result<BufReader<File>> {
    File::open(file)
        .map(BufReader::new)
        .map_err(|e| Error::io(file, e))
}

/// Where the new property line goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Placement {
    /// At the line holding the first `key` in any block of the section.
    AtLine(usize),
    /// At the end of the block opened by the section line at this index.
    EndOfBlock(usize),
    /// In a new section before the footer.
    NewSection,
}

fn locate<R: BufRead>(reader: R, section: &str, key: &str) -> io::Result<Placement> {
    let mut inside = false;
    let mut last_block = None;
    for (index, line) in LineReader::new(reader).enumerate() {
        let line = line?;
        match classify(&line) {
            Line::Section { name, .. } => {
                inside = name == section;
                if inside {
                    last_block = Some(index);
                }
            }
            Line::Property { key: k, .. } if inside && k == key => {
                return Ok(Placement::AtLine(index));
            }
            _ => {}
        }
    }
    Ok(last_block.map_or(Placement::NewSection, Placement::EndOfBlock))
}

enum Action {
    Defer,
    Hold,
    Enter(bool),
    Upsert,
    Copy,
}

/// Line-by-line state of a single property upsert.
struct Upsert<'a, W: Write> {
    section: &'a str,
    new_line: String,
    placement: Placement,
    update_existing: bool,
    cache: LineCache<'a, W>,
    /// Comment and blank lines seen inside the receiving block; the new
    /// property goes before them when the block ends.
    held: Vec<String>,
    footer: Vec<String>,
    in_block: bool,
}

impl<'a, W: Write> Upsert<'a, W> {
    fn new(
        section: &'a str,
        property: &Property,
        placement: Placement,
        options: &WriterOptions,
        sink: W,
        path: &'a Path,
    ) -> Self {
        Upsert {
            section,
            new_line: format!("{}={}", property.key(), property.value()),
            placement,
            update_existing: options.update_existing,
            cache: LineCache::new(sink, options.cache_capacity, path),
            held: Vec::new(),
            footer: Vec::new(),
            in_block: false,
        }
    }

    fn feed(&mut self, index: usize, line: String) -> Result<()> {
        let action = match classify(&line) {
            Line::Footer(_) => Action::Defer,
            _ if self.placement == Placement::AtLine(index) => Action::Upsert,
            Line::Blank | Line::Comment(_) if self.in_block => Action::Hold,
            Line::Section { .. } => Action::Enter(self.placement == Placement::EndOfBlock(index)),
            _ => Action::Copy,
        };

        match action {
            Action::Defer => self.footer.push(line),
            Action::Hold => self.held.push(line),
            Action::Enter(receiving) => {
                self.close_block()?;
                self.in_block = receiving;
                self.cache.push(line)?;
            }
            Action::Upsert => {
                if !self.update_existing {
                    self.cache.push(line)?;
                }
                self.cache.push(self.new_line.clone())?;
            }
            Action::Copy => {
                self.release_held()?;
                self.cache.push(line)?;
            }
        }
        Ok(())
    }

    fn finish(mut self) -> Result<()> {
        self.close_block()?;
        if self.placement == Placement::NewSection {
            self.cache.push(as_section(self.section))?;
            self.cache.push(self.new_line.clone())?;
        }
        for line in std::mem::take(&mut self.footer) {
            self.cache.push(line)?;
        }
        self.cache.flush()
    }

    /// Leaves the receiving block, adding the property before its trailing
    /// comment and blank lines.
    fn close_block(&mut self) -> Result<()> {
        if self.in_block {
            self.in_block = false;
            self.cache.push(self.new_line.clone())?;
        }
        self.release_held()
    }

    fn release_held(&mut self) -> Result<()> {
        for line in std::mem::take(&mut self.held) {
            self.cache.push(line)?;
        }
        Ok(())
    }
}

/// Bounded line buffer appended to a sink whenever it fills up.
struct LineCache<'a, W: Write> {
    sink: W,
    lines: Vec<String>,
    capacity: usize,
    path: &'a Path,
}

impl<'a, W: Write> LineCache<'a, W> {
    fn new(sink: W, capacity: usize, path: &'a Path) -> Self {
        let capacity = capacity.max(1);
        LineCache {
            sink,
            lines: Vec::with_capacity(capacity),
            capacity,
            path,
        }
    }

    fn push(&mut self, line: String) -> Result<()> {
        self.lines.push(line);
        if self.lines.len() >= self.capacity {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if self.lines.is_empty() {
            return Ok(());
        }
        let mut buffer = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in self.lines.drain(..) {
            buffer.push_str(&line);
            buffer.push('\n');
        }
        self.sink
            .write_all(buffer.as_bytes())
            .map_err(|e| Error::io(self.path, e))?;
        tracing::debug!(path = %self.path.display(), bytes = buffer.len(), "flushed line cache");
        Ok(())
    }
}

fn create_temp_beside(target: &Path) -> Result<NamedTempFile> {
    let dir: PathBuf = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
    NamedTempFile::new_in(&dir).map_err(|e| Error::io(&dir, e))
}

fn persist(temp: NamedTempFile, target: &Path) -> Result<()> {
    temp.as_file()
        .sync_all()
        .map_err(|e| Error::io(temp.path(), e))?;
    temp.persist(target).map_err(|e| Error::io(target, e))?;
    tracing::debug!(path = %target.display(), "replaced file");
    Ok(())
}
