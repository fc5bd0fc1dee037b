//! Single-line classification.
//!
//! [`classify`] maps one raw line to a [`Line`]. Matching follows a fixed
//! precedence because some inputs fit several shapes (a disabled footer also
//! starts with `#`, for example):
//!
//! 1. header
//! 2. footer
//! 3. comment
//! 4. section (optionally disabled)
//! 5. property (optionally disabled)
//! 6. anything else is [`Line::Unrecognized`]
//!
//! ```rust
//! use annotini::line::{classify, Line};
//!
//! assert_eq!(
//!     classify("#--Age=30--#"),
//!     Line::Property { key: "Age", value: "30", enabled: false }
//! );
//! assert_eq!(classify("; note"), Line::Comment("note".to_string()));
//! ```

use crate::affix::{clean_affix, is_disabled, is_footer, is_header, Affix};
use std::collections::VecDeque;
use std::io::{self, BufRead};

/// The classification of one line of annotated INI text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Line<'a> {
    /// Empty or whitespace-only line.
    Blank,
    /// Header line, holding its text without affixes.
    Header(String),
    /// Footer line, holding its text without affixes.
    Footer(String),
    /// Comment line, holding its text without affixes.
    Comment(String),
    Section {
        name: &'a str,
        enabled: bool,
    },
    Property {
        key: &'a str,
        value: &'a str,
        enabled: bool,
    },
    Unrecognized,
}

impl Line<'_> {
    /// Returns `true` for lines that carry no information for any consumer.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, Line::Blank | Line::Unrecognized)
    }
}

/// Classifies a single line. Leading and trailing whitespace is ignored.
#[must_use]
pub fn classify(raw: &str) -> Line<'_> {
    let line = raw.trim();
    if line.is_empty() {
        return Line::Blank;
    }

    if is_header(line) {
        return Line::Header(clean_affix(line));
    }
    if is_footer(line) {
        return Line::Footer(clean_affix(line));
    }
    if is_comment(line) {
        return Line::Comment(clean_affix(line));
    }
    if let Some((name, enabled)) = parse_section(line) {
        return Line::Section { name, enabled };
    }
    if let Some((key, value, enabled)) = parse_property(line) {
        return Line::Property {
            key,
            value,
            enabled,
        };
    }

    Line::Unrecognized
}

/// Splits a byte stream into lines ended by `\r\n`, `\r` or `\n`.
///
/// A `\r\n` pair ends one line, so line indices match those of
/// [`BufRead::lines`] on `\n` and `\r\n` input. Invalid UTF-8 is reported as
/// [`io::ErrorKind::InvalidData`].
pub(crate) struct LineReader<R> {
    reader: R,
    buf: Vec<u8>,
    pending: VecDeque<String>,
}

impl<R: BufRead> LineReader<R> {
    pub(crate) fn new(reader: R) -> Self {
        LineReader {
            reader,
            buf: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    fn fill(&mut self) -> io::Result<bool> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(false);
        }
        let mut chunk = self.buf.as_slice();
        if let Some(rest) = chunk.strip_suffix(b"\n") {
            chunk = rest;
        }
        if let Some(rest) = chunk.strip_suffix(b"\r") {
            chunk = rest;
        }
        let text =
            std::str::from_utf8(chunk).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pending.extend(text.split('\r').map(str::to_string));
        Ok(true)
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pending.is_empty() {
            match self.fill() {
                Ok(true) => {}
                Ok(false) => return None,
                Err(e) => return Some(Err(e)),
            }
        }
        self.pending.pop_front().map(Ok)
    }
}

/// A comment starts with `;` or `#`, holds no `=`, does not look like a
/// section, and is not wrapped as header, footer or disabled.
fn is_comment(line: &str) -> bool {
    (line.starts_with(';') || line.starts_with('#'))
        && !is_disabled(line)
        && !is_footer(line)
        && !is_header(line)
        && !line.starts_with('[')
        && !line.ends_with(']')
        && !line.contains('=')
}

/// Splits an optional disabled wrapper off `line`.
///
/// The element counts as disabled only when both halves of the wrapper are
/// present.
fn strip_disabled<'a>(line: &'a str, must_end_with: Option<char>) -> (&'a str, bool) {
    let (body, pre) = match line.strip_prefix(Affix::Disabled.prefix()) {
        Some(rest) => (rest, true),
        None => (line, false),
    };
    let (body, post) = match body.strip_suffix(Affix::Disabled.suffix()) {
        Some(rest) if must_end_with.map_or(true, |c| rest.ends_with(c)) => (rest, true),
        _ => (body, false),
    };
    (body, !(pre && post))
}

fn parse_section(line: &str) -> Option<(&str, bool)> {
    let (body, enabled) = strip_disabled(line, Some(']'));
    let name = body
        .strip_prefix(Affix::Section.prefix())?
        .strip_suffix(Affix::Section.suffix())?;

    if name.trim().is_empty() {
        return None;
    }
    Some((name, enabled))
}

fn parse_property(line: &str) -> Option<(&str, &str, bool)> {
    let (body, enabled) = strip_disabled(line, None);
    let (key, value) = body.split_once('=')?;

    let key_is_valid = !key.is_empty()
        && !key
            .chars()
            .any(|c| matches!(c, '[' | '#' | ';') || c.is_whitespace());
    if !key_is_valid {
        return None;
    }
    Some((key, value, enabled))
}
