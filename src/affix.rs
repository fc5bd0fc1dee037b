//! Literal prefix/suffix pairs that mark the kind of a line.
//!
//! Every construct of the annotated INI format is a single line wrapped in a
//! fixed affix pair:
//!
//! | Affix | Prefix | Suffix |
//! |-------|--------|--------|
//! | [`Affix::Header`] | `###--` | `--###` |
//! | [`Affix::Footer`] | `##--` | `--##` |
//! | [`Affix::Disabled`] | `#--` | `--#` |
//! | [`Affix::Comment`] | `;` | |
//! | [`Affix::Section`] | `[` | `]` |
//!
//! `Disabled` composes with `Section` and with a raw `key=value` line. It never
//! composes with headers or footers.
//!
//! ## Examples
//!
//! ```rust
//! use annotini::affix::{as_disabled, as_section, clean_affix};
//!
//! let line = as_disabled(&as_section("Robot"));
//! assert_eq!(line, "#--[Robot]--#");
//! assert_eq!(clean_affix(&line), "Robot");
//! ```

/// A line kind expressed as a literal wrapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Affix {
    None,
    Header,
    Footer,
    Disabled,
    Comment,
    Section,
}

impl Affix {
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Affix::None => "",
            Affix::Header => "###--",
            Affix::Footer => "##--",
            Affix::Disabled => "#--",
            Affix::Comment => ";",
            Affix::Section => "[",
        }
    }

    #[must_use]
    pub const fn suffix(&self) -> &'static str {
        match self {
            Affix::None => "",
            Affix::Header => "--###",
            Affix::Footer => "--##",
            Affix::Disabled => "--#",
            Affix::Comment => "",
            Affix::Section => "]",
        }
    }

    /// Wraps `text` in this affix pair.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use annotini::affix::Affix;
    ///
    /// assert_eq!(Affix::Footer.wrap("bye"), "##--bye--##");
    /// ```
    #[must_use]
    pub fn wrap(&self, text: &str) -> String {
        let (prefix, suffix) = (self.prefix(), self.suffix());
        let mut out = String::with_capacity(prefix.len() + text.len() + suffix.len());
        out.push_str(prefix);
        out.push_str(text);
        out.push_str(suffix);
        out
    }

    /// Returns `true` when `text` carries both the prefix and the suffix.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        text.starts_with(self.prefix()) && text.ends_with(self.suffix())
    }
}

#[must_use]
pub fn as_header(text: &str) -> String {
    Affix::Header.wrap(text)
}

#[must_use]
pub fn as_footer(text: &str) -> String {
    Affix::Footer.wrap(text)
}

#[must_use]
pub fn as_disabled(text: &str) -> String {
    Affix::Disabled.wrap(text)
}

#[must_use]
pub fn as_comment(text: &str) -> String {
    Affix::Comment.wrap(text)
}

#[must_use]
pub fn as_section(text: &str) -> String {
    Affix::Section.wrap(text)
}

#[must_use]
pub fn is_header(text: &str) -> bool {
    Affix::Header.matches(text)
}

#[must_use]
pub fn is_footer(text: &str) -> bool {
    Affix::Footer.matches(text)
}

#[must_use]
pub fn is_disabled(text: &str) -> bool {
    Affix::Disabled.matches(text)
}

// Longest first so `--###` is never split into `--` plus single `#` tokens.
const LEADING: [&str; 3] = ["###--", "##--", "#--"];
const TRAILING: [&str; 3] = ["--###", "--##", "--#"];

/// Strips every leading and trailing affix token from `text`.
///
/// Leading tokens are `###--`, `##--`, `#--`, `;`, `#`, `[` and whitespace;
/// trailing tokens are `--###`, `--##`, `--#`, `#`, `;`, `]` and whitespace.
/// Blank input, or input made only of affix tokens, yields an empty string.
///
/// This is the canonical form used to deduplicate comment lines.
///
/// # Examples
///
/// ```rust
/// use annotini::affix::clean_affix;
///
/// assert_eq!(clean_affix("###--Generated file--###"), "Generated file");
/// assert_eq!(clean_affix("; a note"), "a note");
/// assert_eq!(clean_affix("   "), "");
/// ```
#[must_use]
pub fn clean_affix(text: &str) -> String {
    let mut rest = text;

    loop {
        if let Some(token) = LEADING.iter().find(|t| rest.starts_with(**t)) {
            rest = &rest[token.len()..];
            continue;
        }
        match rest.chars().next() {
            Some(c) if c == ';' || c == '#' || c == '[' || c.is_whitespace() => {
                rest = &rest[c.len_utf8()..];
            }
            _ => break,
        }
    }

    loop {
        if let Some(token) = TRAILING.iter().find(|t| rest.ends_with(**t)) {
            rest = &rest[..rest.len() - token.len()];
            continue;
        }
        match rest.chars().next_back() {
            Some(c) if c == ';' || c == '#' || c == ']' || c.is_whitespace() => {
                rest = &rest[..rest.len() - c.len_utf8()];
            }
            _ => break,
        }
    }

    rest.trim().to_string()
}
