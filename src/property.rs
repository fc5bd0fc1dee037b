//! `key=value` properties.
//!
//! A property owns its key, its value, a plain [`Comment`] rendered above it,
//! and an enabled flag. A disabled property stays structurally intact but is
//! written commented out: `#--key=value--#`.
//!
//! The empty property uses a reserved sentinel key instead of an `Option`, so
//! lookups that find nothing can still hand back a `Property`.

use crate::comment::{Comment, CommentKind};
use crate::de::split_lines;
use crate::line::{classify, Line};
use crate::options::Filters;
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;

/// Key of the empty property (and name of the empty section).
pub const SENTINEL_KEY: &str = ";_;";

/// An immutable INI property.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Property {
    key: String,
    value: String,
    comment: Comment,
    enabled: bool,
}

impl Default for Property {
    fn default() -> Self {
        Property {
            key: SENTINEL_KEY.to_string(),
            value: String::new(),
            comment: Comment::default(),
            enabled: true,
        }
    }
}

impl Property {
    /// Creates an enabled property without a comment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if `key` is blank.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use annotini::Property;
    ///
    /// let p = Property::new("Kind", "Cat").unwrap();
    /// assert_eq!(p.to_string(), "Kind=Cat");
    /// ```
    pub fn new(key: &str, value: &str) -> Result<Property> {
        Ok(Property::builder().with_key(key)?.with_value(value).build())
    }

    /// Starts building from the empty property.
    #[must_use]
    pub fn builder() -> PropertyBuilder {
        PropertyBuilder::default()
    }

    /// Starts building with every field given up front.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if `key` is blank.
    pub fn builder_with<I, S>(
        key: &str,
        value: &str,
        enabled: bool,
        comment_lines: I,
    ) -> Result<PropertyBuilder>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Property::builder()
            .with_key(key)?
            .with_value(value)
            .enabled(enabled)
            .with_comment(Comment::from_lines(CommentKind::Plain, comment_lines)))
    }

    /// Returns a builder holding a copy of this property.
    #[must_use]
    pub fn to_builder(&self) -> PropertyBuilder {
        PropertyBuilder::from(self)
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn comment(&self) -> &Comment {
        &self.comment
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns `true` for the sentinel property.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.key == SENTINEL_KEY
    }

    /// Renders the property under `filters`.
    #[must_use]
    pub fn to_string_with_filters(&self, filters: &Filters) -> String {
        crate::ser::property_to_string(self, filters, false)
    }

    pub(crate) fn matches(&self, key: &str, value: Option<&str>) -> bool {
        self.key == key && value.map_or(true, |v| self.value == v)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with_filters(&Filters::none()))
    }
}

/// Stages changes to a [`Property`].
#[derive(Clone, Debug)]
pub struct PropertyBuilder {
    key: String,
    value: String,
    comment: Comment,
    enabled: bool,
}

impl Default for PropertyBuilder {
    fn default() -> Self {
        PropertyBuilder::from(Property::default())
    }
}

impl PropertyBuilder {
    #[must_use]
    pub fn build(self) -> Property {
        Property {
            key: self.key,
            value: self.value,
            comment: self.comment,
            enabled: self.enabled,
        }
    }

    /// Sets the key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if `key` is empty or whitespace.
    pub fn with_key(mut self, key: &str) -> Result<Self> {
        if key.trim().is_empty() {
            return Err(Error::InvalidKey);
        }
        self.key = key.to_string();
        Ok(self)
    }

    #[must_use]
    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    /// Replaces the comment. `None` resets it to an empty comment.
    ///
    /// Property comments always render as plain comments.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<Option<Comment>>) -> Self {
        self.comment = comment
            .into()
            .map(|c| c.to_builder().kind(CommentKind::Plain).build())
            .unwrap_or_default();
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Reads comment lines up to the first property line of `text`.
    ///
    /// Text without a property line only contributes its comment.
    #[must_use]
    pub fn parse(mut self, text: &str) -> Self {
        let mut comment = self.comment.to_builder();
        for raw in split_lines(text) {
            match classify(raw) {
                Line::Comment(line) => comment = comment.append_line(&line),
                Line::Property {
                    key,
                    value,
                    enabled,
                } => {
                    self.key = key.to_string();
                    self.value = value.to_string();
                    self.enabled = enabled;
                    break;
                }
                _ => {}
            }
        }
        self.comment = comment.build();
        self
    }
}

impl From<&Property> for PropertyBuilder {
    fn from(property: &Property) -> Self {
        PropertyBuilder::from(property.clone())
    }
}

impl From<Property> for PropertyBuilder {
    fn from(property: Property) -> Self {
        PropertyBuilder {
            key: property.key,
            value: property.value,
            comment: property.comment,
            enabled: property.enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let property = Property::builder().build();
        assert!(property.is_empty());
        assert_eq!(property.key(), SENTINEL_KEY);
        assert_eq!(property.value(), "");
        assert!(property.is_enabled());
        assert_eq!(property.to_string(), "");
    }

    #[test]
    fn test_with_key_rejects_blank() {
        assert_eq!(Property::builder().with_key("").unwrap_err(), Error::InvalidKey);
        assert_eq!(Property::builder().with_key(" \t").unwrap_err(), Error::InvalidKey);
    }

    #[test]
    fn test_with_comment_none_resets() {
        let property = Property::builder_with("a", "1", true, [";note"])
            .unwrap()
            .with_comment(None)
            .build();
        assert!(property.comment().is_empty());
    }

    #[test]
    fn test_with_comment_forces_plain_kind() {
        let header = Comment::from_lines(CommentKind::Header, ["h"]);
        let property = Property::builder()
            .with_key("a")
            .unwrap()
            .with_comment(header)
            .build();
        assert_eq!(property.comment().kind(), CommentKind::Plain);
    }

    #[test]
    fn test_render_enabled_and_disabled() {
        let enabled = Property::builder_with("Age", "30", true, ["Third"])
            .unwrap()
            .build();
        assert_eq!(enabled.to_string(), ";Third\nAge=30");

        let disabled = enabled.to_builder().enabled(false).build();
        assert_eq!(disabled.to_string(), ";Third\n#--Age=30--#");
        assert!(enabled.is_enabled());
    }

    #[test]
    fn test_parse_reads_comment_then_property() {
        let property = Property::builder()
            .parse(";First Property\n;more\n#--FirstName=Jon--#\nLastName=Doe")
            .build();
        assert_eq!(property.key(), "FirstName");
        assert_eq!(property.value(), "Jon");
        assert!(!property.is_enabled());
        assert_eq!(property.comment().lines(), ["First Property", "more"]);
    }

    #[test]
    fn test_matches() {
        let property = Property::new("k", "v").unwrap();
        assert!(property.matches("k", None));
        assert!(property.matches("k", Some("v")));
        assert!(!property.matches("k", Some("w")));
        assert!(!property.matches("x", None));
    }
}
