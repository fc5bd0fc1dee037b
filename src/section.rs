//! Named groups of properties.
//!
//! Properties inside a [`Section`] are unique by their `(key, value)` pair:
//! the same key may appear several times with different values, but appending
//! an identical pair is a no-op.
//!
//! A disabled section renders its header line and every one of its properties
//! disabled, whatever their own flag says. The properties themselves are not
//! modified.
//!
//! ## Examples
//!
//! ```rust
//! use annotini::{Property, Section};
//!
//! let section = Section::builder()
//!     .with_name("Animal").unwrap()
//!     .append_property(Property::new("Kind", "Cat").unwrap())
//!     .append_property(Property::new("Kind", "Cat").unwrap())
//!     .enabled(false)
//!     .build();
//!
//! assert_eq!(section.property_count(), 1);
//! assert_eq!(section.to_string(), "#--[Animal]--#\n#--Kind=Cat--#");
//! ```

use crate::comment::{Comment, CommentKind};
use crate::de::split_lines;
use crate::line::{classify, Line};
use crate::options::Filters;
use crate::property::{Property, SENTINEL_KEY};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Selects elements by their enabled flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    All,
    Enabled,
    Disabled,
}

impl Status {
    #[must_use]
    pub fn accepts(&self, enabled: bool) -> bool {
        match self {
            Status::All => true,
            Status::Enabled => enabled,
            Status::Disabled => !enabled,
        }
    }
}

/// An immutable INI section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Section {
    name: String,
    comment: Comment,
    enabled: bool,
    properties: Vec<Property>,
}

impl Default for Section {
    fn default() -> Self {
        Section {
            name: SENTINEL_KEY.to_string(),
            comment: Comment::default(),
            enabled: true,
            properties: Vec::new(),
        }
    }
}

impl Section {
    #[must_use]
    pub fn builder() -> SectionBuilder {
        SectionBuilder::default()
    }

    /// Returns a builder holding a deep copy of this section.
    #[must_use]
    pub fn to_builder(&self) -> SectionBuilder {
        SectionBuilder::from(self)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn comment(&self) -> &Comment {
        &self.comment
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Returns the properties whose enabled flag matches `status`.
    pub fn properties_by(&self, status: Status) -> impl Iterator<Item = &Property> {
        self.properties
            .iter()
            .filter(move |p| status.accepts(p.is_enabled()))
    }

    #[must_use]
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Finds the first property with `key`, and `value` when given.
    ///
    /// Returns the empty property when nothing matches.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use annotini::from_str;
    ///
    /// let doc = from_str("[a]\nk=1\nk=2");
    /// let section = doc.section("a");
    /// assert_eq!(section.property("k", None).value(), "1");
    /// assert_eq!(section.property("k", Some("2")).value(), "2");
    /// assert!(section.property("missing", None).is_empty());
    /// ```
    #[must_use]
    pub fn property(&self, key: &str, value: Option<&str>) -> Property {
        self.index_of(key, value)
            .map(|i| self.properties[i].clone())
            .unwrap_or_default()
    }

    /// Returns the property at `index`, or the empty property.
    #[must_use]
    pub fn property_at(&self, index: usize) -> Property {
        self.properties.get(index).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn contains_property(&self, key: &str, value: Option<&str>) -> bool {
        self.index_of(key, value).is_some()
    }

    /// A section is empty when it has no name, no properties, or only empty
    /// properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name == SENTINEL_KEY || self.properties.iter().all(Property::is_empty)
    }

    /// Renders the section under `filters`.
    #[must_use]
    pub fn to_string_with_filters(&self, filters: &Filters) -> String {
        crate::ser::section_to_string(self, filters, false)
    }

    fn index_of(&self, key: &str, value: Option<&str>) -> Option<usize> {
        index_of(&self.properties, key, value)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with_filters(&Filters::none()))
    }
}

fn index_of(properties: &[Property], key: &str, value: Option<&str>) -> Option<usize> {
    properties.iter().position(|p| p.matches(key, value))
}

/// Stages changes to a [`Section`].
#[derive(Clone, Debug)]
pub struct SectionBuilder {
    name: String,
    comment: Comment,
    enabled: bool,
    properties: Vec<Property>,
}

impl Default for SectionBuilder {
    fn default() -> Self {
        SectionBuilder::from(Section::default())
    }
}

impl SectionBuilder {
    #[must_use]
    pub fn build(self) -> Section {
        Section {
            name: self.name,
            comment: self.comment,
            enabled: self.enabled,
            properties: self.properties,
        }
    }

    /// Sets the section name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSectionName`] if `name` is empty or whitespace.
    pub fn with_name(mut self, name: &str) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(Error::InvalidSectionName);
        }
        self.name = name.to_string();
        Ok(self)
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Replaces the comment. `None` resets it to an empty comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<Option<Comment>>) -> Self {
        self.comment = comment
            .into()
            .map(|c| c.to_builder().kind(CommentKind::Plain).build())
            .unwrap_or_default();
        self
    }

    /// Appends `property` unless it is empty or its `(key, value)` pair is
    /// already present.
    #[must_use]
    pub fn append_property(mut self, property: Property) -> Self {
        self.push_unique(property);
        self
    }

    /// Unions the comment of `other` and appends its properties that are not
    /// present yet. Name and enabled flag are kept.
    #[must_use]
    pub fn merge(mut self, other: &Section) -> Self {
        self.comment = self.comment.to_builder().merge(&other.comment).build();
        for property in &other.properties {
            self.push_unique(property.clone());
        }
        self
    }

    /// Removes the first property matching `key` and `value`, if any.
    #[must_use]
    pub fn remove_property(self, key: &str, value: &str) -> Self {
        match index_of(&self.properties, key, Some(value)) {
            Some(i) => self.remove_property_at(i),
            None => self,
        }
    }

    /// Removes the property at `index`; out of range indices are ignored.
    #[must_use]
    pub fn remove_property_at(mut self, index: usize) -> Self {
        if index < self.properties.len() {
            self.properties.remove(index);
        }
        self
    }

    /// Reads one section from `text`: the comment above its header line, the
    /// header line itself, and the properties that follow. Parsing stops at
    /// the next section line.
    #[must_use]
    pub fn parse(mut self, text: &str) -> Self {
        let mut pending = Comment::builder();
        let mut found = false;

        for raw in split_lines(text) {
            match classify(raw) {
                Line::Comment(line) => pending = pending.append_line(&line),
                Line::Section { name, enabled } => {
                    if found {
                        break;
                    }
                    found = true;
                    self.name = name.to_string();
                    self.enabled = enabled;
                    self.comment = std::mem::take(&mut pending).build();
                }
                Line::Property {
                    key,
                    value,
                    enabled,
                } => {
                    let comment = std::mem::take(&mut pending).build();
                    if let Ok(builder) = Property::builder().with_key(key) {
                        self.push_unique(
                            builder
                                .with_value(value)
                                .with_comment(comment)
                                .enabled(enabled)
                                .build(),
                        );
                    }
                }
                _ => {}
            }
        }
        self
    }

    fn push_unique(&mut self, property: Property) {
        if property.is_empty() {
            return;
        }
        if index_of(&self.properties, property.key(), Some(property.value())).is_none() {
            self.properties.push(property);
        }
    }
}

impl From<&Section> for SectionBuilder {
    fn from(section: &Section) -> Self {
        SectionBuilder::from(section.clone())
    }
}

impl From<Section> for SectionBuilder {
    fn from(section: Section) -> Self {
        SectionBuilder {
            name: section.name,
            comment: section.comment,
            enabled: section.enabled,
            properties: section.properties,
        }
    }
}
