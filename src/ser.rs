//! Annotated INI rendering.
//!
//! The [`Serializer`] turns the value model back into text under a set of
//! [`Filters`]. Output is the canonical layout: header block, sections in
//! insertion order (each optionally preceded by its comment, followed by its
//! properties and their comments), footer block. Lines are joined with `\n`
//! and no trailing newline is emitted.
//!
//! ## Disabled cascade
//!
//! A disabled container renders every child disabled, whatever the child's
//! own flag says. With [`Filters::trim_disabled`] the whole disabled subtree
//! disappears. Empty elements never produce output, not even a blank line.
//!
//! ## Usage
//!
//! ```rust
//! use annotini::{from_str, Filters, Serializer};
//!
//! let doc = from_str("[a]\n;note\nk=v");
//!
//! let mut serializer = Serializer::new(Filters::TRIM_COMMENT);
//! serializer.serialize_document(&doc);
//! assert_eq!(serializer.into_inner(), "[a]\nk=v");
//! ```

use crate::affix::{as_disabled, as_section};
use crate::comment::Comment;
use crate::document::Document;
use crate::options::Filters;
use crate::property::Property;
use crate::section::Section;

/// Renders comments, properties, sections and documents.
pub struct Serializer {
    output: String,
    filters: Filters,
}

impl Serializer {
    pub fn new(filters: Filters) -> Self {
        Serializer {
            output: String::with_capacity(256),
            filters,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    pub fn serialize_comment(&mut self, comment: &Comment) {
        let affix = comment.kind().affix();
        for line in comment.lines() {
            self.write_line(&affix.wrap(line));
        }
    }

    pub fn serialize_property(&mut self, property: &Property) {
        self.property(property, false);
    }

    pub fn serialize_section(&mut self, section: &Section) {
        self.section(section, false);
    }

    pub fn serialize_document(&mut self, document: &Document) {
        let filters = self.filters;
        if document.is_empty() || (filters.trim_disabled && !document.is_enabled()) {
            return;
        }

        let separator = if filters.formatted { "\n\n" } else { "\n" };
        let mut blocks: Vec<String> = Vec::with_capacity(3);

        if !filters.trim_header && !document.header().is_empty() {
            blocks.push(comment_to_string(document.header()));
        }

        let sections: Vec<String> = document
            .sections()
            .iter()
            .map(|s| section_to_string(s, &filters, !document.is_enabled()))
            .filter(|s| !s.is_empty())
            .collect();
        if !sections.is_empty() {
            blocks.push(sections.join(separator));
        }

        if !filters.trim_footer && !document.footer().is_empty() {
            blocks.push(comment_to_string(document.footer()));
        }

        self.write_line(&blocks.join(separator));
    }

    fn property(&mut self, property: &Property, force_disabled: bool) {
        let enabled = property.is_enabled() && !force_disabled;
        if property.is_empty() || (self.filters.trim_disabled && !enabled) {
            return;
        }

        if !self.filters.trim_comment {
            self.serialize_comment(property.comment());
        }

        let line = format!("{}={}", property.key(), property.value());
        if enabled {
            self.write_line(&line);
        } else {
            self.write_line(&as_disabled(&line));
        }
    }

    fn section(&mut self, section: &Section, force_disabled: bool) {
        let enabled = section.is_enabled() && !force_disabled;
        if section.is_empty() || (self.filters.trim_disabled && !enabled) {
            return;
        }

        if !self.filters.trim_comment {
            self.serialize_comment(section.comment());
        }

        let header = as_section(section.name());
        if enabled {
            self.write_line(&header);
        } else {
            self.write_line(&as_disabled(&header));
        }

        for property in section.properties() {
            self.property(property, !enabled);
        }
    }

    #[inline]
    fn write_line(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        self.output.push_str(line);
    }
}

pub(crate) fn comment_to_string(comment: &Comment) -> String {
    let mut serializer = Serializer::new(Filters::none());
    serializer.serialize_comment(comment);
    serializer.into_inner()
}

pub(crate) fn property_to_string(
    property: &Property,
    filters: &Filters,
    force_disabled: bool,
) -> String {
    let mut serializer = Serializer::new(*filters);
    serializer.property(property, force_disabled);
    serializer.into_inner()
}

pub(crate) fn section_to_string(section: &Section, filters: &Filters, force_disabled: bool) -> String {
    let mut serializer = Serializer::new(*filters);
    serializer.section(section, force_disabled);
    serializer.into_inner()
}

pub(crate) fn document_to_string(document: &Document, filters: &Filters) -> String {
    let mut serializer = Serializer::new(*filters);
    serializer.serialize_document(document);
    serializer.into_inner()
}
