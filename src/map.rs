//! Ordered, name-unique storage for sections.
//!
//! [`SectionMap`] wraps an [`IndexMap`] keyed by section name. Insertion
//! order is the order sections are rendered in, and inserting a section under
//! a name that already exists merges the two instead of adding a second
//! entry.
//!
//! ## Examples
//!
//! ```rust
//! use annotini::{Property, Section, SectionMap};
//!
//! let mut map = SectionMap::new();
//! let a1 = Section::builder().with_name("a").unwrap()
//!     .append_property(Property::new("x", "1").unwrap()).build();
//! let a2 = Section::builder().with_name("a").unwrap()
//!     .append_property(Property::new("y", "2").unwrap()).build();
//!
//! map.append(a1);
//! map.append(a2);
//!
//! assert_eq!(map.len(), 1);
//! assert_eq!(map.get("a").map(|s| s.property_count()), Some(2));
//! ```

use crate::section::Section;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Sections in insertion order, unique by name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SectionMap(IndexMap<String, Section>);

impl SectionMap {
    #[must_use]
    pub fn new() -> Self {
        SectionMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        SectionMap(IndexMap::with_capacity(capacity))
    }

    /// Appends `section`, merging it into an existing section of the same
    /// name.
    pub fn append(&mut self, section: Section) {
        match self.0.get_mut(section.name()) {
            Some(existing) => {
                *existing = existing.to_builder().merge(&section).build();
            }
            None => {
                self.0.insert(section.name().to_string(), section);
            }
        }
    }

    /// Replaces the section stored under `section`'s name, keeping its position.
    pub(crate) fn replace(&mut self, section: Section) {
        self.0.insert(section.name().to_string(), section);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Section> {
        self.0.get(name)
    }

    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Section> {
        self.0.get_index(index).map(|(_, s)| s)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Removes the section named `name`, preserving the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<Section> {
        self.0.shift_remove(name)
    }

    /// Removes the section at `index`, preserving the order of the rest.
    pub fn remove_index(&mut self, index: usize) -> Option<Section> {
        self.0.shift_remove_index(index).map(|(_, s)| s)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the sections, in insertion order.
    pub fn iter(&self) -> indexmap::map::Values<'_, String, Section> {
        self.0.values()
    }

    /// Returns an iterator over the section names, in insertion order.
    pub fn names(&self) -> indexmap::map::Keys<'_, String, Section> {
        self.0.keys()
    }
}

impl Serialize for SectionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.values())
    }
}

impl<'a> IntoIterator for &'a SectionMap {
    type Item = &'a Section;
    type IntoIter = indexmap::map::Values<'a, String, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.values()
    }
}

impl IntoIterator for SectionMap {
    type Item = Section;
    type IntoIter = indexmap::map::IntoValues<String, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_values()
    }
}

impl FromIterator<Section> for SectionMap {
    fn from_iter<T: IntoIterator<Item = Section>>(iter: T) -> Self {
        let mut map = SectionMap::new();
        for section in iter {
            map.append(section);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Property;

    fn section(name: &str, key: &str) -> Section {
        Section::builder()
            .with_name(name)
            .unwrap()
            .append_property(Property::new(key, "v").unwrap())
            .build()
    }

    #[test]
    fn test_append_merges_same_name() {
        let map: SectionMap = vec![section("a", "x"), section("b", "x"), section("a", "y")]
            .into_iter()
            .collect();
        let names: Vec<_> = map.names().cloned().collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(map.get("a").map(Section::property_count), Some(2));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut map: SectionMap = vec![section("a", "x"), section("b", "x"), section("c", "x")]
            .into_iter()
            .collect();
        assert!(map.remove("b").is_some());
        assert!(map.remove("zzz").is_none());
        assert!(map.remove_index(9).is_none());
        let names: Vec<_> = map.iter().map(Section::name).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut map: SectionMap = vec![section("a", "x"), section("b", "x")]
            .into_iter()
            .collect();
        map.replace(section("a", "z"));
        assert_eq!(map.get_index(0).map(|s| s.property_at(0).key().to_string()), Some("z".to_string()));
    }
}
