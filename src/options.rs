//! Configuration options for rendering and point writes.
//!
//! - [`Filters`]: what to leave out of rendered text, and whether to space
//!   sections apart
//! - [`WriterOptions`]: behaviour of the single-property rewrite in
//!   [`crate::writer`]
//!
//! ## Examples
//!
//! ```rust
//! use annotini::{from_str, Filters};
//!
//! let doc = from_str(";note\n[a]\nk=v\n#--x=y--#");
//!
//! let filters = Filters::new().with_trim_comment(true).with_trim_disabled(true);
//! assert_eq!(doc.to_string_with_filters(&filters), "[a]\nk=v");
//!
//! assert_eq!(Filters::TRIM_COMMENT | Filters::TRIM_DISABLED, filters);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::BitOr;

/// Shapes rendered output.
///
/// Filters combine with `|`, and the presets below cover the common
/// combinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Filters {
    pub trim_comment: bool,
    pub trim_header: bool,
    pub trim_footer: bool,
    pub trim_disabled: bool,
    /// Separates sections, and the header/footer blocks, with a blank line.
    pub formatted: bool,
}

impl Filters {
    pub const NONE: Filters = Filters {
        trim_comment: false,
        trim_header: false,
        trim_footer: false,
        trim_disabled: false,
        formatted: false,
    };
    pub const TRIM_COMMENT: Filters = Filters {
        trim_comment: true,
        ..Filters::NONE
    };
    pub const TRIM_HEADER: Filters = Filters {
        trim_header: true,
        ..Filters::NONE
    };
    pub const TRIM_FOOTER: Filters = Filters {
        trim_footer: true,
        ..Filters::NONE
    };
    pub const TRIM_DISABLED: Filters = Filters {
        trim_disabled: true,
        ..Filters::NONE
    };
    pub const FORMATTED: Filters = Filters {
        formatted: true,
        ..Filters::NONE
    };
    pub const TRIM_COMMENT_DISABLED: Filters = Filters::TRIM_COMMENT.union(Filters::TRIM_DISABLED);
    pub const TRIM_COMMENT_DISABLED_FORMATTED: Filters =
        Filters::TRIM_COMMENT_DISABLED.union(Filters::FORMATTED);
    pub const TRIM_HEADER_FOOTER: Filters = Filters::TRIM_HEADER.union(Filters::TRIM_FOOTER);
    pub const TRIM_HEADER_FOOTER_FORMATTED: Filters =
        Filters::TRIM_HEADER_FOOTER.union(Filters::FORMATTED);
    pub const TRIM_COMMENT_HEADER_FOOTER: Filters =
        Filters::TRIM_COMMENT.union(Filters::TRIM_HEADER_FOOTER);
    pub const TRIM_COMMENT_HEADER_FOOTER_FORMATTED: Filters =
        Filters::TRIM_COMMENT_HEADER_FOOTER.union(Filters::FORMATTED);
    pub const TRIM_COMMENT_HEADER_FOOTER_DISABLED: Filters =
        Filters::TRIM_COMMENT_HEADER_FOOTER.union(Filters::TRIM_DISABLED);
    pub const TRIM_COMMENT_HEADER_FOOTER_DISABLED_FORMATTED: Filters =
        Filters::TRIM_COMMENT_HEADER_FOOTER_DISABLED.union(Filters::FORMATTED);

    /// Creates filters that keep everything.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use annotini::Filters;
    ///
    /// let filters = Filters::new();
    /// assert!(!filters.trim_comment);
    /// assert!(!filters.formatted);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Alias of [`Filters::new`], reads better at call sites.
    #[must_use]
    pub const fn none() -> Self {
        Filters::NONE
    }

    /// Returns the flags set in either `self` or `other`.
    #[must_use]
    pub const fn union(self, other: Filters) -> Filters {
        Filters {
            trim_comment: self.trim_comment || other.trim_comment,
            trim_header: self.trim_header || other.trim_header,
            trim_footer: self.trim_footer || other.trim_footer,
            trim_disabled: self.trim_disabled || other.trim_disabled,
            formatted: self.formatted || other.formatted,
        }
    }

    /// Returns `true` when every flag set in `other` is also set in `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use annotini::Filters;
    ///
    /// assert!(Filters::TRIM_HEADER_FOOTER.contains(Filters::TRIM_FOOTER));
    /// assert!(!Filters::TRIM_FOOTER.contains(Filters::TRIM_HEADER_FOOTER));
    /// ```
    #[must_use]
    pub const fn contains(&self, other: Filters) -> bool {
        (self.trim_comment || !other.trim_comment)
            && (self.trim_header || !other.trim_header)
            && (self.trim_footer || !other.trim_footer)
            && (self.trim_disabled || !other.trim_disabled)
            && (self.formatted || !other.formatted)
    }

    #[must_use]
    pub fn with_trim_comment(mut self, trim: bool) -> Self {
        self.trim_comment = trim;
        self
    }

    #[must_use]
    pub fn with_trim_header(mut self, trim: bool) -> Self {
        self.trim_header = trim;
        self
    }

    #[must_use]
    pub fn with_trim_footer(mut self, trim: bool) -> Self {
        self.trim_footer = trim;
        self
    }

    #[must_use]
    pub fn with_trim_disabled(mut self, trim: bool) -> Self {
        self.trim_disabled = trim;
        self
    }

    #[must_use]
    pub fn with_formatted(mut self, formatted: bool) -> Self {
        self.formatted = formatted;
        self
    }
}

impl BitOr for Filters {
    type Output = Filters;

    fn bitor(self, rhs: Filters) -> Filters {
        self.union(rhs)
    }
}

/// Lines held in memory before the point writer appends them to its temp file.
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

/// Configuration for [`crate::write_value`].
///
/// # Examples
///
/// ```rust
/// use annotini::WriterOptions;
///
/// let options = WriterOptions::new().with_update_existing(true).with_cache_capacity(0);
/// assert!(options.update_existing);
/// assert_eq!(options.cache_capacity, 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriterOptions {
    /// Replace a matching property line instead of inserting a second one after it.
    pub update_existing: bool,
    /// Number of lines buffered between appends to the temp file.
    pub cache_capacity: usize,
}

impl Default for WriterOptions {
    fn default() -> Self {
        WriterOptions {
            update_existing: false,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl WriterOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_update_existing(mut self, update: bool) -> Self {
        self.update_existing = update;
        self
    }

    /// Sets the cache size in lines. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity.max(1);
        self
    }
}
