//! Error types for annotated INI building and persistence.
//!
//! Most operations in this crate are deliberately lenient: parsing drops lines
//! it does not recognize, read helpers return empty values for missing files,
//! and builder removals are no-ops when the target is absent. Errors are
//! reserved for the few cases a caller must handle.
//!
//! ## Error Categories
//!
//! - **Validation Errors**: a blank property key or section name
//! - **Path Errors**: a write destination that cannot be used, reported before any I/O
//! - **I/O Errors**: failures while writing or atomically replacing a file
//! - **Encoding Errors**: byte input that is not valid UTF-8
//!
//! ## Examples
//!
//! ```rust
//! use annotini::{Error, Property};
//!
//! let result = Property::builder().with_key("   ");
//! assert!(matches!(result, Err(Error::InvalidKey)));
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Represents all errors that can be returned by this crate.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// A property key was empty or whitespace only.
    #[error("A property's key cannot be empty or whitespace")]
    InvalidKey,

    /// A section name was empty or whitespace only.
    #[error("Section name cannot be empty or whitespace")]
    InvalidSectionName,

    /// The destination path of a write operation is unusable.
    #[error("Please enter a valid file path: {}", path.display())]
    InvalidPath { path: PathBuf },

    /// IO error during writing or replacing a file
    #[error("IO error at {}: {msg}", path.display())]
    Io { path: PathBuf, msg: String },

    /// Input bytes were not valid UTF-8
    #[error("Invalid UTF-8 input: {0}")]
    Utf8(String),
}

impl Error {
    /// Creates an I/O error tied to the file it happened on.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use annotini::Error;
    ///
    /// let source = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
    /// let err = Error::io("settings.ini", source);
    /// assert!(err.to_string().contains("settings.ini"));
    /// ```
    pub fn io(path: impl AsRef<Path>, source: impl fmt::Display) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            msg: source.to_string(),
        }
    }

    /// Creates an invalid path error.
    pub fn invalid_path(path: impl AsRef<Path>) -> Self {
        Error::InvalidPath {
            path: path.as_ref().to_path_buf(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
