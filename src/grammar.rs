//! Annotated INI line grammar
//!
//! This module documents the text format read and written by this library.
//! It contains no code.
//!
//! # Overview
//!
//! A file is a sequence of lines. Every line is classified on its own, after
//! leading and trailing whitespace is removed, and holds exactly one
//! construct. `\n`, `\r\n` and `\r` all end a line. Blank lines carry no
//! meaning and are never written back.
//!
//! # Constructs
//!
//! | Construct | Shape | Example |
//! |-----------|-------|---------|
//! | Header line | `###--text--###` | `###--Generated file--###` |
//! | Footer line | `##--text--##` | `##--end--##` |
//! | Comment line | `;text` or `#text` | `;Given name` |
//! | Section | `[name]` | `[Person]` |
//! | Disabled section | `#--[name]--#` | `#--[Robot]--#` |
//! | Property | `key=value` | `FirstName=Jon` |
//! | Disabled property | `#--key=value--#` | `#--Age=30--#` |
//!
//! ## Precedence
//!
//! Some lines fit more than one shape, so classification is tried in a fixed
//! order and the first match wins:
//!
//! 1. header
//! 2. footer
//! 3. comment
//! 4. section, enabled or disabled
//! 5. property, enabled or disabled
//!
//! Anything else is dropped when parsing.
//!
//! ## Comments
//!
//! A comment line starts with `;` or `#` and:
//!
//! - contains no `=`
//! - does not end with `]`
//! - is not a header, footer or disabled line
//!
//! So `#--note--#` is not a comment (it is a disabled wrapper around `note`,
//! which is neither a section nor a property, and is dropped) and `;a=b` is
//! not a comment either.
//!
//! Comment text is stored without its marker. Duplicate and blank comment
//! lines are collapsed when a comment is built.
//!
//! Comment lines attach to the next section or property:
//!
//! ```text
//! ;People we know        <- comment of [Person]
//! [Person]
//! ;Given name            <- comment of FirstName
//! FirstName=Jon
//! ```
//!
//! Header and footer lines may appear anywhere; they always go to the
//! document's header or footer block and never become pending comments.
//!
//! ## Sections
//!
//! A section name is everything between the brackets, kept verbatim. A
//! blank name does not make a section. Section names are unique within a
//! document: when a name repeats, the later properties merge into the first
//! section with that name, which keeps its position.
//!
//! ## Properties
//!
//! A property splits at its **first** `=`. The value is everything after it,
//! including further `=` signs, and may be empty. The key must be non-empty
//! and contain no whitespace, `[`, `#` or `;`.
//!
//! ```text
//! Url=https://example.com/?a=b   key "Url", value "https://example.com/?a=b"
//! Empty=                         key "Empty", value ""
//! =value                         dropped, empty key
//! ```
//!
//! A property appearing before any section has no owner and is dropped.
//! Within a section, a property with the same key **and** value as an
//! earlier one is a duplicate and is dropped; the same key with a different
//! value is kept.
//!
//! ## Disabled elements
//!
//! Wrapping a section or property line in `#--` and `--#` disables it. Both
//! halves are required. A disabled section disables every property in it
//! when written, whatever their own state:
//!
//! ```text
//! #--[Robot]--#
//! #--Model=3000--#
//! ```
//!
//! # Canonical layout
//!
//! Documents are written back as:
//!
//! 1. header lines
//! 2. for each section in insertion order: its comment lines, the section
//!    line, then for each property its comment lines and the property line
//! 3. footer lines
//!
//! Lines are separated by `\n` with no trailing newline. The
//! [`Filters::formatted`](crate::Filters::formatted) flag adds one blank line
//! between the header, each section and the footer.
//!
//! # Reserved values
//!
//! The key `;_;` marks the empty property and the empty section. It cannot
//! appear in a parsed file because `;` is not allowed in keys, and a line
//! `[;_;]` parses into an empty section that is never written.
