//! Custom error types for the lexicon-reader crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum LexiconError {
    /// An error originating from I/O operations (only the inspector binary reads files).
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// A read or advance would move the cursor past the end of the buffer,
    /// or past the end of the enclosing message for nested fields.
    #[error("Out of bounds: {requested} byte(s) requested at offset {offset}, data ends at {len}")]
    OutOfBounds {
        offset: usize,
        requested: usize,
        /// Absolute offset where readable data ends.
        len: usize,
    },

    /// The data is structurally invalid: overlong varint, bad wire type, missing macro variant.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A text field does not hold valid UTF-8.
    #[error("Invalid UTF-8 text at offset {offset}: {source}")]
    InvalidUtf8 {
        offset: usize,
        #[source]
        source: std::str::Utf8Error,
    },

    /// A macro or instruction refers to an index outside the macro table.
    #[error("Invalid macro reference from {from}: index {target} outside {table_len} macros")]
    InvalidReference {
        from: String,
        target: usize,
        table_len: usize,
    },

    /// The subroutine graph contains a cycle, so the program would never terminate.
    #[error("Cyclic reference through macro {macro_index} (path: {path:?})")]
    CyclicReference {
        macro_index: usize,
        path: Vec<usize>,
    },

    /// Accent metadata encodes more choices than the base word has accentable letters.
    #[error("Metadata out of range for base word '{base_word}': remainder {remainder} left")]
    MetadataOutOfRange {
        base_word: String,
        remainder: String,
    },

    /// A caller-imposed decode limit was exceeded.
    #[error("Limit exceeded for {limit}: maximum {max}, found {found}")]
    LimitExceeded {
        limit: &'static str,
        max: usize,
        found: usize,
    },

    /// A diacritic group table is malformed.
    #[error("Invalid accent group: {0}")]
    InvalidAccentGroup(String),
}

/// A convenience `Result` type alias using the crate's `LexiconError` type.
pub type Result<T> = std::result::Result<T, LexiconError>;
