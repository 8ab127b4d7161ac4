//! Core data structures for compiled lexicons.
//!
//! This module defines the fundamental types used throughout the library:
//! - The macro table entries and the instruction program
//! - Display metadata carried alongside the program
//! - Wire-level enumerations and caller-imposed decode limits

use super::error::{LexiconError, Result};

/// One entry of the macro table.
///
/// Macros are referenced by their position in the table. A `Subroutine`
/// holds indices rather than nested macros, which keeps the table flat and
/// lets cycle detection work on plain integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Macro {
    /// Word boundary. Closes the word being accumulated.
    Clear,
    /// Literal text appended to the word being accumulated.
    Subword(String),
    /// Expands to the concatenated expansions of the referenced macros, in order.
    Subroutine(Vec<usize>),
}

impl Macro {
    /// Short name used in log and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Macro::Clear => "clear",
            Macro::Subword(_) => "subword",
            Macro::Subroutine(_) => "subroutine",
        }
    }
}

/// User-visible metadata stored next to the program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexiconHeader {
    pub name: String,
    pub description: Option<String>,
}

/// Protobuf wire types understood by the field reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireType {
    Varint,
    I64,
    Len,
    I32,
}

impl WireType {
    pub fn tag(self) -> u64 {
        match self {
            WireType::Varint => 0,
            WireType::I64 => 1,
            WireType::Len => 2,
            WireType::I32 => 5,
        }
    }
}

impl TryFrom<u64> for WireType {
    type Error = LexiconError;
    fn try_from(value: u64) -> Result<Self> {
        match value {
            0 => Ok(Self::Varint),
            1 => Ok(Self::I64),
            2 => Ok(Self::Len),
            5 => Ok(Self::I32),
            3 | 4 => Err(LexiconError::InvalidFormat(format!(
                "Group wire type {} is not supported",
                value
            ))),
            _ => Err(LexiconError::InvalidFormat(format!("Unknown wire type: {}", value))),
        }
    }
}

/// Upper bounds a caller can impose before decoding untrusted input.
///
/// Every limit defaults to `None` (unlimited). The decoder itself only
/// enforces the varint precision ceiling and the cycle check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum size of the compiled buffer, in bytes.
    pub max_buffer_len: Option<usize>,
    /// Maximum number of entries in the macro table.
    pub max_macros: Option<usize>,
    /// Maximum number of top-level program instructions.
    pub max_instructions: Option<usize>,
    /// Maximum expanded size (UTF-8 bytes plus one per word boundary) of any
    /// single macro expansion and of the whole program.
    pub max_expanded_len: Option<usize>,
}

impl DecodeOptions {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_buffer_len(mut self, max: usize) -> Self {
        self.max_buffer_len = Some(max);
        self
    }

    pub fn with_max_macros(mut self, max: usize) -> Self {
        self.max_macros = Some(max);
        self
    }

    pub fn with_max_instructions(mut self, max: usize) -> Self {
        self.max_instructions = Some(max);
        self
    }

    pub fn with_max_expanded_len(mut self, max: usize) -> Self {
        self.max_expanded_len = Some(max);
        self
    }

    /// Fails with `LimitExceeded` if `found` is above the configured maximum.
    pub(crate) fn check(limit: Option<usize>, name: &'static str, found: usize) -> Result<()> {
        match limit {
            Some(max) if found > max => {
                Err(LexiconError::LimitExceeded { limit: name, max, found })
            }
            _ => Ok(()),
        }
    }
}
