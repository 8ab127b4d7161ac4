//! Core lexicon decoding module.
//!
//! A compiled lexicon is a small program: a table of macros (word
//! boundaries, literal subwords, and subroutines that reuse other macros)
//! plus a list of instructions. Loading runs that program once and keeps the
//! resulting words for membership tests and iteration.

pub mod cursor;
pub mod format;
pub mod iter;
pub mod program;
pub mod reader;
pub mod types;

pub use cursor::{ByteCursor, MAX_SAFE_INTEGER};
pub use format::writer::{LexiconWriter, encode_varint};
pub use iter::Words;
pub use reader::WordList;
pub use types::error::{LexiconError, Result};
pub use types::models::{DecodeOptions, LexiconHeader, Macro};
