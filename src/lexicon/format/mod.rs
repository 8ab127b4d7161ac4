//! Wire format layer for compiled lexicons.
//!
//! This module bridges the raw byte buffer and the high-level
//! [`WordList`](crate::lexicon::reader::WordList).
//!
//! # Module Organization
//!
//! - [`fields`]: field keys, length-delimited payloads, unknown-field skipping
//! - [`lexicon`]: parses the top-level message and the embedded macros
//! - [`writer`]: serializes a macro table and program back to bytes

pub mod fields;
pub mod lexicon;
pub mod writer;
