//! Word comparison and accent metadata.
//!
//! - [`codepoint`]: exact, locale-independent string ordering
//! - [`accents`]: diacritic group tables and the mixed-radix metadata codec
//! - [`word`]: the subword model and the primary/secondary/tertiary word ordering

pub mod accents;
pub mod codepoint;
pub mod word;

pub use accents::{
    AccentCodec, SortingInfo, SortingTable, SPANISH_GROUPS, apply_es_metadata, extract_es_metadata,
};
pub use word::{Subword, Word, WordComparator, compare_words};
