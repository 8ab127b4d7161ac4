//! # lexicon-reader
//!
//! A reader for compiled word lists ("lexicons"): compact binary programs of
//! macros and subroutines that expand into the words they encode. Answers
//! exact membership queries and enumerates the encoded words.
//!
//! Also provides the collation pieces word games need: codepoint-exact
//! string ordering, and an accent metadata codec that lets accented words
//! sort next to their unaccented forms while staying exactly reconstructible.
pub mod collation;
pub mod lexicon;

// Re-export the main types for convenience
pub use collation::{
    AccentCodec,
    SortingInfo,
    SortingTable,
    Subword,
    Word,
    WordComparator,
    apply_es_metadata,
    extract_es_metadata,
};
pub use lexicon::{
    ByteCursor,
    DecodeOptions,
    LexiconError,
    LexiconHeader,
    LexiconWriter,
    Macro,
    Result,
    WordList,
    Words,
};
