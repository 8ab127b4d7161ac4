//! Words as sequences of subwords, and the accent-aware word ordering.
//!
//! The ordering has three levels:
//! 1. **primary**: subwords compared by base letter, ignoring case and accents;
//!    the first primary difference decides immediately
//! 2. **secondary**: the first difference in accent rank within a group
//! 3. **tertiary**: the first exact-text difference between case variants
//!
//! A word that runs out of subwords first sorts first, whatever the pending
//! secondary or tertiary keys say. Words whose text ties are ordered by
//! their metadata.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::Zero;
use unicode_segmentation::UnicodeSegmentation;

use super::accents::{AccentCodec, SortingTable};
use super::codepoint;
use crate::lexicon::types::error::Result;

/// A fragment of a word, usually one letter, with optional metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subword {
    text: String,
    metadata: Vec<BigUint>,
}

impl Subword {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: Vec::new(),
        }
    }

    pub fn with_metadata(text: impl Into<String>, metadata: Vec<BigUint>) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn metadata(&self) -> &[BigUint] {
        &self.metadata
    }
}

/// An ordered sequence of subwords plus word-level metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Word {
    subwords: Vec<Subword>,
    metadata: Vec<BigUint>,
}

impl Word {
    pub fn new(subwords: Vec<Subword>, metadata: Vec<BigUint>) -> Self {
        Self { subwords, metadata }
    }

    /// Splits `text` into one subword per extended grapheme cluster, so a
    /// letter followed by combining marks stays together.
    pub fn from_text(text: &str) -> Self {
        text.graphemes(true).map(Subword::new).collect()
    }

    /// Builds the word from its accent-free base spelling and stores the
    /// accent metadata as the single word-level metadata value.
    pub fn with_accent_metadata(text: &str, codec: &AccentCodec) -> Self {
        let (base, metadata) = codec.extract(text);
        let mut word = Self::from_text(&base);
        word.metadata.push(metadata);
        word
    }

    /// Inverse of [`Word::with_accent_metadata`]. A word without metadata is
    /// returned as-is.
    pub fn restore(&self, codec: &AccentCodec) -> Result<String> {
        let zero = BigUint::zero();
        let metadata = self.metadata.first().unwrap_or(&zero);
        codec.apply(&self.text(), metadata)
    }

    pub fn subwords(&self) -> &[Subword] {
        &self.subwords
    }

    pub fn metadata(&self) -> &[BigUint] {
        &self.metadata
    }

    /// Concatenated text of all subwords.
    pub fn text(&self) -> String {
        self.subwords.iter().map(Subword::text).collect()
    }

    pub fn len(&self) -> usize {
        self.subwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subwords.is_empty()
    }
}

impl FromIterator<Subword> for Word {
    fn from_iter<I: IntoIterator<Item = Subword>>(iter: I) -> Self {
        Self {
            subwords: iter.into_iter().collect(),
            metadata: Vec::new(),
        }
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for subword in &self.subwords {
            f.write_str(&subword.text)?;
        }
        Ok(())
    }
}

/// Word ordering with an optional shared sorting table.
///
/// Without a table, letters only tie when they are equal ignoring case, so
/// the ordering is case-insensitive first and exact second.
#[derive(Debug, Clone, Default)]
pub struct WordComparator {
    table: Option<Arc<SortingTable>>,
}

impl WordComparator {
    pub fn exact() -> Self {
        Self { table: None }
    }

    pub fn with_table(table: Arc<SortingTable>) -> Self {
        Self { table: Some(table) }
    }

    pub fn spanish() -> Self {
        Self::with_table(SortingTable::spanish())
    }

    pub fn table(&self) -> Option<&SortingTable> {
        self.table.as_deref()
    }

    pub fn compare(&self, left: &Word, right: &Word) -> Ordering {
        compare_words(left, right, self.table())
    }

    /// Compares two plain strings, splitting each into grapheme subwords.
    pub fn compare_text(&self, left: &str, right: &str) -> Ordering {
        compare_subwords(left.graphemes(true), right.graphemes(true), self.table())
    }

    pub fn sort(&self, words: &mut [Word]) {
        words.sort_by(|a, b| self.compare(a, b));
    }
}

/// Compares two words subword by subword.
///
/// When the text ties, metadata decides: first per subword, then at word
/// level. Words built with [`Word::with_accent_metadata`] share their base
/// spelling, so this is where `token` and `tóken` come apart. The result is
/// `Equal` only for words that are equal.
pub fn compare_words(left: &Word, right: &Word, table: Option<&SortingTable>) -> Ordering {
    compare_subwords(
        left.subwords.iter().map(Subword::text),
        right.subwords.iter().map(Subword::text),
        table,
    )
    .then_with(|| {
        let left_meta = left.subwords.iter().map(Subword::metadata);
        let right_meta = right.subwords.iter().map(Subword::metadata);
        left_meta.cmp(right_meta)
    })
    .then_with(|| left.metadata.cmp(&right.metadata))
}

fn compare_subwords<'l, 'r>(
    mut left: impl Iterator<Item = &'l str>,
    mut right: impl Iterator<Item = &'r str>,
    table: Option<&SortingTable>,
) -> Ordering {
    let mut secondary = Ordering::Equal;
    let mut raw = Ordering::Equal;

    loop {
        let (a, b) = match (left.next(), right.next()) {
            (None, None) => return secondary.then(raw),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(a), Some(b)) => (a, b),
        };
        if a == b {
            continue;
        }

        let lower_a = a.to_lowercase();
        let lower_b = b.to_lowercase();
        if lower_a != lower_b {
            let info_a = table.and_then(|t| t.get(&lower_a));
            let info_b = table.and_then(|t| t.get(&lower_b));
            let base_a = info_a.map_or(lower_a.as_str(), |info| info.base_letter.as_str());
            let base_b = info_b.map_or(lower_b.as_str(), |info| info.base_letter.as_str());

            let primary = codepoint::compare(base_a, base_b);
            if primary != Ordering::Equal {
                return primary;
            }
            if secondary == Ordering::Equal
                && let (Some(info_a), Some(info_b)) = (info_a, info_b)
            {
                secondary = info_a.index_in_group.cmp(&info_b.index_in_group);
            }
        } else if secondary == Ordering::Equal && raw == Ordering::Equal {
            raw = codepoint::compare(a, b);
        }
    }
}
