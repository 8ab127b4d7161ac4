//! # Accent Metadata Codec
//!
//! Splits a word into an accent-free base spelling plus one integer that
//! records which variant of every accentable letter was used, and rebuilds
//! the word from that pair.
//!
//! ## Encoding
//! Letters are looked up in a table of "sorts together" groups such as
//! `[u, ú, ü]`. Scanning left to right, each matched letter folds its
//! position in its group into the metadata as a mixed-radix digit:
//!
//! ```text
//! metadata = metadata * group_size + index_in_group
//! ```
//!
//! Decoding walks the base word right to left and peels digits off with
//! `%` and `/`. Letters outside the table never consume a digit. The value
//! is a [`BigUint`], so long words with many accents cannot overflow.

use std::collections::HashMap;
use std::sync::Arc;

use log::trace;
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use once_cell::sync::Lazy;

use crate::lexicon::types::error::{LexiconError, Result};

/// Spanish vowels and their accented forms. `ñ` is a letter of its own and
/// is deliberately absent.
pub const SPANISH_GROUPS: &[&[&str]] = &[
    &["a", "á"],
    &["e", "é"],
    &["i", "í"],
    &["o", "ó"],
    &["u", "ú", "ü"],
    &["A", "Á"],
    &["E", "É"],
    &["I", "Í"],
    &["O", "Ó"],
    &["U", "Ú", "Ü"],
];

static SPANISH: Lazy<Arc<SortingTable>> =
    Lazy::new(|| Arc::new(SortingTable::from_trusted_groups(SPANISH_GROUPS)));

/// Position of one letter within its group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortingInfo {
    /// First member of the group; the canonical unaccented form.
    pub base_letter: String,
    pub index_in_group: usize,
    pub group_size: usize,
    pub group: Arc<[String]>,
}

impl SortingInfo {
    pub fn is_base(&self) -> bool {
        self.index_in_group == 0
    }
}

/// Lookup table from every group member to its [`SortingInfo`].
#[derive(Debug, Clone, Default)]
pub struct SortingTable {
    entries: HashMap<String, SortingInfo>,
    /// Longest member, in chars. Bounds the longest-match search.
    max_member_chars: usize,
}

impl SortingTable {
    /// Builds a table from groups of codepoint sequences. The first member of
    /// each group is its base letter.
    ///
    /// # Errors
    /// `InvalidAccentGroup` if a group is empty, a member is empty, or a
    /// member appears more than once across all groups.
    pub fn new<G, M>(groups: G) -> Result<Self>
    where
        G: IntoIterator,
        G::Item: IntoIterator<Item = M>,
        M: Into<String>,
    {
        let mut table = Self::default();
        for (position, group) in groups.into_iter().enumerate() {
            let members: Vec<String> = group.into_iter().map(Into::into).collect();
            if members.is_empty() {
                let reason = format!("group {} is empty", position);
                return Err(LexiconError::InvalidAccentGroup(reason));
            }
            if let Some(member) = members.iter().find(|m| m.is_empty()) {
                return Err(LexiconError::InvalidAccentGroup(format!(
                    "group {} has an empty member {:?}",
                    position, member
                )));
            }
            for (i, member) in members.iter().enumerate() {
                if table.entries.contains_key(member) || members[..i].contains(member) {
                    return Err(LexiconError::InvalidAccentGroup(format!(
                        "'{}' appears in more than one place (group {})",
                        member, position
                    )));
                }
            }
            table.insert_group(members);
        }
        trace!("Built sorting table with {} entries", table.entries.len());
        Ok(table)
    }

    /// The built-in Spanish table, shared across the process.
    pub fn spanish() -> Arc<SortingTable> {
        Arc::clone(&*SPANISH)
    }

    fn from_trusted_groups(groups: &[&[&str]]) -> Self {
        let mut table = Self::default();
        for group in groups {
            table.insert_group(group.iter().map(|m| (*m).to_owned()).collect());
        }
        table
    }

    fn insert_group(&mut self, members: Vec<String>) {
        let group: Arc<[String]> = members.into();
        let base_letter = group[0].clone();
        for (index_in_group, member) in group.iter().enumerate() {
            self.max_member_chars = self.max_member_chars.max(member.chars().count());
            self.entries.insert(
                member.clone(),
                SortingInfo {
                    base_letter: base_letter.clone(),
                    index_in_group,
                    group_size: group.len(),
                    group: Arc::clone(&group),
                },
            );
        }
    }

    /// Looks up an exact group member.
    pub fn get(&self, letter: &str) -> Option<&SortingInfo> {
        self.entries.get(letter)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the longest member that prefixes `text`.
    fn longest_match<'t>(&self, text: &'t str) -> Option<(&'t str, &SortingInfo)> {
        let ends: Vec<usize> = text
            .char_indices()
            .take(self.max_member_chars)
            .map(|(i, c)| i + c.len_utf8())
            .collect();
        ends.into_iter()
            .rev()
            .find_map(|end| self.entries.get(&text[..end]).map(|info| (&text[..end], info)))
    }
}

/// Extracts and re-applies accent metadata using one [`SortingTable`].
#[derive(Debug, Clone)]
pub struct AccentCodec {
    table: Arc<SortingTable>,
}

impl AccentCodec {
    pub fn new(table: SortingTable) -> Self {
        Self { table: Arc::new(table) }
    }

    pub fn from_shared(table: Arc<SortingTable>) -> Self {
        Self { table }
    }

    pub fn spanish() -> Self {
        Self::from_shared(SortingTable::spanish())
    }

    pub fn table(&self) -> &Arc<SortingTable> {
        &self.table
    }

    /// Replaces every table letter in `word` by its base letter and returns
    /// the base spelling with the mixed-radix metadata.
    ///
    /// The metadata is zero iff `word` contains no accented variant.
    pub fn extract(&self, word: &str) -> (String, BigUint) {
        let mut base = String::with_capacity(word.len());
        let mut metadata = BigUint::zero();
        let mut rest = word;

        while let Some(c) = rest.chars().next() {
            match self.table.longest_match(rest) {
                Some((matched, info)) => {
                    base.push_str(&info.base_letter);
                    metadata = metadata * info.group_size as u64 + info.index_in_group as u64;
                    rest = &rest[matched.len()..];
                }
                None => {
                    base.push(c);
                    rest = &rest[c.len_utf8()..];
                }
            }
        }

        (base, metadata)
    }

    /// Rebuilds the original word from a base spelling and its metadata.
    ///
    /// Only base letters consume digits; anything else, including accented
    /// group members, is copied unchanged.
    ///
    /// # Errors
    /// `MetadataOutOfRange` if `metadata` encodes more than the base word's
    /// letters can hold.
    pub fn apply(&self, base_word: &str, metadata: &BigUint) -> Result<String> {
        let mut tokens: Vec<(&str, Option<&SortingInfo>)> = Vec::new();
        let mut rest = base_word;
        while let Some(c) = rest.chars().next() {
            match self.table.longest_match(rest) {
                Some((matched, info)) if info.is_base() => {
                    tokens.push((matched, Some(info)));
                    rest = &rest[matched.len()..];
                }
                _ => {
                    let len = c.len_utf8();
                    tokens.push((&rest[..len], None));
                    rest = &rest[len..];
                }
            }
        }

        let mut remaining = metadata.clone();
        let mut pieces: Vec<&str> = Vec::with_capacity(tokens.len());
        for (text, info) in tokens.into_iter().rev() {
            let Some(info) = info else {
                pieces.push(text);
                continue;
            };
            let size = BigUint::from(info.group_size as u64);
            let letter = (&remaining % &size)
                .to_usize()
                .and_then(|digit| info.group.get(digit));
            remaining /= &size;
            let Some(letter) = letter else {
                return Err(LexiconError::MetadataOutOfRange {
                    base_word: base_word.to_owned(),
                    remainder: remaining.to_string(),
                });
            };
            pieces.push(letter.as_str());
        }

        if !remaining.is_zero() {
            return Err(LexiconError::MetadataOutOfRange {
                base_word: base_word.to_owned(),
                remainder: remaining.to_string(),
            });
        }

        pieces.reverse();
        Ok(pieces.concat())
    }
}

/// [`AccentCodec::extract`] with the built-in Spanish table.
pub fn extract_es_metadata(word: &str) -> (String, BigUint) {
    AccentCodec::spanish().extract(word)
}

/// [`AccentCodec::apply`] with the built-in Spanish table.
pub fn apply_es_metadata(base_word: &str, metadata: &BigUint) -> Result<String> {
    AccentCodec::spanish().apply(base_word, metadata)
}
