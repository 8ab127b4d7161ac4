//! Iteration over the words of a [`WordList`](crate::WordList).
//!
//! # Example
//! ```
//! # use lexicon_reader::{LexiconWriter, WordList};
//! let bytes = LexiconWriter::from_words("colors", ["blue", "green"]).to_bytes();
//! let list = WordList::from_bytes(&bytes).unwrap();
//! for word in list.iter() {
//!     println!("{}", word);
//! }
//! ```

use std::iter::FusedIterator;
use std::slice;

/// Iterator over words in program emission order.
///
/// Created by [`WordList::iter()`](crate::WordList::iter). Cloning the
/// iterator forks the pass at its current position.
#[derive(Debug, Clone)]
pub struct Words<'a> {
    inner: slice::Iter<'a, String>,
}

impl<'a> Words<'a> {
    pub(super) fn new(words: &'a [String]) -> Self {
        Self { inner: words.iter() }
    }
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(String::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Words<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(String::as_str)
    }
}

impl ExactSizeIterator for Words<'_> {}

impl FusedIterator for Words<'_> {}
