use std::collections::HashSet;

use log::info;

use super::format;
use super::iter::Words;
use super::program;
use super::types::error::Result;
use super::types::models::{DecodeOptions, LexiconHeader, Macro};

/// A decoded, validated and fully materialized lexicon.
///
/// Construction does all the work: it parses the buffer, rejects invalid
/// references and cyclic subroutines, expands the program and indexes the
/// resulting words. Afterwards the value is immutable, so it is `Send + Sync`
/// and can be queried from many threads without locking.
#[derive(Debug, Clone)]
pub struct WordList {
    pub header: LexiconHeader,

    macros: Vec<Macro>,
    program: Vec<usize>,
    words: Vec<String>,
    index: HashSet<String>,
}

impl WordList {
    /// Decodes a compiled lexicon buffer with no limits.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The buffer ends in the middle of a field (`OutOfBounds`)
    /// - A field is malformed or a varint exceeds 53 bits (`InvalidFormat`, `InvalidUtf8`)
    /// - A macro reference points outside the table (`InvalidReference`)
    /// - The subroutine graph contains a cycle (`CyclicReference`)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(bytes, &DecodeOptions::default())
    }

    /// Decodes a compiled lexicon buffer, enforcing the limits in `options`.
    pub fn from_bytes_with_options(bytes: &[u8], options: &DecodeOptions) -> Result<Self> {
        info!("Decoding lexicon ({} bytes)", bytes.len());
        let raw = format::lexicon::parse(bytes, options)?;
        Self::build(raw.header, raw.macros, raw.program, options)
    }

    /// Builds a word list from an already decoded macro table and program.
    pub fn from_parts(
        header: LexiconHeader,
        macros: Vec<Macro>,
        program: Vec<usize>,
    ) -> Result<Self> {
        Self::build(header, macros, program, &DecodeOptions::default())
    }

    fn build(
        header: LexiconHeader,
        macros: Vec<Macro>,
        program: Vec<usize>,
        options: &DecodeOptions,
    ) -> Result<Self> {
        DecodeOptions::check(options.max_macros, "macro count", macros.len())?;
        DecodeOptions::check(options.max_instructions, "instruction count", program.len())?;

        let words = program::run(&macros, &program, options)?;
        let index: HashSet<String> = words.iter().cloned().collect();

        info!(
            "Lexicon '{}' loaded: {} macros, {} instructions, {} words ({} distinct)",
            header.name,
            macros.len(),
            program.len(),
            words.len(),
            index.len()
        );

        Ok(Self {
            header,
            macros,
            program,
            words,
            index,
        })
    }

    pub fn name(&self) -> &str {
        &self.header.name
    }

    pub fn description(&self) -> Option<&str> {
        self.header.description.as_deref()
    }

    /// Returns true iff `text` is exactly one of the encoded words.
    ///
    /// Comparison is case-sensitive and codepoint-exact; prefixes and
    /// extensions of a word do not match.
    pub fn has(&self, text: &str) -> bool {
        self.index.contains(text)
    }

    /// Iterates over the words in program emission order, duplicates included.
    ///
    /// Each call starts a fresh pass.
    pub fn iter(&self) -> Words<'_> {
        Words::new(&self.words)
    }

    /// Number of emitted words, duplicates included.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of distinct words.
    pub fn distinct_len(&self) -> usize {
        self.index.len()
    }

    pub fn macros(&self) -> &[Macro] {
        &self.macros
    }

    pub fn program(&self) -> &[usize] {
        &self.program
    }
}

impl<'a> IntoIterator for &'a WordList {
    type Item = &'a str;
    type IntoIter = Words<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
