//! Serialization of a macro table and program into the lexicon wire format.
//!
//! The writer does no factoring of its own. Callers either supply a
//! ready-made macro table, or use [`LexiconWriter::from_words`] which spells
//! every word out grapheme by grapheme.

use std::collections::HashMap;

use log::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::lexicon::types::models::{LexiconHeader, Macro, WireType};
use super::lexicon::{
    FIELD_DESCRIPTION, FIELD_INSTRUCTIONS, FIELD_MACRO, FIELD_NAME, MACRO_FIELD_CLEAR,
    MACRO_FIELD_SUBROUTINE, MACRO_FIELD_SUBWORD,
};

/// Encodes `value` as a little-endian base-128 varint.
pub fn encode_varint(mut value: u64, buf: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        } else {
            buf.push(byte | 0x80);
        }
    }
}

/// Builder for compiled lexicon buffers.
#[derive(Debug, Clone, Default)]
pub struct LexiconWriter {
    header: LexiconHeader,
    macros: Vec<Macro>,
    program: Vec<usize>,
}

impl LexiconWriter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            header: LexiconHeader {
                name: name.into(),
                description: None,
            },
            ..Self::default()
        }
    }

    /// Creates a writer around an existing macro table and program.
    pub fn with_program(name: impl Into<String>, macros: Vec<Macro>, program: Vec<usize>) -> Self {
        let mut writer = Self::new(name);
        writer.macros = macros;
        writer.program = program;
        writer
    }

    /// Spells each word out as one `Subword` macro per grapheme, closing every
    /// word with the shared `Clear` macro at index 0. Empty words are skipped.
    pub fn from_words<I, S>(name: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut writer = Self::new(name);
        let clear = writer.push_macro(Macro::Clear);
        let mut subwords: HashMap<String, usize> = HashMap::new();

        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            for grapheme in word.graphemes(true) {
                let index = match subwords.get(grapheme) {
                    Some(&index) => index,
                    None => {
                        let index = writer.push_macro(Macro::Subword(grapheme.to_owned()));
                        subwords.insert(grapheme.to_owned(), index);
                        index
                    }
                };
                writer.push_instruction(index);
            }
            writer.push_instruction(clear);
        }

        debug!(
            "Spelled out word list: {} macros, {} instructions",
            writer.macros.len(),
            writer.program.len()
        );
        writer
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.header.description = Some(description.into());
        self
    }

    /// Appends a macro and returns its table index.
    pub fn push_macro(&mut self, entry: Macro) -> usize {
        self.macros.push(entry);
        self.macros.len() - 1
    }

    pub fn push_instruction(&mut self, macro_index: usize) {
        self.program.push(macro_index);
    }

    pub fn header(&self) -> &LexiconHeader {
        &self.header
    }

    pub fn macros(&self) -> &[Macro] {
        &self.macros
    }

    pub fn program(&self) -> &[usize] {
        &self.program
    }

    /// Serializes the lexicon. Fields are written in field-number order and
    /// repeated indices are always packed.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();

        if !self.header.name.is_empty() {
            write_len_field(&mut buf, FIELD_NAME, self.header.name.as_bytes());
        }
        if let Some(description) = &self.header.description {
            write_len_field(&mut buf, FIELD_DESCRIPTION, description.as_bytes());
        }
        for entry in &self.macros {
            write_len_field(&mut buf, FIELD_MACRO, &encode_macro(entry));
        }
        if !self.program.is_empty() {
            write_len_field(&mut buf, FIELD_INSTRUCTIONS, &pack_indices(&self.program));
        }

        buf
    }
}

fn encode_macro(entry: &Macro) -> Vec<u8> {
    let mut buf = Vec::new();
    match entry {
        Macro::Clear => write_len_field(&mut buf, MACRO_FIELD_CLEAR, &[]),
        Macro::Subword(text) => write_len_field(&mut buf, MACRO_FIELD_SUBWORD, text.as_bytes()),
        Macro::Subroutine(refs) => {
            write_len_field(&mut buf, MACRO_FIELD_SUBROUTINE, &pack_indices(refs))
        }
    }
    buf
}

fn pack_indices(indices: &[usize]) -> Vec<u8> {
    let mut packed = Vec::with_capacity(indices.len());
    for &index in indices {
        encode_varint(index as u64, &mut packed);
    }
    packed
}

/// Writes a field key for `field`.
pub fn write_key(buf: &mut Vec<u8>, field: u64, wire_type: WireType) {
    encode_varint((field << 3) | wire_type.tag(), buf);
}

/// Writes a length-delimited field.
pub fn write_len_field(buf: &mut Vec<u8>, field: u64, payload: &[u8]) {
    write_key(buf, field, WireType::Len);
    encode_varint(payload.len() as u64, buf);
    buf.extend_from_slice(payload);
}
