//! # Lexicon Message Parsing
//!
//! Turns the raw compiled buffer into its three parts: display metadata,
//! the macro table and the instruction program. No validation of macro
//! references happens here; that is the job of [`crate::lexicon::program`].
//!
//! ```text
//! Lexicon {
//!   1: name         (LEN, UTF-8)
//!   2: description  (LEN, UTF-8)
//!   3: macros       (LEN, repeated Macro)
//!   4: instructions (LEN packed / VARINT repeated)
//! }
//! Macro (oneof, last wins) {
//!   1: clear        (VARINT or LEN, payload ignored)
//!   2: subword      (LEN, UTF-8)
//!   3: subroutine   (LEN packed / VARINT repeated)
//! }
//! ```

use log::{debug, trace};

use crate::lexicon::cursor::ByteCursor;
use crate::lexicon::types::error::{LexiconError, Result};
use crate::lexicon::types::models::{DecodeOptions, LexiconHeader, Macro, WireType};
use super::fields;

pub const FIELD_NAME: u64 = 1;
pub const FIELD_DESCRIPTION: u64 = 2;
pub const FIELD_MACRO: u64 = 3;
pub const FIELD_INSTRUCTIONS: u64 = 4;

pub const MACRO_FIELD_CLEAR: u64 = 1;
pub const MACRO_FIELD_SUBWORD: u64 = 2;
pub const MACRO_FIELD_SUBROUTINE: u64 = 3;

/// The undecoded parts of a compiled lexicon.
#[derive(Debug, Default)]
pub struct RawLexicon {
    pub header: LexiconHeader,
    pub macros: Vec<Macro>,
    pub program: Vec<usize>,
}

/// Parses a complete lexicon message.
pub fn parse(bytes: &[u8], options: &DecodeOptions) -> Result<RawLexicon> {
    DecodeOptions::check(options.max_buffer_len, "buffer length", bytes.len())?;

    let mut cursor = ByteCursor::new(bytes);
    let mut raw = RawLexicon::default();

    while !cursor.at_end() {
        let key = fields::read_key(&mut cursor)?;
        trace!("Lexicon field {} ({:?}) at offset {}", key.number, key.wire_type, cursor.offset());
        match (key.number, key.wire_type) {
            (FIELD_NAME, WireType::Len) => {
                raw.header.name = fields::read_string(&mut cursor)?;
            }
            (FIELD_DESCRIPTION, WireType::Len) => {
                raw.header.description = Some(fields::read_string(&mut cursor)?);
            }
            (FIELD_MACRO, WireType::Len) => {
                let index = raw.macros.len();
                DecodeOptions::check(options.max_macros, "macro count", index + 1)?;
                let message = fields::read_nested(&mut cursor)?;
                raw.macros.push(parse_macro(message, index)?);
            }
            (FIELD_INSTRUCTIONS, wire_type) => {
                fields::read_indices(&mut cursor, wire_type, &mut raw.program)?;
                let found = raw.program.len();
                DecodeOptions::check(options.max_instructions, "instruction count", found)?;
            }
            (FIELD_NAME | FIELD_DESCRIPTION | FIELD_MACRO, wire_type) => {
                return Err(LexiconError::InvalidFormat(format!(
                    "Field {} has wire type {:?}, expected Len",
                    key.number, wire_type
                )));
            }
            _ => fields::skip_field(&mut cursor, key)?,
        }
    }

    debug!(
        "Parsed lexicon '{}': {} macros, {} instructions",
        raw.header.name,
        raw.macros.len(),
        raw.program.len()
    );
    Ok(raw)
}

/// Parses one embedded `Macro` message from a cursor bounded to its payload.
fn parse_macro(mut cursor: ByteCursor<'_>, index: usize) -> Result<Macro> {
    let base_offset = cursor.offset();
    let mut parsed: Option<Macro> = None;

    while !cursor.at_end() {
        let key = fields::read_key(&mut cursor)?;
        match (key.number, key.wire_type) {
            (MACRO_FIELD_CLEAR, WireType::Varint | WireType::Len) => {
                fields::skip_field(&mut cursor, key)?;
                parsed = Some(Macro::Clear);
            }
            (MACRO_FIELD_SUBWORD, WireType::Len) => {
                let text = fields::read_string(&mut cursor)?;
                parsed = Some(Macro::Subword(text));
            }
            (MACRO_FIELD_SUBROUTINE, wire_type) => {
                // Repeated fields merge, but switching variants starts a fresh list.
                let mut refs = match parsed.take() {
                    Some(Macro::Subroutine(refs)) => refs,
                    _ => Vec::new(),
                };
                fields::read_indices(&mut cursor, wire_type, &mut refs)?;
                parsed = Some(Macro::Subroutine(refs));
            }
            (MACRO_FIELD_CLEAR | MACRO_FIELD_SUBWORD, wire_type) => {
                return Err(LexiconError::InvalidFormat(format!(
                    "Macro {} field {} has unexpected wire type {:?}",
                    index, key.number, wire_type
                )));
            }
            _ => fields::skip_field(&mut cursor, key)?,
        }
    }

    let parsed = parsed.ok_or_else(|| {
        LexiconError::InvalidFormat(format!(
            "Macro {} at offset {} has no clear, subword or subroutine field",
            index, base_offset
        ))
    })?;
    trace!("Macro {}: {}", index, parsed.kind());
    Ok(parsed)
}
