//! Field-level primitives shared by every message in the lexicon wire format.
//!
//! Each field begins with a varint key `(field_number << 3) | wire_type`.

use log::trace;

use crate::lexicon::cursor::ByteCursor;
use crate::lexicon::types::error::{LexiconError, Result};
use crate::lexicon::types::models::WireType;

/// A decoded field key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldKey {
    pub number: u64,
    pub wire_type: WireType,
}

/// Reads the next field key.
pub fn read_key(cursor: &mut ByteCursor<'_>) -> Result<FieldKey> {
    let start = cursor.offset();
    let raw = cursor.varint()?;
    let wire_type = WireType::try_from(raw & 0x7)?;
    let number = raw >> 3;
    if number == 0 {
        return Err(LexiconError::InvalidFormat(format!(
            "Field number 0 at offset {}",
            start
        )));
    }
    Ok(FieldKey { number, wire_type })
}

/// Reads a length prefix and returns a zero-copy view of the payload.
pub fn read_len_delimited<'a>(cursor: &mut ByteCursor<'a>) -> Result<&'a [u8]> {
    let len = cursor.varint_usize()?;
    cursor.view(len)
}

/// Reads a length prefix and returns a cursor bounded to the payload.
///
/// Offsets reported by the returned cursor stay absolute.
pub fn read_nested<'a>(cursor: &mut ByteCursor<'a>) -> Result<ByteCursor<'a>> {
    let len = cursor.varint_usize()?;
    cursor.take(len)
}

/// Reads a length-delimited UTF-8 string.
pub fn read_string(cursor: &mut ByteCursor<'_>) -> Result<String> {
    let bytes = read_len_delimited(cursor)?;
    let payload_offset = cursor.offset() - bytes.len();
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|source| LexiconError::InvalidUtf8 {
            offset: payload_offset + source.valid_up_to(),
            source,
        })
}

/// Reads macro indices for a repeated field, accepting both encodings:
/// packed (one LEN field holding consecutive varints) and unpacked (one
/// VARINT field per element).
pub fn read_indices(
    cursor: &mut ByteCursor<'_>,
    wire_type: WireType,
    out: &mut Vec<usize>,
) -> Result<()> {
    match wire_type {
        WireType::Varint => {
            out.push(cursor.varint_usize()?);
            Ok(())
        }
        WireType::Len => {
            let mut inner = read_nested(cursor)?;
            let before = out.len();
            while !inner.at_end() {
                out.push(inner.varint_usize()?);
            }
            trace!("Read {} packed indices", out.len() - before);
            Ok(())
        }
        other => Err(LexiconError::InvalidFormat(format!(
            "Expected varint or packed indices, found wire type {:?} at offset {}",
            other,
            cursor.offset()
        ))),
    }
}

/// Skips the payload of a field this reader does not understand.
pub fn skip_field(cursor: &mut ByteCursor<'_>, key: FieldKey) -> Result<()> {
    trace!(
        "Skipping unknown field {} ({:?}) at offset {}",
        key.number,
        key.wire_type,
        cursor.offset()
    );
    match key.wire_type {
        WireType::Varint => {
            cursor.skip_to_next_varint_boundary();
            cursor.byte().map(|_| ())
        }
        WireType::I64 => cursor.skip(8),
        WireType::I32 => cursor.skip(4),
        WireType::Len => read_len_delimited(cursor).map(|_| ()),
    }
}
