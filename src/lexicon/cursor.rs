//! Bounds-checked sequential reading over an immutable byte buffer.
//!
//! All multi-byte operations work on a scratch position and only commit it
//! once the whole read has succeeded, so a failed call leaves the cursor
//! exactly where it was.

use super::types::error::{LexiconError, Result};

/// Largest integer a varint may decode to (2^53 - 1).
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Number of payload bits allowed in total.
const SAFE_INTEGER_BITS: u32 = 53;

/// Shift at which the next 7-bit group could overflow the safe ceiling.
const OVERFLOW_CHECK_SHIFT: u32 = 49;

/// A non-owning read position into one byte buffer.
///
/// Invariant: `0 <= offset <= bytes.len()`.
#[derive(Debug, Clone, Copy)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    /// Creates a cursor positioned at the start of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// Creates a cursor positioned at `offset`, which may equal the buffer length.
    pub fn at(bytes: &'a [u8], offset: usize) -> Result<Self> {
        if offset > bytes.len() {
            return Err(LexiconError::OutOfBounds {
                offset,
                requested: 0,
                len: bytes.len(),
            });
        }
        Ok(Self { bytes, offset })
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    pub fn at_end(&self) -> bool {
        self.offset == self.bytes.len()
    }

    /// Reads one byte and advances past it.
    pub fn byte(&mut self) -> Result<u8> {
        let byte = *self.bytes.get(self.offset).ok_or_else(|| self.out_of_bounds(1))?;
        self.offset += 1;
        Ok(byte)
    }

    /// Reads a little-endian base-128 varint.
    ///
    /// # Errors
    /// - `OutOfBounds` if the buffer ends before the terminating byte
    /// - `InvalidFormat` if the value would exceed [`MAX_SAFE_INTEGER`]
    pub fn varint(&mut self) -> Result<u64> {
        let mut pos = self.offset;
        let mut value: u64 = 0;
        let mut shift: u32 = 0;

        loop {
            let byte = match self.bytes.get(pos) {
                Some(&b) => b,
                None => return Err(self.out_of_bounds(pos - self.offset + 1)),
            };
            pos += 1;

            let payload = u64::from(byte & 0x7F);
            let more = byte & 0x80 != 0;

            if shift >= OVERFLOW_CHECK_SHIFT
                && (more || payload >> (SAFE_INTEGER_BITS - shift) != 0)
            {
                return Err(LexiconError::InvalidFormat(format!(
                    "Varint at offset {} exceeds the {}-bit safe integer range",
                    self.offset, SAFE_INTEGER_BITS
                )));
            }

            value |= payload << shift;
            if !more {
                self.offset = pos;
                return Ok(value);
            }
            shift += 7;
        }
    }

    /// Reads a varint and converts it to a `usize` index or length.
    pub fn varint_usize(&mut self) -> Result<usize> {
        let start = self.offset;
        let value = self.varint()?;
        usize::try_from(value).map_err(|_| {
            self.offset = start;
            LexiconError::InvalidFormat(format!(
                "Varint {} at offset {} does not fit in usize",
                value, start
            ))
        })
    }

    /// Advances until the cursor rests on a byte whose continuation bit is
    /// clear, or until the end of the buffer.
    ///
    /// The terminating byte itself is not consumed.
    pub fn skip_to_next_varint_boundary(&mut self) {
        while let Some(&byte) = self.bytes.get(self.offset) {
            if byte & 0x80 == 0 {
                break;
            }
            self.offset += 1;
        }
    }

    /// Advances past `n` bytes.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.check_available(n)?;
        self.offset += n;
        Ok(())
    }

    /// Returns the next `n` bytes without copying and advances past them.
    pub fn view(&mut self, n: usize) -> Result<&'a [u8]> {
        self.check_available(n)?;
        let slice = &self.bytes[self.offset..self.offset + n];
        self.offset += n;
        Ok(slice)
    }

    /// Splits off the next `n` bytes as a cursor of their own and advances
    /// past them.
    ///
    /// The returned cursor ends after those `n` bytes but keeps offsets in
    /// the coordinates of the whole buffer, so errors from a nested message
    /// point at the right byte.
    pub fn take(&mut self, n: usize) -> Result<ByteCursor<'a>> {
        self.check_available(n)?;
        let end = self.offset + n;
        let nested = ByteCursor {
            bytes: &self.bytes[..end],
            offset: self.offset,
        };
        self.offset = end;
        Ok(nested)
    }

    fn check_available(&self, n: usize) -> Result<()> {
        if n > self.remaining() {
            return Err(self.out_of_bounds(n));
        }
        Ok(())
    }

    fn out_of_bounds(&self, requested: usize) -> LexiconError {
        LexiconError::OutOfBounds {
            offset: self.offset,
            requested,
            len: self.bytes.len(),
        }
    }
}
