//! Locale-independent ordering by Unicode scalar value.

use std::char::DecodeUtf16Error;
use std::cmp::Ordering;

/// Compares two strings codepoint by codepoint.
///
/// The first differing codepoint decides by numeric value; a proper prefix
/// sorts before the longer string.
pub fn compare(left: &str, right: &str) -> Ordering {
    left.chars().cmp(right.chars())
}

/// Compares two UTF-16 sequences by codepoint rather than by code unit.
///
/// Surrogate pairs are combined first, so astral-plane characters sort above
/// everything in the Basic Multilingual Plane. An unpaired surrogate is
/// compared by its own code-unit value.
pub fn compare_utf16(left: &[u16], right: &[u16]) -> Ordering {
    let left = char::decode_utf16(left.iter().copied()).map(scalar_value);
    let right = char::decode_utf16(right.iter().copied()).map(scalar_value);
    left.cmp(right)
}

fn scalar_value(decoded: Result<char, DecodeUtf16Error>) -> u32 {
    match decoded {
        Ok(c) => u32::from(c),
        Err(e) => u32::from(e.unpaired_surrogate()),
    }
}

/// Maps an ordering to the conventional `-1 / 0 / 1`.
pub fn sign(ordering: Ordering) -> i8 {
    match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}
