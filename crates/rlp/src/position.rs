//! Header classification shared by [`RlpItem`](crate::RlpItem) and
//! [`RlpIterator`](crate::RlpIterator).

use crate::DecoderError;

/// Largest payload that fits in a single-byte header.
pub const SHORT_LENGTH_LIMIT: usize = 56;

pub const STRING_OFFSET: u8 = 0x80;
pub const LONG_STRING_OFFSET: u8 = 0xb7;
pub const LIST_OFFSET: u8 = 0xc0;
pub const LONG_LIST_OFFSET: u8 = 0xf7;

/// Header and payload extent of the item starting at the first byte of a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Header length; the payload starts here.
    pub offset: usize,
    /// Payload length.
    pub length: usize,
}

impl Position {
    pub fn new(offset: usize, length: usize) -> Self {
        Position { offset, length }
    }

    /// Header plus payload.
    pub fn total(&self) -> usize {
        self.offset + self.length
    }
}

/// Computes the position of the item starting at `bytes[0]`.
///
/// An empty slice is the empty item and yields `(0, 0)`. Every other case
/// checks that header and payload fit inside `bytes`.
pub fn position(bytes: &[u8]) -> Result<Position, DecoderError> {
    let prefix = match bytes.first() {
        Some(&prefix) => prefix,
        None => return Ok(Position::default()),
    };

    let pos = match prefix {
        0x00..=0x7f => Position::new(0, 1),
        0x80..=0xb7 => Position::new(1, (prefix - STRING_OFFSET) as usize),
        0xb8..=0xbf => long_position(bytes, (prefix - LONG_STRING_OFFSET) as usize)?,
        0xc0..=0xf7 => Position::new(1, (prefix - LIST_OFFSET) as usize),
        0xf8..=0xff => long_position(bytes, (prefix - LONG_LIST_OFFSET) as usize)?,
    };

    let needed = pos
        .offset
        .checked_add(pos.length)
        .ok_or(DecoderError::IntegerOverflow)?;
    if needed > bytes.len() {
        tracing::debug!(prefix, needed, available = bytes.len(), "truncated rlp item");
        return Err(DecoderError::Truncated {
            needed,
            available: bytes.len(),
        });
    }

    Ok(pos)
}

fn long_position(bytes: &[u8], len_of_len: usize) -> Result<Position, DecoderError> {
    let header = 1 + len_of_len;
    if bytes.len() < header {
        return Err(DecoderError::Truncated {
            needed: header,
            available: bytes.len(),
        });
    }

    let length = decode_length(&bytes[1..header])?;
    if length < SHORT_LENGTH_LIMIT {
        return Err(DecoderError::NonCanonicalLength(length));
    }

    Ok(Position::new(header, length))
}

/// Big-endian length field of a long-form header.
fn decode_length(bytes: &[u8]) -> Result<usize, DecoderError> {
    if bytes[0] == 0 {
        return Err(DecoderError::LeadingZeros);
    }

    let mut len = 0usize;
    for &byte in bytes {
        len = len
            .checked_mul(256)
            .and_then(|l| l.checked_add(byte as usize))
            .ok_or(DecoderError::IntegerOverflow)?;
    }

    Ok(len)
}
