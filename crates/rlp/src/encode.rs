use bytes::BytesMut;

use crate::position::{LIST_OFFSET, LONG_LIST_OFFSET, LONG_STRING_OFFSET, SHORT_LENGTH_LIMIT, STRING_OFFSET};
use crate::traits::Encodable;
use crate::EncoderError;

/// Append-only builder of canonical RLP bytes.
///
/// Every mutator returns the buffer again so calls chain with `?`. A call
/// that fails leaves the buffer exactly as it was.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RlpBuffer {
    buffer: BytesMut,
}

impl RlpBuffer {
    pub fn new() -> Self {
        RlpBuffer {
            buffer: BytesMut::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        RlpBuffer {
            buffer: BytesMut::with_capacity(capacity),
        }
    }

    /// Appends one scalar or list value.
    pub fn put<E: Encodable + ?Sized>(&mut self, value: &E) -> Result<&mut Self, EncoderError> {
        value.rlp_append(self)?;
        Ok(self)
    }

    /// Encodes every element into a fresh buffer and appends the result as
    /// one list.
    pub fn putl<I>(&mut self, values: I) -> Result<&mut Self, EncoderError>
    where
        I: IntoIterator,
        I::Item: Encodable,
    {
        let mut list = RlpBuffer::new();
        for value in values {
            value.rlp_append(&mut list)?;
        }
        self.append_list(&list.buffer)?;
        Ok(self)
    }

    /// Wraps already-encoded items in a list header without re-encoding them.
    pub fn putl_raw(&mut self, raw: &[u8]) -> Result<&mut Self, EncoderError> {
        self.append_list(raw)?;
        Ok(self)
    }

    /// Appends another buffer's bytes verbatim, with no header.
    pub fn concat(&mut self, other: &RlpBuffer) -> Result<&mut Self, EncoderError> {
        self.buffer.extend_from_slice(&other.buffer);
        Ok(self)
    }

    pub fn concat_raw(&mut self, raw: &[u8]) -> Result<&mut Self, EncoderError> {
        self.buffer.extend_from_slice(raw);
        Ok(self)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn out(self) -> Vec<u8> {
        self.buffer.to_vec()
    }

    pub fn freeze(self) -> bytes::Bytes {
        self.buffer.freeze()
    }

    /// Byte-string rule: a lone byte below `0x80` is its own encoding.
    pub(crate) fn append_data(&mut self, bytes: &[u8]) -> Result<(), EncoderError> {
        match bytes {
            [byte] if *byte < STRING_OFFSET => {
                self.buffer.extend_from_slice(bytes);
                Ok(())
            }
            _ => self.append_with_header(bytes, STRING_OFFSET, LONG_STRING_OFFSET),
        }
    }

    pub(crate) fn append_list(&mut self, payload: &[u8]) -> Result<(), EncoderError> {
        self.append_with_header(payload, LIST_OFFSET, LONG_LIST_OFFSET)
    }

    fn append_with_header(&mut self, payload: &[u8], short: u8, long: u8) -> Result<(), EncoderError> {
        let len = payload.len();
        if len < SHORT_LENGTH_LIMIT {
            self.buffer.reserve(1 + len);
            self.buffer.extend_from_slice(&[short + len as u8]);
        } else {
            let len_bytes = encode_length(len);
            let header = (long as usize)
                .checked_add(len_bytes.len())
                .filter(|&h| h <= 0xff)
                .ok_or(EncoderError::LengthOfLengthOverflow(len_bytes.len()))?;
            self.buffer.reserve(1 + len_bytes.len() + len);
            self.buffer.extend_from_slice(&[header as u8]);
            self.buffer.extend_from_slice(&len_bytes);
        }
        self.buffer.extend_from_slice(payload);
        Ok(())
    }
}

impl AsRef<[u8]> for RlpBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.buffer
    }
}

/// Drops leading zero bytes of a big-endian magnitude. Zero becomes empty.
pub(crate) fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

fn encode_length(len: usize) -> Vec<u8> {
    trim_leading_zeros(&len.to_be_bytes()).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_byte_is_unprefixed() {
        let mut buffer = RlpBuffer::new();
        buffer.put(&[0x00u8][..]).unwrap().put(&[0x7fu8][..]).unwrap();
        assert_eq!(buffer.as_slice(), &[0x00, 0x7f]);
    }

    #[test]
    fn test_single_high_byte_gets_header() {
        let mut buffer = RlpBuffer::new();
        buffer.put(&[0x80u8][..]).unwrap();
        assert_eq!(buffer.out(), vec![0x81, 0x80]);
    }

    #[test]
    fn test_empty_data_and_list() {
        let mut buffer = RlpBuffer::new();
        buffer.put(&[][..] as &[u8]).unwrap().putl_raw(&[]).unwrap();
        assert_eq!(buffer.out(), vec![0x80, 0xc0]);
    }

    #[test]
    fn test_string_length_boundary() {
        let mut short = RlpBuffer::new();
        short.put(&[0xaau8; 55][..]).unwrap();
        assert_eq!(short.as_slice()[0], 0xb7);
        assert_eq!(short.len(), 56);

        let mut long = RlpBuffer::new();
        long.put(&[0xaau8; 56][..]).unwrap();
        assert_eq!(&long.as_slice()[..2], &[0xb8, 56]);
        assert_eq!(long.len(), 58);
    }

    #[test]
    fn test_two_byte_length() {
        let mut buffer = RlpBuffer::new();
        buffer.put(&vec![0x01u8; 1024]).unwrap();
        assert_eq!(&buffer.as_slice()[..3], &[0xb9, 0x04, 0x00]);
    }

    #[test]
    fn test_putl_nests() {
        let mut buffer = RlpBuffer::new();
        buffer.putl(["cat", "dog"]).unwrap();
        assert_eq!(
            buffer.out(),
            vec![0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g']
        );
    }

    #[test]
    fn test_long_list_header() {
        let mut buffer = RlpBuffer::new();
        buffer.putl(std::iter::repeat(0x01u8).take(60)).unwrap();
        assert_eq!(&buffer.as_slice()[..2], &[0xf8, 60]);
        assert_eq!(buffer.len(), 62);
    }

    #[test]
    fn test_putl_raw_and_concat() {
        let mut inner = RlpBuffer::new();
        inner.put(&1u8).unwrap().put(&2u8).unwrap();

        let mut wrapped = RlpBuffer::new();
        wrapped.putl_raw(inner.as_slice()).unwrap();
        assert_eq!(wrapped.as_slice(), &[0xc2, 0x01, 0x02]);

        let mut joined = RlpBuffer::new();
        joined.concat(&inner).unwrap().concat_raw(&[0xc0]).unwrap();
        assert_eq!(joined.out(), vec![0x01, 0x02, 0xc0]);
    }

    #[test]
    fn test_clear_and_freeze() {
        let mut buffer = RlpBuffer::with_capacity(8);
        buffer.put(&5u8).unwrap();
        assert!(!buffer.is_empty());
        buffer.clear();
        assert!(buffer.is_empty());
        buffer.put("a").unwrap();
        assert_eq!(&buffer.freeze()[..], b"a");
    }

    #[test]
    fn test_trim_leading_zeros() {
        assert_eq!(trim_leading_zeros(&[0, 0, 1, 0]), &[1, 0]);
        assert!(trim_leading_zeros(&[0, 0]).is_empty());
        assert_eq!(encode_length(56), vec![56]);
        assert_eq!(encode_length(0x0100), vec![0x01, 0x00]);
    }
}
