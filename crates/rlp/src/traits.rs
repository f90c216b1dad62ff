use rlp_types::{Bytes, UintExt, U128, U256, U512};

use crate::encode::trim_leading_zeros;
use crate::{DecoderError, EncoderError, RlpBuffer, RlpItem};

pub trait Encodable {
    fn rlp_append(&self, out: &mut RlpBuffer) -> Result<(), EncoderError>;
}

pub trait Decodable: Sized {
    fn decode(item: &RlpItem<'_>) -> Result<Self, DecoderError>;
}

/// Encodes a borrowed slice as a nested list.
///
/// `Vec<u8>` and `[u8]` already mean byte strings, so lists of encodable
/// values go through this wrapper.
#[derive(Debug, Clone, Copy)]
pub struct List<'a, T>(pub &'a [T]);

/// Payload of a non-list item.
pub(crate) fn data_payload<'a>(item: &RlpItem<'a>) -> Result<&'a [u8], DecoderError> {
    if item.is_list() {
        return Err(DecoderError::TypeMismatch {
            expected: "data",
            found: "list",
        });
    }
    item.payload()
}

/// Canonical big-endian magnitude of at most `width` bytes.
fn uint_payload<'a>(item: &RlpItem<'a>, width: usize) -> Result<&'a [u8], DecoderError> {
    let bytes = data_payload(item)?;
    if bytes.len() > width {
        return Err(DecoderError::IntegerOverflow);
    }
    if bytes.len() > 1 && bytes[0] == 0 {
        return Err(DecoderError::LeadingZeros);
    }
    Ok(bytes)
}

macro_rules! impl_uint {
    ($($ty:ty),*) => {$(
        impl Encodable for $ty {
            fn rlp_append(&self, out: &mut RlpBuffer) -> Result<(), EncoderError> {
                out.append_data(trim_leading_zeros(&self.to_be_bytes()))
            }
        }

        impl Decodable for $ty {
            fn decode(item: &RlpItem<'_>) -> Result<Self, DecoderError> {
                const WIDTH: usize = std::mem::size_of::<$ty>();
                let bytes = uint_payload(item, WIDTH)?;
                let mut array = [0u8; WIDTH];
                array[WIDTH - bytes.len()..].copy_from_slice(bytes);
                Ok(<$ty>::from_be_bytes(array))
            }
        }
    )*};
}

impl_uint!(u8, u16, u32, u64, u128, usize);

macro_rules! impl_big_uint {
    ($($ty:ty),*) => {$(
        impl Encodable for $ty {
            fn rlp_append(&self, out: &mut RlpBuffer) -> Result<(), EncoderError> {
                out.append_data(&self.to_be_bytes_vec())
            }
        }

        impl Decodable for $ty {
            fn decode(item: &RlpItem<'_>) -> Result<Self, DecoderError> {
                let bytes = uint_payload(item, <$ty as UintExt>::BYTES)?;
                <$ty>::from_be_slice(bytes).map_err(|_| DecoderError::IntegerOverflow)
            }
        }
    )*};
}

impl_big_uint!(U128, U256, U512);

impl Encodable for bool {
    fn rlp_append(&self, out: &mut RlpBuffer) -> Result<(), EncoderError> {
        (*self as u8).rlp_append(out)
    }
}

impl Decodable for bool {
    fn decode(item: &RlpItem<'_>) -> Result<Self, DecoderError> {
        match u8::decode(item)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(DecoderError::InvalidData(format!("Invalid boolean value {}", other))),
        }
    }
}

impl Encodable for [u8] {
    fn rlp_append(&self, out: &mut RlpBuffer) -> Result<(), EncoderError> {
        out.append_data(self)
    }
}

impl Encodable for Vec<u8> {
    fn rlp_append(&self, out: &mut RlpBuffer) -> Result<(), EncoderError> {
        out.append_data(self)
    }
}

impl Decodable for Vec<u8> {
    fn decode(item: &RlpItem<'_>) -> Result<Self, DecoderError> {
        Ok(data_payload(item)?.to_vec())
    }
}

impl Encodable for Bytes {
    fn rlp_append(&self, out: &mut RlpBuffer) -> Result<(), EncoderError> {
        out.append_data(self.as_slice())
    }
}

impl Decodable for Bytes {
    fn decode(item: &RlpItem<'_>) -> Result<Self, DecoderError> {
        Ok(Bytes::from_slice(data_payload(item)?))
    }
}

/// A `0x` prefix marks hex digits, which are encoded as the bytes they spell.
/// Anything else, including a prefix followed by non-hex text, is encoded as
/// the raw characters after the prefix.
impl Encodable for str {
    fn rlp_append(&self, out: &mut RlpBuffer) -> Result<(), EncoderError> {
        match self.strip_prefix("0x") {
            Some(digits) => match hex::decode(digits) {
                Ok(bytes) => out.append_data(&bytes),
                Err(e) => {
                    tracing::debug!(error = %e, "encoding 0x-prefixed string as text");
                    out.append_data(digits.as_bytes())
                }
            },
            None => out.append_data(self.as_bytes()),
        }
    }
}

impl Encodable for String {
    fn rlp_append(&self, out: &mut RlpBuffer) -> Result<(), EncoderError> {
        self.as_str().rlp_append(out)
    }
}

impl Decodable for String {
    fn decode(item: &RlpItem<'_>) -> Result<Self, DecoderError> {
        let bytes = data_payload(item)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecoderError::InvalidUtf8)
    }
}

impl<T: Encodable> Encodable for List<'_, T> {
    fn rlp_append(&self, out: &mut RlpBuffer) -> Result<(), EncoderError> {
        out.putl(self.0.iter())?;
        Ok(())
    }
}

impl<T: Encodable + ?Sized> Encodable for &T {
    fn rlp_append(&self, out: &mut RlpBuffer) -> Result<(), EncoderError> {
        (**self).rlp_append(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode, encode};

    #[test]
    fn test_uint_minimal_encoding() {
        assert_eq!(encode(&0u64).unwrap(), vec![0x80]);
        assert_eq!(encode(&0x41u8).unwrap(), vec![0x41]);
        assert_eq!(encode(&0x80u16).unwrap(), vec![0x81, 0x80]);
        assert_eq!(encode(&0x0400u32).unwrap(), vec![0x82, 0x04, 0x00]);
        assert_eq!(
            encode(&u64::MAX).unwrap(),
            vec![0x88, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    fn test_uint_decode() {
        assert_eq!(decode::<u64>(&[0x80]).unwrap(), 0);
        assert_eq!(decode::<u8>(&[0x41]).unwrap(), 0x41);
        assert_eq!(decode::<u32>(&[0x82, 0x04, 0x00]).unwrap(), 0x0400);
        assert_eq!(RlpItem::empty().as_val::<u64>().unwrap(), 0);
    }

    #[test]
    fn test_uint_overflow() {
        assert_eq!(decode::<u8>(&[0x82, 0x01, 0x00]), Err(DecoderError::IntegerOverflow));
        assert!(decode::<u16>(&[0x82, 0x01, 0x00]).is_ok());
    }

    #[test]
    fn test_uint_leading_zeros() {
        assert_eq!(decode::<u32>(&[0x82, 0x00, 0x01]), Err(DecoderError::LeadingZeros));
    }

    #[test]
    fn test_uint_from_list_is_mismatch() {
        assert!(matches!(
            decode::<u64>(&[0xc1, 0x01]),
            Err(DecoderError::TypeMismatch { expected: "data", found: "list" })
        ));
    }

    #[test]
    fn test_big_uint() {
        let value = U256::from(1u64) << 200;
        let encoded = encode(&value).unwrap();
        assert_eq!(encoded[0], 0x80 + 26);
        assert_eq!(decode::<U256>(&encoded).unwrap(), value);
        assert_eq!(encode(&U512::zero()).unwrap(), vec![0x80]);
        assert_eq!(decode::<U128>(&encoded), Err(DecoderError::IntegerOverflow));
    }

    #[test]
    fn test_bool() {
        assert_eq!(encode(&true).unwrap(), vec![0x01]);
        assert_eq!(encode(&false).unwrap(), vec![0x80]);
        assert!(!decode::<bool>(&[0x80]).unwrap());
        assert!(decode::<bool>(&[0x02]).is_err());
    }

    #[test]
    fn test_hex_prefixed_string() {
        assert_eq!(encode("0xabcd").unwrap(), encode(&[0xabu8, 0xcd][..]).unwrap());
        assert_eq!(encode("abcd").unwrap(), vec![0x84, b'a', b'b', b'c', b'd']);
        assert_eq!(encode("0x").unwrap(), vec![0x80]);
    }

    #[test]
    fn test_hex_prefix_with_invalid_digits() {
        assert_eq!(encode("0xzz").unwrap(), vec![0x82, b'z', b'z']);
    }

    #[test]
    fn test_string_decode() {
        assert_eq!(decode::<String>(&[0x41]).unwrap(), "A");
        assert_eq!(decode::<String>(&[0x83, b'd', b'o', b'g']).unwrap(), "dog");
        assert_eq!(decode::<String>(&[0x81, 0xff]), Err(DecoderError::InvalidUtf8));
    }

    #[test]
    fn test_bytes_roundtrip() {
        let bytes = Bytes::from_slice(&[0xde, 0xad, 0xbe, 0xef]);
        let encoded = encode(&bytes).unwrap();
        assert_eq!(encoded, vec![0x84, 0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(decode::<Bytes>(&encoded).unwrap(), bytes);
        assert_eq!(decode::<Vec<u8>>(&encoded).unwrap(), bytes.into_vec());
    }

    #[test]
    fn test_nested_list_wrapper() {
        let empty: [u8; 0] = [];
        let encoded = encode(&List(&[List(&empty[..]), List(&[1u8][..]), List(&[2u8, 3][..])])).unwrap();
        assert_eq!(encoded, vec![0xc6, 0xc0, 0xc1, 0x01, 0xc2, 0x02, 0x03]);
    }
}
