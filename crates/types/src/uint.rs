use primitive_types::{U128 as PrimitiveU128, U256 as PrimitiveU256, U512 as PrimitiveU512};

use crate::{Result, TypesError};

pub type U128 = PrimitiveU128;
pub type U256 = PrimitiveU256;
pub type U512 = PrimitiveU512;

/// Big-endian, unsigned-magnitude import and export for the fixed-width
/// big integers.
pub trait UintExt: Sized {
    /// Width of the integer in bytes.
    const BYTES: usize;

    /// Builds the integer from a big-endian magnitude of at most `BYTES` bytes.
    /// An empty slice imports as zero.
    fn from_be_slice(bytes: &[u8]) -> Result<Self>;

    /// Exports the minimal big-endian magnitude. Zero exports as an empty vector.
    fn to_be_bytes_vec(&self) -> Vec<u8>;
}

macro_rules! impl_uint_ext {
    ($ty:ty, $bytes:expr) => {
        impl UintExt for $ty {
            const BYTES: usize = $bytes;

            fn from_be_slice(bytes: &[u8]) -> Result<Self> {
                if bytes.len() > $bytes {
                    return Err(TypesError::InvalidLength {
                        expected: $bytes,
                        actual: bytes.len(),
                    });
                }
                Ok(<$ty>::from_big_endian(bytes))
            }

            fn to_be_bytes_vec(&self) -> Vec<u8> {
                let mut bytes = [0u8; $bytes];
                self.to_big_endian(&mut bytes);

                match bytes.iter().position(|&b| b != 0) {
                    Some(first_non_zero) => bytes[first_non_zero..].to_vec(),
                    None => Vec::new(),
                }
            }
        }
    };
}

impl_uint_ext!(U128, 16);
impl_uint_ext!(U256, 32);
impl_uint_ext!(U512, 64);
