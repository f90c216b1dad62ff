//! Recursive-Length-Prefix encoding.
//!
//! Decoding is zero-copy: [`RlpItem`] and [`RlpIterator`] are views into the
//! caller's buffer and never outlive it. Encoding goes through [`RlpBuffer`],
//! which only ever produces canonical output.
//!
//! ```
//! use rlp_core::{RlpBuffer, RlpItem};
//!
//! let mut buffer = RlpBuffer::new();
//! buffer.putl(["cat", "dog"]).unwrap();
//! let encoded = buffer.out();
//!
//! let list = RlpItem::new(&encoded);
//! assert_eq!(list.items_size().unwrap(), 2);
//! assert_eq!(list.sub_item(1).unwrap().as_val::<String>().unwrap(), "dog");
//! ```

pub mod encode;
pub mod error;
pub mod item;
pub mod iter;
pub mod position;
pub mod traits;
pub mod value;

pub use encode::RlpBuffer;
pub use error::{DecoderError, EncoderError, Result, RlpError};
pub use item::RlpItem;
pub use iter::RlpIterator;
pub use position::{position, Position};
pub use traits::{Decodable, Encodable, List};
pub use value::{Value, MAX_DEPTH};

/// Encoding of the empty byte string, also the encoding of zero.
pub const NULL_RLP: [u8; 1] = [0x80];
/// Encoding of the empty list.
pub const EMPTY_LIST_RLP: [u8; 1] = [0xc0];

pub fn encode<E: Encodable + ?Sized>(value: &E) -> std::result::Result<Vec<u8>, EncoderError> {
    let mut buffer = RlpBuffer::new();
    buffer.put(value)?;
    Ok(buffer.out())
}

pub fn encode_list<I>(values: I) -> std::result::Result<Vec<u8>, EncoderError>
where
    I: IntoIterator,
    I::Item: Encodable,
{
    let mut buffer = RlpBuffer::new();
    buffer.putl(values)?;
    Ok(buffer.out())
}

/// Decodes a buffer holding exactly one item.
pub fn decode<T: Decodable>(bytes: &[u8]) -> std::result::Result<T, DecoderError> {
    let item = RlpItem::first(bytes)?;
    if item.size() != bytes.len() {
        return Err(DecoderError::TrailingBytes(bytes.len() - item.size()));
    }
    item.as_val()
}
