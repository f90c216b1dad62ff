use rlp_types::U256;

use crate::traits::{data_payload, Decodable, Encodable};
use crate::{DecoderError, EncoderError, RlpBuffer, RlpItem};

/// Default nesting limit for the structural decode.
pub const MAX_DEPTH: usize = 64;

/// Closed set of decode targets.
///
/// When passed to [`RlpItem::to_value`] the variant already held selects the
/// rule: integers and text need a data item, `Sequence` needs a list and fills
/// its existing slots in order without growing or shrinking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Uint(u64),
    BigUint(U256),
    Bytes(Vec<u8>),
    Text(String),
    Sequence(Vec<Value>),
}

impl Value {
    /// A sequence of `arity` slots, each a copy of `element`.
    pub fn sequence_of(element: Value, arity: usize) -> Self {
        Value::Sequence(vec![element; arity])
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Uint(_) => "uint",
            Value::BigUint(_) => "big uint",
            Value::Bytes(_) => "bytes",
            Value::Text(_) => "text",
            Value::Sequence(_) => "sequence",
        }
    }

    /// Structural decode that gives up with `DepthExceeded` once an item sits
    /// `max_depth` lists deep.
    pub fn decode_structure(item: &RlpItem<'_>, max_depth: usize) -> Result<Self, DecoderError> {
        Value::decode_at(item, 0, max_depth)
    }

    fn decode_at(item: &RlpItem<'_>, depth: usize, max_depth: usize) -> Result<Self, DecoderError> {
        if depth >= max_depth {
            return Err(DecoderError::DepthExceeded(max_depth));
        }

        if item.is_list() {
            let children = item
                .iter()?
                .map(|child| Value::decode_at(&child?, depth + 1, max_depth))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Sequence(children))
        } else {
            Ok(Value::Bytes(data_payload(item)?.to_vec()))
        }
    }

    pub(crate) fn decode_from(&mut self, item: &RlpItem<'_>) -> Result<(), DecoderError> {
        match self {
            Value::Uint(v) => *v = u64::decode(item)?,
            Value::BigUint(v) => *v = U256::decode(item)?,
            Value::Bytes(v) => *v = Vec::<u8>::decode(item)?,
            Value::Text(v) => *v = String::decode(item)?,
            Value::Sequence(slots) => {
                if item.is_data() {
                    return Err(DecoderError::TypeMismatch {
                        expected: "list",
                        found: "data",
                    });
                }
                for (slot, child) in slots.iter_mut().zip(item.iter()?) {
                    slot.decode_from(&child?)?;
                }
            }
        }
        Ok(())
    }
}

/// Structural decode: lists become `Sequence`, everything else `Bytes`.
/// Nesting is bounded by [`MAX_DEPTH`].
impl Decodable for Value {
    fn decode(item: &RlpItem<'_>) -> Result<Self, DecoderError> {
        Value::decode_structure(item, MAX_DEPTH)
    }
}

impl Encodable for Value {
    fn rlp_append(&self, out: &mut RlpBuffer) -> Result<(), EncoderError> {
        match self {
            Value::Uint(v) => v.rlp_append(out),
            Value::BigUint(v) => v.rlp_append(out),
            Value::Bytes(v) => v.rlp_append(out),
            Value::Text(v) => v.rlp_append(out),
            Value::Sequence(children) => {
                out.putl(children.iter())?;
                Ok(())
            }
        }
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint(v)
    }
}

impl From<U256> for Value {
    fn from(v: U256) -> Self {
        Value::BigUint(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Sequence(v)
    }
}
