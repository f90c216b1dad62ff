//! Human-facing views of RLP buffers: indented trees, JSON, and the reverse
//! JSON-to-RLP bridge used by the `encode` command.

use rlp_core::{DecoderError, RlpBuffer, RlpError, RlpItem, RlpIterator, Value};
use serde_json::Value as Json;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::Config;

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("RLP error: {0}")]
    Rlp(#[from] RlpError),

    #[error("Nesting deeper than {0} levels")]
    DepthExceeded(usize),

    #[error("Unsupported JSON value: {0}")]
    UnsupportedJson(String),
}

impl From<DecoderError> for InspectError {
    fn from(e: DecoderError) -> Self {
        InspectError::Rlp(e.into())
    }
}

pub type Result<T> = std::result::Result<T, InspectError>;

/// Renders every top-level item as an indented tree, one line per item.
pub fn render_tree(bytes: &[u8], config: &Config) -> Result<String> {
    let mut out = String::new();
    for item in RlpIterator::new(bytes) {
        render_item(&item?, 0, config, &mut out)?;
    }
    Ok(out)
}

fn render_item(item: &RlpItem<'_>, depth: usize, config: &Config, out: &mut String) -> Result<()> {
    if depth >= config.decode.max_depth {
        return Err(InspectError::DepthExceeded(config.decode.max_depth));
    }

    let pad = " ".repeat(depth * config.output.indent);
    if item.is_list() {
        let count = item.items_size()?;
        out.push_str(&format!("{}list [{} items, {} bytes]\n", pad, count, item.size()));
        for child in item.iter()? {
            render_item(&child?, depth + 1, config, out)?;
        }
    } else {
        let payload = item.payload()?;
        out.push_str(&pad);
        out.push_str(&config.output.hex(payload));
        if let Some(hint) = describe_data(item, payload) {
            out.push_str(&format!("  ({})", hint));
        }
        out.push('\n');
    }
    Ok(())
}

/// Integer value for short payloads, text for printable ones.
fn describe_data(item: &RlpItem<'_>, payload: &[u8]) -> Option<String> {
    if payload.is_empty() {
        return Some("empty".to_string());
    }
    let printable = payload.iter().all(|b| b.is_ascii_graphic() || *b == b' ');
    if printable && payload.len() > 1 {
        return item.as_val::<String>().ok().map(|s| format!("{:?}", s));
    }
    item.as_val::<u64>().ok().map(|v| v.to_string())
}

/// JSON array of the top-level items. Lists become arrays, data becomes hex.
pub fn to_json(bytes: &[u8], config: &Config) -> Result<Json> {
    let items = RlpIterator::new(bytes)
        .map(|item| item_to_json(&item?, 0, config))
        .collect::<Result<Vec<_>>>()?;
    Ok(Json::Array(items))
}

fn item_to_json(item: &RlpItem<'_>, depth: usize, config: &Config) -> Result<Json> {
    if depth >= config.decode.max_depth {
        return Err(InspectError::DepthExceeded(config.decode.max_depth));
    }

    if item.is_list() {
        let children = item
            .iter()?
            .map(|child| item_to_json(&child?, depth + 1, config))
            .collect::<Result<Vec<_>>>()?;
        Ok(Json::Array(children))
    } else {
        Ok(Json::String(config.output.hex(item.payload()?)))
    }
}

/// Maps JSON onto the encoder's value model.
///
/// Non-negative integers encode as integers, strings go through the `0x`
/// hex rule, arrays become lists and `null` the empty string.
pub fn json_to_value(json: &Json) -> Result<Value> {
    match json {
        Json::Null => Ok(Value::Bytes(Vec::new())),
        Json::Bool(b) => Ok(Value::Uint(*b as u64)),
        Json::Number(n) => n
            .as_u64()
            .map(Value::Uint)
            .ok_or_else(|| InspectError::UnsupportedJson(n.to_string())),
        Json::String(s) => Ok(Value::Text(s.clone())),
        Json::Array(items) => items
            .iter()
            .map(json_to_value)
            .collect::<Result<Vec<_>>>()
            .map(Value::Sequence),
        Json::Object(_) => Err(InspectError::UnsupportedJson("object".to_string())),
    }
}

pub fn encode_json(json: &Json) -> Result<Vec<u8>> {
    let value = json_to_value(json)?;
    let mut buffer = RlpBuffer::new();
    buffer.put(&value).map_err(RlpError::from)?;
    debug!(bytes = buffer.len(), kind = value.kind(), "encoded json value");
    Ok(buffer.out())
}

/// Whether every top-level item is already in canonical form, checked by
/// re-encoding its structural decode.
///
/// Only short-form slack such as `0x81 0x05` yields `Ok(false)`. Long-form
/// headers with a leading zero or a length below 56 are rejected by the
/// position decoder and come back as `Err`, as does nesting past `max_depth`.
pub fn is_canonical(bytes: &[u8], max_depth: usize) -> rlp_core::Result<bool> {
    let mut reencoded = RlpBuffer::with_capacity(bytes.len());
    for item in RlpIterator::new(bytes) {
        let value = Value::decode_structure(&item?, max_depth)?;
        reencoded.put(&value)?;
    }
    trace!(original = bytes.len(), reencoded = reencoded.len(), "canonical check");
    Ok(reencoded.as_slice() == bytes)
}
