//! Tolerant deserializers for counts stored by older front ends.
//!
//! Numeric fields were sometimes written as strings (`"20"`) or left null.
//! These helpers accept integers, integral floats, numeric strings and null,
//! mapping anything unusable to zero.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(crate) fn value_to_u32(value: &Value) -> u32 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .map(|v| v.min(u32::MAX as u64) as u32)
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<f64>().map(|f| if f > 0.0 { f as u32 } else { 0 }).unwrap_or(0),
        Value::Bool(b) => u32::from(*b),
        _ => 0,
    }
}

/// Deserializes a `u32`, defaulting to 0 for null, negative or non-numeric input.
pub fn u32_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_u32(&value))
}

/// Like [`u32_or_zero`] but keeps `None` for absent/null values.
pub fn opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        other => Some(value_to_u32(&other)),
    })
}

/// Object entries whose keys parse as `u8`, other keys dropped. Anything but
/// an object yields nothing.
pub(crate) fn u8_keyed(value: &Value) -> impl Iterator<Item = (u8, &Value)> {
    value
        .as_object()
        .into_iter()
        .flatten()
        .filter_map(|(key, value)| key.trim().parse::<u8>().ok().map(|key| (key, value)))
}

/// Deserializes a `bool` that may be stored as null.
pub fn bool_or_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}
