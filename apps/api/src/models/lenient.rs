//! Lenient field deserializers for client-supplied records.
//!
//! Every helper goes through `serde_json::Value` and falls back to the field's default
//! when the value is null or of the wrong shape, so optional input is defaulted rather
//! than rejected. Use with `#[serde(default, deserialize_with = "...")]`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::assessment::QuestionType;

/// Any `T`: the decoded value, or `T::default()` if it does not decode.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// A string, or `None` for anything else.
pub fn string_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// An array of strings (non-strings skipped) or a comma-separated string.
pub fn string_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(strings(Value::deserialize(deserializer)?))
}

/// A non-negative integer, an integral float, or a numeric string.
pub fn u32_opt<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(as_u32(&Value::deserialize(deserializer)?))
}

/// Like `u32_opt`, with 0 for anything unusable.
pub fn u32_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(as_u32(&Value::deserialize(deserializer)?).unwrap_or(0))
}

/// Question type names; unknown names are dropped and duplicates collapse.
pub fn question_types<'de, D>(deserializer: D) -> Result<Vec<QuestionType>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut types = Vec::new();
    for ty in strings(Value::deserialize(deserializer)?)
        .iter()
        .filter_map(|name| QuestionType::parse(name))
    {
        if !types.contains(&ty) {
            types.push(ty);
        }
    }
    Ok(types)
}

fn strings(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn as_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= u32::MAX as f64)
                    .map(|f| f as u64)
            })
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}
