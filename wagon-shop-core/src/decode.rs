//! Lenient field decoders for host payloads.
//!
//! The host serializes game tables loosely: numbers may arrive as floats or strings, identities as
//! numbers, flags as `0`/`1`. Scalar decoders degrade to the zero value instead of failing so a
//! single malformed field never rejects a whole catalog push. [`list`] is the exception: a
//! collection that is present but not an array of decodable entries rejects the push. Pair them
//! with `#[serde(default)]` so missing fields take the same path.

use crate::numbers::{clamp_i64_to_u64, floor_f64_to_u64};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Non-negative whole amount (prices, cash, capacities).
///
/// # Errors
///
/// Only fails when the underlying deserializer itself errors.
pub fn amount<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map_or(0, amount_from_value))
}

/// Free text; numbers are stringified, null becomes empty.
///
/// # Errors
///
/// Only fails when the underlying deserializer itself errors.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(text_from_value).unwrap_or_default())
}

/// Boolean flag; accepts `0`/`1` and `"true"`/`"false"`.
///
/// # Errors
///
/// Only fails when the underlying deserializer itself errors.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().is_some_and(flag_from_value))
}

/// Optional sequence number; anything that is not a usable number becomes `None`.
///
/// # Errors
///
/// Only fails when the underlying deserializer itself errors.
pub fn sequence<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(|v| match v {
        Value::Number(_) | Value::String(_) => Some(amount_from_value(v)),
        _ => None,
    }))
}

/// Sequence where `null` or a missing field means an empty list.
///
/// # Errors
///
/// Fails when a present value is not an array or one of its elements cannot be decoded, so the
/// whole push is dropped instead of replacing a collection with a partial one.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn amount_from_value(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_i64().map(clamp_i64_to_u64))
            .or_else(|| n.as_f64().map(floor_f64_to_u64))
            .unwrap_or(0),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<u64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(floor_f64_to_u64))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

fn text_from_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn flag_from_value(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => matches!(s.trim(), "true" | "1"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "amount")]
        price: u64,
        #[serde(default, deserialize_with = "text")]
        label: String,
        #[serde(default, deserialize_with = "flag")]
        stored: bool,
        #[serde(default, deserialize_with = "sequence")]
        request_id: Option<u64>,
        #[serde(default, deserialize_with = "list")]
        tags: Vec<String>,
    }

    fn probe(json: &str) -> Probe {
        serde_json::from_str(json).expect("probe decodes")
    }

    #[test]
    fn missing_fields_take_zero_values() {
        let p = probe("{}");
        assert_eq!(p.price, 0);
        assert!(p.label.is_empty());
        assert!(!p.stored);
        assert!(p.request_id.is_none());
        assert!(p.tags.is_empty());
    }

    #[test]
    fn loose_numbers_are_normalized() {
        assert_eq!(probe(r#"{"price": 99.9}"#).price, 99);
        assert_eq!(probe(r#"{"price": -5}"#).price, 0);
        assert_eq!(probe(r#"{"price": "1500"}"#).price, 1500);
        assert_eq!(probe(r#"{"price": "12.5"}"#).price, 12);
        assert_eq!(probe(r#"{"price": "free"}"#).price, 0);
        assert_eq!(probe(r#"{"price": null}"#).price, 0);
        assert_eq!(probe(r#"{"price": [1]}"#).price, 0);
    }

    #[test]
    fn text_and_flags_accept_host_shapes() {
        assert_eq!(probe(r#"{"label": 42}"#).label, "42");
        assert_eq!(probe(r#"{"label": null}"#).label, "");
        assert!(probe(r#"{"stored": 1}"#).stored);
        assert!(!probe(r#"{"stored": 0}"#).stored);
        assert!(probe(r#"{"stored": "true"}"#).stored);
        assert!(!probe(r#"{"stored": "no"}"#).stored);
    }

    #[test]
    fn sequence_tolerates_junk() {
        assert_eq!(probe(r#"{"request_id": 7}"#).request_id, Some(7));
        assert_eq!(probe(r#"{"request_id": true}"#).request_id, None);
    }

    #[test]
    fn list_rejects_shapes_that_are_not_arrays() {
        assert!(probe(r#"{"tags": null}"#).tags.is_empty());
        assert_eq!(probe(r#"{"tags": ["a"]}"#).tags, vec!["a".to_string()]);
        assert!(serde_json::from_str::<Probe>(r#"{"tags": {"1": "a"}}"#).is_err());
        assert!(serde_json::from_str::<Probe>(r#"{"tags": ["a", {}]}"#).is_err());
    }
}
