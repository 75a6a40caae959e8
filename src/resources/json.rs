//! Field-merge helpers for response handling.
//!
//! Gateway responses are partial: a field that is absent must leave the
//! resource's current value alone. These helpers implement that merge for
//! the common scalar shapes, including the gateway's habit of sending
//! amounts either as JSON numbers or as numeric strings.

use rust_decimal::Decimal;
use serde_json::Value;

pub(crate) fn merge_str(target: &mut Option<String>, body: &Value, key: &str) {
    if let Some(value) = body.get(key).and_then(Value::as_str) {
        *target = Some(value.to_owned());
    }
}

pub(crate) fn merge_bool(target: &mut Option<bool>, body: &Value, key: &str) {
    if let Some(value) = body.get(key).and_then(Value::as_bool) {
        *target = Some(value);
    }
}

pub(crate) fn merge_u32(target: &mut Option<u32>, body: &Value, key: &str) {
    if let Some(value) = body.get(key).and_then(Value::as_u64) {
        *target = u32::try_from(value).ok().or(*target);
    }
}

pub(crate) fn merge_decimal(target: &mut Option<Decimal>, body: &Value, key: &str) {
    if let Some(value) = decimal(body, key) {
        *target = Some(value);
    }
}

/// Reads a decimal from a JSON number or a numeric string.
pub(crate) fn decimal(body: &Value, key: &str) -> Option<Decimal> {
    match body.get(key)? {
        Value::Number(n) => n.as_f64().and_then(|f| Decimal::try_from(f).ok()),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

pub(crate) fn bool_flag(body: &Value, key: &str) -> bool {
    body.get(key).and_then(Value::as_bool).unwrap_or(false)
}
