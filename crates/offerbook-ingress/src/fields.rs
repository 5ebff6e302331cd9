//! Typed access to request-document fields.
//!
//! Strict accessors turn absence and wrong types into the matching
//! [`OfferbookError`] variant; field paths in errors are dotted
//! (`taker_pays.currency`).

use offerbook_types::{Limit, OfferbookError, Result};
use serde_json::{Map, Value};

/// Whether `field` is a member of the request object. `null` members count.
pub(crate) fn is_present(params: &Value, field: &str) -> bool {
    params.as_object().is_some_and(|obj| obj.contains_key(field))
}

pub(crate) fn require_object<'a>(params: &'a Value, field: &str) -> Result<&'a Map<String, Value>> {
    params
        .get(field)
        .ok_or_else(|| OfferbookError::FieldMissing(field.to_string()))?
        .as_object()
        .ok_or_else(|| OfferbookError::type_mismatch(field, "object"))
}

/// `obj[key]` as a string; `path` is the name used in errors.
pub(crate) fn require_string<'a>(obj: &'a Map<String, Value>, key: &str, path: &str) -> Result<&'a str> {
    obj.get(key)
        .ok_or_else(|| OfferbookError::FieldMissing(path.to_string()))?
        .as_str()
        .ok_or_else(|| OfferbookError::type_mismatch(path, "string"))
}

pub(crate) fn optional_string<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<&'a str>> {
    match obj.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(Some)
            .ok_or_else(|| OfferbookError::type_mismatch(path, "string")),
    }
}

/// `limit` under the strict policy: integral, non-negative, fits `u32`.
pub(crate) fn strict_limit(params: &Value) -> Result<Limit> {
    let Some(value) = params.get("limit") else {
        return Ok(Limit::DEFAULT);
    };
    if !(value.is_u64() || value.is_i64()) {
        return Err(OfferbookError::type_mismatch("limit", "integer"));
    }
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .map(Limit)
        .ok_or_else(|| OfferbookError::FieldInvalid("limit".to_string()))
}

/// `limit` under the lenient policy: integers and integral floats in `u32`
/// range are taken, anything else means the default.
pub(crate) fn lenient_limit(params: &Value) -> Limit {
    let Some(value) = params.get("limit") else {
        return Limit::DEFAULT;
    };
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .or_else(|| value.as_f64().and_then(integral_u32))
        .map_or(Limit::DEFAULT, Limit)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn integral_u32(f: f64) -> Option<u32> {
    let in_range = (0.0..=f64::from(u32::MAX)).contains(&f);
    (in_range && f.fract().abs() < f64::EPSILON).then(|| f as u32)
}

/// Integer-or-boolean flag; non-zero integers and `true` are set.
pub(crate) fn lenient_flag(params: &Value, field: &str) -> bool {
    match params.get(field) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_u64().is_some_and(|n| n != 0),
        _ => false,
    }
}
