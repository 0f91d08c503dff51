//! Lookup helpers for loosely-shaped JSON payloads.
//!
//! The support API is inconsistent about field names (`created_at` versus
//! `createdAt`, `text` versus `body`). These helpers walk an ordered list of
//! candidate keys and return the first one carrying a usable value.

use serde_json::{Map, Value};

/// Returns the first non-null value among `keys`.
pub(crate) fn first_present<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find(|value| !value.is_null())
}

/// Returns the first string value among `keys`.
pub(crate) fn first_string(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find_map(|value| value.as_str().map(str::to_string))
}

/// Returns the first object value among `keys`.
pub(crate) fn first_object<'a>(
    obj: &'a Map<String, Value>,
    keys: &[&str],
) -> Option<&'a Map<String, Value>> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find_map(Value::as_object)
}

/// True when any of `keys` holds boolean `true`.
pub(crate) fn any_flag(obj: &Map<String, Value>, keys: &[&str]) -> bool {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .any(|value| value.as_bool() == Some(true))
}
