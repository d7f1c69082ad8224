use serde_json::{Map, Value};
use std::collections::BTreeSet;

use crate::registry::ResourceDescriptor;
use crate::utils::scalar_to_string;

/// Fields of `desired` whose value differs from `existing`, ready to PATCH.
///
/// Only declared fields are considered. `custom_fields` is compared per
/// key and carries only the keys that differ.
pub fn changed_fields(
    descriptor: &ResourceDescriptor,
    existing: &Map<String, Value>,
    desired: &Map<String, Value>,
) -> Map<String, Value> {
    let mut changes = Map::new();

    for (field, want) in desired {
        if field == "id" || descriptor.write_only.contains(&field.as_str()) {
            continue;
        }
        let have = existing.get(field).unwrap_or(&Value::Null);

        if field == "custom_fields" {
            if let Value::Object(want_cf) = want {
                let differing = changed_custom_fields(have, want_cf);
                if !differing.is_empty() {
                    changes.insert(field.clone(), Value::Object(differing));
                }
                continue;
            }
        }

        if !values_equal(want, have) {
            changes.insert(field.clone(), want.clone());
        }
    }

    changes
}

fn changed_custom_fields(have: &Value, want: &Map<String, Value>) -> Map<String, Value> {
    let have = have.as_object();
    want.iter()
        .filter(|(key, value)| {
            let current = have.and_then(|h| h.get(key.as_str())).unwrap_or(&Value::Null);
            !values_equal(value, current)
        })
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Equality after normalization: lists as sets, scalars by text when the
/// JSON types differ, blank string equal to null.
pub fn values_equal(want: &Value, have: &Value) -> bool {
    match (want, have) {
        (Value::Array(w), Value::Array(h)) => as_set(w) == as_set(h),
        (Value::Array(w), Value::Null) => w.is_empty(),
        (Value::Object(w), Value::Object(h)) => {
            w.len() == h.len()
                && w.iter().all(|(k, v)| h.get(k).map(|hv| values_equal(v, hv)).unwrap_or(false))
        }
        (Value::Number(w), Value::Number(h)) => {
            if let (Some(a), Some(b)) = (w.as_i64(), h.as_i64()) {
                a == b
            } else if let (Some(a), Some(b)) = (w.as_u64(), h.as_u64()) {
                a == b
            } else if w.is_f64() || h.is_f64() {
                w.as_f64() == h.as_f64()
            } else {
                false
            }
        }
        (Value::String(s), Value::Null) | (Value::Null, Value::String(s)) => s.is_empty(),
        (Value::String(_), Value::Number(_) | Value::Bool(_))
        | (Value::Number(_) | Value::Bool(_), Value::String(_)) => {
            scalar_to_string(want).trim().eq_ignore_ascii_case(scalar_to_string(have).trim())
        }
        _ => want == have,
    }
}

fn as_set(items: &[Value]) -> BTreeSet<String> {
    items
        .iter()
        .map(|v| match v {
            Value::Object(_) | Value::Array(_) => v.to_string(),
            scalar => scalar_to_string(scalar),
        })
        .collect()
}
