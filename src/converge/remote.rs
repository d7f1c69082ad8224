use serde_json::{Map, Value};

use super::ConvergeError;

/// An object returned by Nautobot.
///
/// `Record` is a REST record with an identifier whose nested related
/// objects still need flattening; `Mapping` is a body that is already a
/// plain mapping and is reported verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteObject {
    Record { id: String, fields: Map<String, Value> },
    Mapping(Map<String, Value>),
}

impl RemoteObject {
    pub fn from_value(value: Value) -> Result<Self, ConvergeError> {
        match value {
            Value::Object(fields) => match fields.get("id").and_then(id_string) {
                Some(id) => Ok(Self::Record { id, fields }),
                None => Ok(Self::Mapping(fields)),
            },
            other => Err(ConvergeError::Remote(format!(
                "Expected an object in the Nautobot response, got {}",
                other
            ))),
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Record { id, .. } => Some(id),
            Self::Mapping(_) => None,
        }
    }

    /// Human-readable name Nautobot reports for the object
    pub fn display(&self) -> Option<String> {
        let fields = match self {
            Self::Record { fields, .. } => fields,
            Self::Mapping(fields) => fields,
        };
        fields.get("display").and_then(Value::as_str).map(str::to_string)
    }

    /// Serialized view: related objects reduced to their identifier and
    /// choice objects to their value, so fields compare against resolved
    /// desired values.
    pub fn serialized(&self) -> Map<String, Value> {
        match self {
            Self::Record { fields, .. } => fields
                .iter()
                .map(|(k, v)| (k.clone(), flatten(k, v)))
                .collect(),
            Self::Mapping(fields) => fields.clone(),
        }
    }
}

/// Identifier as a string; Nautobot uses UUIDs, integer ids are tolerated
pub fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn flatten(field: &str, value: &Value) -> Value {
    match value {
        // Free-form JSON fields keep their shape
        Value::Object(_) if is_free_form(field) => value.clone(),
        Value::Object(obj) => {
            if let Some(id) = obj.get("id").and_then(id_string) {
                Value::String(id)
            } else if obj.contains_key("value") && obj.contains_key("label") {
                obj.get("value").cloned().unwrap_or(Value::Null)
            } else {
                value.clone()
            }
        }
        Value::Array(items) => Value::Array(items.iter().map(|v| flatten(field, v)).collect()),
        other => other.clone(),
    }
}

fn is_free_form(field: &str) -> bool {
    matches!(
        field,
        "custom_fields" | "config_context" | "local_config_context_data" | "computed_fields" | "extra_config"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_serialization_view() {
        let obj = RemoteObject::from_value(json!({
            "id": "d1",
            "display": "r1",
            "name": "r1",
            "location": {"id": "l1", "object_type": "dcim.location", "url": "https://nb/api/dcim/locations/l1/"},
            "status": {"id": "s1", "object_type": "extras.status"},
            "face": {"value": "front", "label": "Front"},
            "tags": [{"id": "t2"}, {"id": "t1"}],
            "custom_fields": {"owner": {"id": "not-a-ref"}},
            "serial": "",
        }))
        .unwrap();

        assert_eq!(obj.id(), Some("d1"));
        assert_eq!(obj.display().as_deref(), Some("r1"));

        let ser = obj.serialized();
        assert_eq!(ser["location"], json!("l1"));
        assert_eq!(ser["status"], json!("s1"));
        assert_eq!(ser["face"], json!("front"));
        assert_eq!(ser["tags"], json!(["t2", "t1"]));
        assert_eq!(ser["custom_fields"], json!({"owner": {"id": "not-a-ref"}}));
        assert_eq!(ser["serial"], json!(""));
    }

    #[test]
    fn test_plain_mapping_is_verbatim() {
        let obj = RemoteObject::from_value(json!({"address": "10.0.0.1/24", "vrf": {"id": "v1"}})).unwrap();
        assert!(obj.id().is_none());
        assert_eq!(obj.serialized()["vrf"], json!({"id": "v1"}));
    }

    #[test]
    fn test_integer_ids() {
        let obj = RemoteObject::from_value(json!({"id": 7, "name": "x"})).unwrap();
        assert_eq!(obj.id(), Some("7"));
    }

    #[test]
    fn test_non_object_is_remote_error() {
        let err = RemoteObject::from_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, ConvergeError::Remote(_)));
    }
}
