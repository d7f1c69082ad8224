use serde_json::{Map, Value};

/// Lowercase, replace anything non-alphanumeric with '-', collapse runs.
/// e.g., "Data Center #1" -> "data-center-1"
pub fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Drop every `null` entry from a record. A null value means the caller
/// did not declare the field.
pub fn strip_nulls(record: &Map<String, Value>) -> Map<String, Value> {
    record
        .iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Render a scalar for display or query strings without JSON quoting.
pub fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Parse a boolean-ish environment value ("true", "1", "yes", "on").
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Join filter pairs into a display string, e.g. `name=r1, location=…`
pub fn describe_filter(filter: &[(String, String)]) -> String {
    filter
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Test Manufacturer"), "test-manufacturer");
        assert_eq!(slugify("Data Center #1"), "data-center-1");
        assert_eq!(slugify("--already-slugged--"), "already-slugged");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_strip_nulls() {
        let record = json!({"name": "r1", "serial": null, "tags": []});
        let stripped = strip_nulls(record.as_object().unwrap());
        assert_eq!(stripped.len(), 2);
        assert!(!stripped.contains_key("serial"));
        assert!(stripped.contains_key("tags"));
    }

    #[test]
    fn test_scalar_to_string() {
        assert_eq!(scalar_to_string(&json!("abc")), "abc");
        assert_eq!(scalar_to_string(&json!(42)), "42");
        assert_eq!(scalar_to_string(&json!(true)), "true");
        assert_eq!(scalar_to_string(&Value::Null), "");
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" no "), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_describe_filter() {
        let filter = vec![
            ("name".to_string(), "r1".to_string()),
            ("location".to_string(), "abc".to_string()),
        ];
        assert_eq!(describe_filter(&filter), "name=r1, location=abc");
    }
}
