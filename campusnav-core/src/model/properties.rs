//! Helpers for reading GeoJSON property bags

use serde_json::{Map, Value};

pub type Properties = Map<String, Value>;

/// Reads a property as a trimmed, non-empty string.
///
/// Numbers and booleans are rendered with their JSON text so that
/// `"floor": 1` and `"floor": "1"` read the same.
pub fn property_string(props: &Properties, key: &str) -> Option<String> {
    match props.get(key)? {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// JavaScript-style truthiness, used for loosely typed flags such as `is_elevator`
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// An entrance or node is an elevator when any one of these holds:
/// `type == "elevator"`, a truthy `is_elevator`, `elevator == true`,
/// or a name containing "elevator" in any case.
pub fn is_elevator(props: &Properties) -> bool {
    let typed = matches!(props.get("type"), Some(Value::String(t)) if t == "elevator");
    let flagged = props.get("is_elevator").is_some_and(is_truthy);
    let elevator = matches!(props.get("elevator"), Some(Value::Bool(true)));
    let named = property_string(props, "name")
        .is_some_and(|name| name.to_lowercase().contains("elevator"));

    typed || flagged || elevator || named
}
