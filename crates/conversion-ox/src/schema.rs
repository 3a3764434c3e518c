//! Tool-parameter schema normalization
//!
//! Framework tool declarations may spell primitive types in upper case
//! (`OBJECT`, `STRING`); the vendor wire formats expect lower case.

use serde_json::{Map, Value, json};

/// Key whose string values get lowercased.
const TYPE_KEY: &str = "type";

/// Rewrites a schema to lowercase type names.
///
/// Every string value under a `type` key is lowercased and nested objects are
/// normalized recursively. Arrays and scalars pass through untouched, so
/// `required` lists and `enum` values keep their casing. The input is not mutated.
///
/// Returns `None` when `schema` is not a JSON object.
#[must_use]
pub fn normalize_schema(schema: &Value) -> Option<Value> {
    let Value::Object(map) = schema else {
        return None;
    };

    let normalized = map
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(name) if key == TYPE_KEY => Value::String(name.to_lowercase()),
                Value::Object(_) => normalize_schema(value).unwrap_or(Value::Null),
                other => other.clone(),
            };
            (key.clone(), value)
        })
        .collect::<Map<String, Value>>();

    Some(Value::Object(normalized))
}

/// Schema used when a declaration has none: an object without properties.
#[must_use]
pub fn empty_object_schema() -> Value {
    json!({"type": "object", "properties": {}})
}

/// Normalizes declared parameters, falling back to [`empty_object_schema`].
pub(crate) fn parameters_or_default(parameters: Option<&Value>) -> Value {
    parameters
        .and_then(normalize_schema)
        .unwrap_or_else(empty_object_schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_objects_have_no_schema() {
        assert_eq!(normalize_schema(&Value::Null), None);
        assert_eq!(normalize_schema(&json!("OBJECT")), None);
        assert_eq!(normalize_schema(&json!([{"type": "STRING"}])), None);
    }

    #[test]
    fn test_parameters_default() {
        assert_eq!(parameters_or_default(None), empty_object_schema());
        assert_eq!(
            parameters_or_default(Some(&json!(42))),
            empty_object_schema()
        );
        assert_eq!(
            parameters_or_default(Some(&json!({"type": "OBJECT"}))),
            json!({"type": "object"})
        );
    }

    #[test]
    fn test_non_string_type_kept() {
        let schema = json!({"type": ["STRING", "NULL"]});
        assert_eq!(normalize_schema(&schema), Some(schema.clone()));
    }
}
