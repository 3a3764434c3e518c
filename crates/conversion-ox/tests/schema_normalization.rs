use conversion_ox::{normalize_schema, schema::empty_object_schema};
use serde_json::json;

#[test]
fn test_uppercase_types_are_lowercased() {
    let schema = json!({
        "type": "OBJECT",
        "properties": {"city": {"type": "STRING"}}
    });

    assert_eq!(
        normalize_schema(&schema),
        Some(json!({"type": "object", "properties": {"city": {"type": "string"}}}))
    );
}

#[test]
fn test_nested_objects_and_verbatim_fields() {
    let schema = json!({
        "type": "OBJECT",
        "description": "Search QUERY",
        "properties": {
            "filters": {
                "type": "OBJECT",
                "properties": {
                    "limit": {"type": "INTEGER", "minimum": 1},
                    "mode": {"type": "STRING", "enum": ["FAST", "Deep"]}
                },
                "nullable": true
            },
            "tags": {"type": "ARRAY", "items": {"type": "STRING"}}
        },
        "required": ["FILTERS", "tags"]
    });

    let normalized = normalize_schema(&schema).unwrap();

    assert_eq!(normalized["description"], "Search QUERY");
    assert_eq!(normalized["properties"]["filters"]["type"], "object");
    assert_eq!(normalized["properties"]["filters"]["nullable"], true);
    assert_eq!(
        normalized["properties"]["filters"]["properties"]["limit"],
        json!({"type": "integer", "minimum": 1})
    );
    assert_eq!(
        normalized["properties"]["filters"]["properties"]["mode"]["enum"],
        json!(["FAST", "Deep"])
    );
    assert_eq!(normalized["properties"]["tags"]["items"]["type"], "string");
    assert_eq!(normalized["required"], json!(["FILTERS", "tags"]));
}

#[test]
fn test_arrays_are_not_descended() {
    let schema = json!({"anyOf": [{"type": "STRING"}, {"type": "NUMBER"}]});
    assert_eq!(normalize_schema(&schema), Some(schema.clone()));
}

#[test]
fn test_input_is_not_mutated() {
    let schema = json!({"type": "OBJECT"});
    let before = schema.clone();
    let _ = normalize_schema(&schema);
    assert_eq!(schema, before);
}

#[test]
fn test_normalization_is_idempotent() {
    let schemas = [
        json!({"type": "OBJECT", "properties": {"a": {"type": "STRING"}, "b": {"type": "Boolean"}}}),
        json!({"type": "object", "properties": {}}),
        json!({"properties": {"deep": {"properties": {"deeper": {"type": "NUMBER"}}}}, "required": ["deep"]}),
        json!({}),
    ];

    for schema in schemas {
        let once = normalize_schema(&schema).unwrap();
        let twice = normalize_schema(&once).unwrap();
        assert_eq!(once, twice, "normalization not idempotent for {schema}");
    }
}

#[test]
fn test_default_schema_shape() {
    assert_eq!(empty_object_schema(), json!({"type": "object", "properties": {}}));
    assert!(normalize_schema(&json!(null)).is_none());
}
