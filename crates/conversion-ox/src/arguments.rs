use serde_json::{Value, json};

/// Best-effort decode of a tool call's JSON argument string.
///
/// Anything that does not parse becomes `{}`.
pub(crate) fn parse_arguments(name: &str, arguments: &str) -> Value {
    if arguments.trim().is_empty() {
        return json!({});
    }

    serde_json::from_str(arguments).unwrap_or_else(|err| {
        log::warn!(
            "Malformed arguments for tool call '{name}', using {{}}: {err}"
        );
        json!({})
    })
}

/// Vendor ids are optional in practice; an empty one is no id.
pub(crate) fn non_empty_id(id: &str) -> Option<String> {
    (!id.is_empty()).then(|| id.to_owned())
}
