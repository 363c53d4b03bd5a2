//! Effective configuration for the wrapped agent.
//!
//! The user's inline configuration is untrusted. The security configuration is
//! overlaid on top of it one level deep, so every security key keeps its exact
//! value. Anything that is not a JSON object falls back to the security
//! configuration alone.

use serde_json::{Map, Value};

/// Overlay `security` on `user` (shallow, security applied last).
///
/// Nested values are replaced wholesale, never deep-merged, so a user cannot
/// add sub-keys under a security key.
pub fn merge(user: &Map<String, Value>, security: &Map<String, Value>) -> Map<String, Value> {
    let mut effective = user.clone();
    for (key, value) in security {
        effective.insert(key.clone(), value.clone());
    }
    effective
}

/// Parse the raw user configuration, if any, into a JSON object.
///
/// Returns `None` when the value is absent or empty, and an error message when
/// it is present but unusable.
pub fn parse_user_config(
    raw: Option<&str>,
) -> Option<std::result::Result<Map<String, Value>, String>> {
    let raw = raw.filter(|s| !s.is_empty())?;

    Some(match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(format!("expected a JSON object, got {}", json_kind(&other))),
        Err(e) => Err(e.to_string()),
    })
}

/// Compute the configuration the agent will observe.
///
/// Fails closed: on any problem with the user configuration the result is the
/// security configuration, unchanged.
pub fn effective_config(raw: Option<&str>, security: &Map<String, Value>) -> Map<String, Value> {
    match parse_user_config(raw) {
        None => security.clone(),
        Some(Ok(user)) => merge(&user, security),
        Some(Err(reason)) => {
            tracing::debug!(%reason, "ignoring user configuration");
            security.clone()
        }
    }
}

/// Serialize a configuration the way it is handed to the agent
pub fn to_env_value(config: &Map<String, Value>) -> String {
    // A map of JSON values always serializes
    Value::Object(config.clone()).to_string()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
