//! Opaque key/value settings attached to agents and call records.

use serde_json::{Map, Value};
use thiserror::Error;

/// Ordered mapping of string keys to loosely-typed values.
pub type SettingsMap = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsParseError {
    #[error("settings must be a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("invalid settings JSON: {0}")]
    Json(String),
}

/// Collapse an empty map to `None` so the backend sees "no settings".
pub fn normalize_settings(settings: Option<SettingsMap>) -> Option<SettingsMap> {
    settings.filter(|map| !map.is_empty())
}

/// Parse operator-entered settings text.
///
/// Blank input means "no settings". Anything else must be a JSON object.
pub fn parse_settings(text: &str) -> Result<Option<SettingsMap>, SettingsParseError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    let value: Value =
        serde_json::from_str(text).map_err(|e| SettingsParseError::Json(e.to_string()))?;
    match value {
        Value::Object(map) => Ok(normalize_settings(Some(map))),
        Value::Null => Ok(None),
        other => Err(SettingsParseError::NotAnObject(json_kind(&other))),
    }
}

/// Render settings back into editable text. Absent settings render as an empty string.
pub fn settings_to_text(settings: Option<&SettingsMap>) -> String {
    match settings {
        Some(map) if !map.is_empty() => {
            serde_json::to_string_pretty(map).unwrap_or_default()
        }
        _ => String::new(),
    }
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_map_normalizes_to_none() {
        assert_eq!(normalize_settings(Some(Map::new())), None);
        assert_eq!(normalize_settings(None), None);
    }

    #[test]
    fn non_empty_map_is_kept() {
        let mut map = Map::new();
        map.insert("voice".into(), json!("alloy"));
        assert_eq!(normalize_settings(Some(map.clone())), Some(map));
    }

    #[test]
    fn parse_blank_and_empty_object_mean_absent() {
        assert_eq!(parse_settings("   ").unwrap(), None);
        assert_eq!(parse_settings("{}").unwrap(), None);
        assert_eq!(parse_settings("null").unwrap(), None);
    }

    #[test]
    fn parse_object_preserves_insertion_order() {
        let parsed = parse_settings(r#"{"speed": 1.2, "accent": "en-GB"}"#)
            .unwrap()
            .unwrap();
        let keys: Vec<&String> = parsed.keys().collect();
        assert_eq!(keys, ["speed", "accent"]);
    }

    #[test]
    fn parse_rejects_non_objects() {
        assert_eq!(
            parse_settings("[1, 2]"),
            Err(SettingsParseError::NotAnObject("an array"))
        );
        assert!(matches!(parse_settings("{oops"), Err(SettingsParseError::Json(_))));
    }

    #[test]
    fn text_round_trip_of_absent_settings_is_blank() {
        assert_eq!(settings_to_text(None), "");
        assert_eq!(settings_to_text(Some(&Map::new())), "");
    }
}
