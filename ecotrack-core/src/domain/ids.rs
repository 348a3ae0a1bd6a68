//! Deserializers for identifiers the API sends as either numbers or strings

use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

/// Deserialize ID that can be number or string
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    id_from_value(&value).ok_or_else(|| D::Error::custom("expected number or string"))
}

/// Deserialize optional ID that can be number or string
pub(crate) fn deserialize_optional_id<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<JsonValue> = Option::deserialize(deserializer)?;
    match value {
        Some(JsonValue::Null) | None => Ok(None),
        Some(v) => id_from_value(&v)
            .map(Some)
            .ok_or_else(|| D::Error::custom("expected number or string")),
    }
}

/// Read a JSON scalar as an identifier string
pub(crate) fn id_from_value(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::String(s) => Some(s.clone()),
        _ => None,
    }
}
