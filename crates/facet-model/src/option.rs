use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::fmt;

/// A single selectable option as stored by the tabular datastore.
///
/// Option identity for dedup/merging is `name`; `id` and `label` are carried
/// along for consumers but never participate in matching.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    /// Datastore-side option type tag (e.g. `option`, `foreignid`), if any.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub option_type: Option<String>,
}

impl SelectOption {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            label: None,
            order: None,
            option_type: None,
        }
    }

    /// Synthesize an option record for a plain scalar value (text or number
    /// column). `name` and `label` both carry the rendered value.
    pub fn synthetic(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: None,
            label: Some(name.clone()),
            name,
            order: None,
            option_type: None,
        }
    }

    /// Lenient ingestion from a raw datastore JSON payload.
    ///
    /// Accepts any object carrying a non-empty `name` string. `id` may arrive
    /// as either a string or a number (foreign-id options use numeric ids).
    /// Anything else yields `None` rather than an error.
    pub fn from_json(raw: &Json) -> Option<Self> {
        let obj = raw.as_object()?;
        let name = obj.get("name")?.as_str()?;
        if name.is_empty() {
            return None;
        }

        let id = obj.get("id").and_then(|v| match v {
            Json::String(s) => Some(s.clone()),
            Json::Number(n) => Some(n.to_string()),
            _ => None,
        });
        let label = obj
            .get("label")
            .and_then(Json::as_str)
            .map(str::to_string);
        let order = obj.get("order").and_then(Json::as_i64);
        let option_type = obj
            .get("type")
            .and_then(Json::as_str)
            .map(str::to_string);

        Some(Self {
            id,
            name: name.to_string(),
            label,
            order,
            option_type,
        })
    }
}

impl fmt::Display for SelectOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
