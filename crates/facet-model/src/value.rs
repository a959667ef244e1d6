use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::option::SelectOption;

/// Versioned, JSON-friendly representation of a column value.
///
/// The enum uses an explicit `{type, value}` tagged layout for stable IPC.
/// Classification happens exactly once, when rows are ingested; matching and
/// aggregation never re-inspect raw payloads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ColumnValue {
    /// Free text; matched by case-insensitive substring.
    Text(String),
    /// IEEE-754 double; matched exactly or within a tolerance band.
    ///
    /// `0` is a valid value, never "absent".
    Number(f64),
    /// A single option; matched by exact `name` equality.
    Select(SelectOption),
    /// An ordered option list; matched by "contains an option named" semantics.
    MultiSelect(Vec<SelectOption>),
}

/// Shape discriminant for [`ColumnValue`], used for per-column shape
/// stability checks during ingestion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueShape {
    Text,
    Number,
    Select,
    MultiSelect,
}

impl ColumnValue {
    /// Classify a raw datastore cell payload, in this order: non-empty array
    /// of option objects, object with a `name`, non-empty string, number.
    ///
    /// Unclassifiable payloads (null, empty string, empty array, booleans,
    /// nameless objects) yield `None` — the column is absent on that row.
    pub fn classify(raw: &Json) -> Option<Self> {
        match raw {
            Json::Array(items) => {
                let options: Vec<SelectOption> =
                    items.iter().filter_map(SelectOption::from_json).collect();
                if options.is_empty() {
                    None
                } else {
                    Some(ColumnValue::MultiSelect(options))
                }
            }
            Json::Object(_) => SelectOption::from_json(raw).map(ColumnValue::Select),
            Json::String(s) if !s.is_empty() => Some(ColumnValue::Text(s.clone())),
            Json::Number(n) => n.as_f64().map(ColumnValue::Number),
            _ => None,
        }
    }

    pub fn shape(&self) -> ValueShape {
        match self {
            ColumnValue::Text(_) => ValueShape::Text,
            ColumnValue::Number(_) => ValueShape::Number,
            ColumnValue::Select(_) => ValueShape::Select,
            ColumnValue::MultiSelect(_) => ValueShape::MultiSelect,
        }
    }
}

impl From<f64> for ColumnValue {
    fn from(value: f64) -> Self {
        ColumnValue::Number(value)
    }
}

impl From<String> for ColumnValue {
    fn from(value: String) -> Self {
        ColumnValue::Text(value)
    }
}

impl From<&str> for ColumnValue {
    fn from(value: &str) -> Self {
        ColumnValue::Text(value.to_string())
    }
}

impl From<SelectOption> for ColumnValue {
    fn from(value: SelectOption) -> Self {
        ColumnValue::Select(value)
    }
}

impl From<Vec<SelectOption>> for ColumnValue {
    fn from(value: Vec<SelectOption>) -> Self {
        ColumnValue::MultiSelect(value)
    }
}

/// Render a number the way option names are rendered: integral values without
/// a trailing fraction (`2` rather than `2.0`), everything else via the
/// shortest round-trip float formatting.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
