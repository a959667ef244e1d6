use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::row::ColumnId;

/// Declarative filter configuration as supplied by the CMS module metadata.
///
/// Every field is optional: definitions arrive hand-authored and partially
/// filled. Only entries carrying both a column id and a tolerance contribute
/// to the [`ToleranceConfig`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hubdb_column_id: Option<ColumnId>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub filter_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Per-column numeric tolerance bands. Absent entries mean exact matching.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToleranceConfig {
    entries: HashMap<ColumnId, f64>,
}

impl ToleranceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract tolerances from filter definitions: one entry per definition
    /// carrying both a column id and a tolerance; everything else is skipped.
    pub fn from_definitions(definitions: &[FilterDefinition]) -> Self {
        let mut entries = HashMap::new();
        for def in definitions {
            if let (Some(column), Some(tolerance)) = (&def.hubdb_column_id, def.tolerance) {
                entries.insert(column.clone(), tolerance);
            }
        }
        Self { entries }
    }

    pub fn set(&mut self, column: impl Into<ColumnId>, tolerance: f64) {
        self.entries.insert(column.into(), tolerance);
    }

    /// Tolerance for a column; zero (exact match) when unconfigured.
    pub fn get(&self, column: &str) -> f64 {
        self.entries.get(column).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ColumnId, f64)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }
}
