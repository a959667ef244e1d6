use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use thiserror::Error;

use crate::value::{ColumnValue, ValueShape};

/// Column identifier as exposed by the datastore (path/id string).
pub type ColumnId = String;

/// Errors that can occur when ingesting a row payload.
///
/// Only structural faults error; cell-level oddities (nulls, empty arrays,
/// nameless option objects) degrade to "column absent" on that row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    #[error("row payload is not an array")]
    NotAnArray,
    #[error("row {index} is not an object")]
    RowNotAnObject { index: usize },
    #[error("row {index} has no values object")]
    MissingValues { index: usize },
}

/// A single denormalized row: an opaque record keyed by column id.
///
/// Rows are immutable once ingested; absent columns are simply not present in
/// `values`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub values: HashMap<ColumnId, ColumnValue>,
}

impl Row {
    pub fn new(values: HashMap<ColumnId, ColumnValue>) -> Self {
        Self { values }
    }

    pub fn value(&self, column: &str) -> Option<&ColumnValue> {
        self.values.get(column)
    }
}

/// An ordered collection of rows as fetched from the datastore.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RowSet {
    pub rows: Vec<Row>,
}

impl RowSet {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Ingest a datastore response payload: an array of row objects, each
    /// carrying a `values` object mapping column ids to raw cell payloads.
    ///
    /// Cell payloads are classified once here (see [`ColumnValue::classify`]).
    /// A column observed with two different shapes across rows is logged on
    /// first occurrence and otherwise accepted; the aggregation layer merges
    /// option identities by name regardless.
    pub fn from_json(payload: &Json) -> Result<Self, IngestError> {
        let items = payload.as_array().ok_or(IngestError::NotAnArray)?;

        let mut rows = Vec::with_capacity(items.len());
        let mut seen_shapes: HashMap<ColumnId, ValueShape> = HashMap::new();
        let mut warned: HashSet<ColumnId> = HashSet::new();

        for (index, item) in items.iter().enumerate() {
            let obj = item
                .as_object()
                .ok_or(IngestError::RowNotAnObject { index })?;
            let values_raw = obj
                .get("values")
                .and_then(Json::as_object)
                .ok_or(IngestError::MissingValues { index })?;

            let mut values = HashMap::with_capacity(values_raw.len());
            for (column, raw) in values_raw {
                let Some(value) = ColumnValue::classify(raw) else {
                    continue;
                };

                let shape = value.shape();
                match seen_shapes.get(column.as_str()) {
                    None => {
                        seen_shapes.insert(column.clone(), shape);
                    }
                    Some(first) if *first != shape && !warned.contains(column.as_str()) => {
                        log::warn!(
                            "column {column} has inconsistent value shapes ({first:?} vs {shape:?}); \
                             merging by option name"
                        );
                        warned.insert(column.clone());
                    }
                    Some(_) => {}
                }

                values.insert(column.clone(), value);
            }
            rows.push(Row { values });
        }

        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Every column id that appears with a value anywhere in the set, sorted.
    pub fn column_ids(&self) -> Vec<ColumnId> {
        let mut ids: Vec<ColumnId> = self
            .rows
            .iter()
            .flat_map(|row| row.values.keys().cloned())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}
