//! `facet-model` defines the core in-memory data structures for faceted row
//! filtering.
//!
//! The crate is intentionally self-contained so it can be reused by:
//! - the filtering/faceting engine (matching, aggregation, caching)
//! - ingestion layers that adapt datastore JSON payloads
//! - IPC boundaries via `serde` (JSON-safe schema)
//!
//! Value shape is decided exactly once, at ingestion ([`ColumnValue::classify`]);
//! downstream code dispatches on the tagged union and never re-inspects raw
//! payloads.

mod filter_def;
mod option;
mod row;
mod value;

pub use filter_def::{FilterDefinition, ToleranceConfig};
pub use option::SelectOption;
pub use row::{ColumnId, IngestError, Row, RowSet};
pub use value::{format_number, ColumnValue, ValueShape};
