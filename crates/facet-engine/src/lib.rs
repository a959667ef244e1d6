//! `facet-engine` implements faceted row filtering and quantity aggregation
//! over [`facet_model`] row sets.
//!
//! Four composable layers, leaves first:
//! - [`matcher`]: the per-value match predicate (comma-OR, per-shape
//!   semantics, numeric tolerance bands) and the AND-across-columns row
//!   matcher.
//! - [`criteria`]: query-string parsing into a flat column→filter mapping,
//!   with control parameters excluded and a canonical serialization.
//! - [`facet`]: per-column distinct-option enumeration and the classic
//!   faceted-search count ("rows remaining if every *other* filter were
//!   applied"), with an ordering policy.
//! - [`cache`]: a caller-owned memoization cache over facet computations.
//!
//! Everything here is synchronous and deterministic; malformed input
//! degrades to "no match" rather than erroring (the ingestion boundary in
//! `facet-model` is where structural faults surface).

pub mod cache;
pub mod criteria;
pub mod facet;
pub mod matcher;
pub mod ordering;

pub use cache::FacetCache;
pub use criteria::{Criteria, CONTROL_PARAMS};
pub use facet::{facet_all, facet_options, FacetOption, Orderings};
pub use matcher::{filter_rows, matches, row_matches};
pub use ordering::{natural_cmp, sort_options, OrderingEntry};
