use std::sync::Arc;

use ahash::AHashMap;

use facet_model::{format_number, ColumnId, Row, ToleranceConfig};

use crate::criteria::Criteria;
use crate::facet::{facet_options, FacetOption};
use crate::ordering::OrderingEntry;

/// Cache facet computations keyed by (column, other active criteria,
/// tolerance configuration).
///
/// The cache is a plain value the caller owns and threads explicitly —
/// create one per dataset, use it across a burst of facet calls, and
/// [`FacetCache::clear`] (or drop) it when the underlying rows change.
/// Hits return the stored ordered sequence by reference (an `Arc` clone),
/// bypassing enumeration, counting, and sorting entirely.
///
/// Intended for single-threaded/cooperative use; independent concurrent
/// facet computations should each own their own instance. The display
/// ordering is not part of the key: use one ordering per column per cache
/// lifetime.
#[derive(Debug, Default)]
pub struct FacetCache {
    entries: AHashMap<CacheKey, Arc<[FacetOption]>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    column: ColumnId,
    criteria: String,
    tolerances: String,
}

impl FacetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Facet `column`, serving from cache when the (column, other-criteria,
    /// tolerances) key has been computed before.
    ///
    /// The faceted column's own criterion is excluded from the key, matching
    /// the aggregation semantics — toggling a column's own filter never
    /// changes that column's facet counts.
    pub fn get_or_compute(
        &mut self,
        rows: &[Row],
        column: &str,
        criteria: &Criteria,
        tolerances: &ToleranceConfig,
        ordering: Option<&[OrderingEntry]>,
    ) -> Arc<[FacetOption]> {
        let key = CacheKey {
            column: column.to_string(),
            criteria: criteria.without_column(column).canonical(),
            tolerances: canonical_tolerances(tolerances),
        };
        self.entries
            .entry(key)
            .or_insert_with(|| facet_options(rows, column, criteria, tolerances, ordering).into())
            .clone()
    }

    /// Drop every cached sequence. Call on dataset refresh.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Canonical `column:tolerance|…` rendering (sorted, zero entries omitted)
/// for the tolerance component of cache keys.
fn canonical_tolerances(config: &ToleranceConfig) -> String {
    let mut parts: Vec<String> = config
        .iter()
        .filter(|(_, tolerance)| *tolerance != 0.0)
        .map(|(column, tolerance)| format!("{column}:{}", format_number(tolerance)))
        .collect();
    parts.sort_unstable();
    parts.join("|")
}
