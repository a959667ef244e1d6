use std::collections::{btree_map, BTreeMap};

use facet_model::ColumnId;
use serde::{Deserialize, Serialize};

/// Query parameters that drive pagination/navigation rather than filtering.
/// They are never treated as criteria unless explicitly whitelisted.
pub const CONTROL_PARAMS: &[&str] = &["limit", "offset", "pagination"];

/// The active filter selections: one filter string per column, unique keys.
///
/// Entries always hold non-empty filter strings — an empty value means "no
/// filter" and is dropped on insert, so `?a=x&a=` clears the `a` filter
/// (last occurrence wins, then empties are discarded).
///
/// Backed by a sorted map so the canonical serialization used for cache keys
/// falls out of plain iteration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Criteria {
    entries: BTreeMap<ColumnId, String>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` query string (with or
    /// without a leading `?`). Control parameters are excluded; repeated keys
    /// keep the last occurrence; an empty string yields empty criteria.
    ///
    /// Column ids are not validated here — unknown columns simply never
    /// match at the row-matching layer.
    pub fn from_query(query: &str) -> Self {
        let mut entries = parse_pairs(query);
        entries.retain(|key, value| !is_control_param(key) && !value.is_empty());
        Self { entries }
    }

    /// Like [`Criteria::from_query`], but keep only whitelisted keys. A
    /// control parameter appears in the result only when explicitly listed.
    pub fn from_query_filtered(query: &str, allowed: &[&str]) -> Self {
        let mut entries = parse_pairs(query);
        entries.retain(|key, value| allowed.contains(&key.as_str()) && !value.is_empty());
        Self { entries }
    }

    /// Canonical re-encoding: sorted keys, percent-encoded. The inverse of
    /// [`Criteria::from_query`] for callers persisting state.
    pub fn to_query(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.entries {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Canonical `key:value|key:value` rendering (sorted by key), used as the
    /// criteria component of facet cache keys.
    pub fn canonical(&self) -> String {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|(key, value)| format!("{key}:{value}"))
            .collect();
        parts.join("|")
    }

    /// Insert or replace a filter. An empty value clears the entry instead.
    pub fn insert(&mut self, column: impl Into<ColumnId>, filter: impl Into<String>) {
        let column = column.into();
        let filter = filter.into();
        if filter.is_empty() {
            self.entries.remove(&column);
        } else {
            self.entries.insert(column, filter);
        }
    }

    pub fn remove(&mut self, column: &str) -> Option<String> {
        self.entries.remove(column)
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.entries.get(column).map(String::as_str)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.entries.contains_key(column)
    }

    /// A copy with one column's criterion removed — the "all *other* active
    /// filters" view used when faceting that column.
    pub fn without_column(&self, column: &str) -> Self {
        let mut entries = self.entries.clone();
        entries.remove(column);
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, ColumnId, String> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Criteria {
    type Item = (&'a ColumnId, &'a String);
    type IntoIter = btree_map::Iter<'a, ColumnId, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(ColumnId, String)> for Criteria {
    fn from_iter<T: IntoIterator<Item = (ColumnId, String)>>(iter: T) -> Self {
        let mut criteria = Criteria::new();
        for (column, filter) in iter {
            criteria.insert(column, filter);
        }
        criteria
    }
}

fn is_control_param(key: &str) -> bool {
    CONTROL_PARAMS.contains(&key)
}

fn parse_pairs(query: &str) -> BTreeMap<ColumnId, String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut entries = BTreeMap::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        if key.is_empty() {
            continue;
        }
        // Last occurrence wins, standard query-string semantics.
        entries.insert(key.into_owned(), value.into_owned());
    }
    entries
}
