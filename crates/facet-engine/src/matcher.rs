use facet_model::{ColumnValue, Row, ToleranceConfig};

use crate::criteria::Criteria;

/// Decide whether a column value satisfies a single filter string.
///
/// A comma splits the filter into OR-ed alternatives; each part is trimmed
/// and compared independently, with the tolerance applied per part. Absent
/// values and empty filters never match. All malformed input degrades to
/// `false` rather than panicking.
pub fn matches(value: Option<&ColumnValue>, filter: &str, tolerance: f64) -> bool {
    let Some(value) = value else {
        return false;
    };
    if filter.is_empty() {
        return false;
    }

    if filter.contains(',') {
        return filter
            .split(',')
            .map(str::trim)
            .any(|part| matches_part(value, part, tolerance));
    }
    matches_part(value, filter, tolerance)
}

fn matches_part(value: &ColumnValue, filter: &str, tolerance: f64) -> bool {
    if filter.is_empty() {
        return false;
    }

    match value {
        // Option names compare exactly (case-sensitive), unlike free text.
        ColumnValue::MultiSelect(options) => options.iter().any(|o| o.name == filter),
        ColumnValue::Select(option) => option.name == filter,
        ColumnValue::Text(text) => contains_case_insensitive(text, filter),
        ColumnValue::Number(n) => number_matches(*n, filter, tolerance),
    }
}

fn number_matches(value: f64, filter: &str, tolerance: f64) -> bool {
    let Ok(wanted) = filter.trim().parse::<f64>() else {
        return false;
    };
    if tolerance > 0.0 {
        // Inclusive on both ends.
        value >= wanted - tolerance && value <= wanted + tolerance
    } else {
        value == wanted
    }
}

fn contains_case_insensitive(haystack: &str, needle: &str) -> bool {
    if haystack.is_ascii() && needle.is_ascii() {
        return ascii_contains_case_insensitive(haystack, needle);
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn ascii_contains_case_insensitive(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    if needle.len() > haystack.len() {
        return false;
    }
    for i in 0..=haystack.len() - needle.len() {
        if haystack[i..i + needle.len()].eq_ignore_ascii_case(needle) {
            return true;
        }
    }
    false
}

/// AND across columns: a row matches iff every criterion is satisfied by the
/// row's value for that column. Empty criteria vacuously match every row; a
/// criterion whose column is absent on the row fails.
pub fn row_matches(row: &Row, criteria: &Criteria, tolerances: &ToleranceConfig) -> bool {
    criteria
        .iter()
        .all(|(column, filter)| matches(row.value(column), filter, tolerances.get(column)))
}

/// Stable filter: the sub-sequence of `rows` matching `criteria`, in their
/// original relative order.
pub fn filter_rows<'a>(
    rows: &'a [Row],
    criteria: &Criteria,
    tolerances: &ToleranceConfig,
) -> Vec<&'a Row> {
    rows.iter()
        .filter(|row| row_matches(row, criteria, tolerances))
        .collect()
}
