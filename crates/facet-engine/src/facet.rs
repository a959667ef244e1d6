use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use facet_model::{format_number, ColumnId, ColumnValue, Row, SelectOption, ToleranceConfig};
use serde::{Deserialize, Serialize};

use crate::criteria::Criteria;
use crate::matcher::row_matches;
use crate::ordering::{sort_options, OrderingEntry};

/// One distinct column value with its live result count: how many rows would
/// match if every *other* active criterion were applied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FacetOption {
    #[serde(flatten)]
    pub option: SelectOption,
    pub quantity: u64,
}

impl FacetOption {
    pub fn new(option: SelectOption) -> Self {
        Self {
            option,
            quantity: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.option.name
    }
}

/// Per-column display orderings, keyed by column id.
pub type Orderings = HashMap<ColumnId, Vec<OrderingEntry>>;

/// The option identities a row exhibits for one column. Scalar shapes
/// synthesize a minimal option record from the rendered value.
fn exhibited_options(value: &ColumnValue) -> Vec<SelectOption> {
    match value {
        ColumnValue::MultiSelect(options) => options.clone(),
        ColumnValue::Select(option) => vec![option.clone()],
        ColumnValue::Text(text) => vec![SelectOption::synthetic(text.clone())],
        ColumnValue::Number(n) => vec![SelectOption::synthetic(format_number(*n))],
    }
}

/// Facet one column: enumerate every distinct option identity seen across
/// the full dataset (deduplicated by name, first-seen record wins), then
/// count, per option, the rows that match all criteria *except* this
/// column's own. The result is sorted per the ordering policy.
pub fn facet_options(
    rows: &[Row],
    column: &str,
    criteria: &Criteria,
    tolerances: &ToleranceConfig,
    ordering: Option<&[OrderingEntry]>,
) -> Vec<FacetOption> {
    let mut options: Vec<FacetOption> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    // First pass: distinct identities across all rows, regardless of the
    // current filter state.
    for row in rows {
        let Some(value) = row.value(column) else {
            continue;
        };
        for option in exhibited_options(value) {
            if !index.contains_key(&option.name) {
                index.insert(option.name.clone(), options.len());
                options.push(FacetOption::new(option));
            }
        }
    }

    // Second pass: quantities under the other active criteria. A row
    // increments each of its distinct options once (a multi-select row can
    // carry the same name twice; it still counts as one row).
    let other = criteria.without_column(column);
    let mut seen_in_row: HashSet<String> = HashSet::new();
    for row in rows {
        let Some(value) = row.value(column) else {
            continue;
        };
        if !row_matches(row, &other, tolerances) {
            continue;
        }

        seen_in_row.clear();
        for option in exhibited_options(value) {
            if seen_in_row.insert(option.name.clone()) {
                if let Some(&slot) = index.get(&option.name) {
                    options[slot].quantity += 1;
                }
            }
        }
    }

    sort_options(&mut options, ordering);
    options
}

/// Facet every column appearing anywhere in the dataset. Each column's own
/// criterion is excluded from its count pass; orderings apply per column.
pub fn facet_all(
    rows: &[Row],
    criteria: &Criteria,
    tolerances: &ToleranceConfig,
    orderings: &Orderings,
) -> BTreeMap<ColumnId, Vec<FacetOption>> {
    let columns: BTreeSet<&str> = rows
        .iter()
        .flat_map(|row| row.values.keys().map(String::as_str))
        .collect();

    columns
        .into_iter()
        .map(|column| {
            let ordering = orderings.get(column).map(Vec::as_slice);
            (
                column.to_string(),
                facet_options(rows, column, criteria, tolerances, ordering),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn multi_row(column: &str, names: &[&str]) -> Row {
        let mut row = Row::default();
        row.values.insert(
            column.into(),
            ColumnValue::MultiSelect(names.iter().map(|n| SelectOption::new(*n)).collect()),
        );
        row
    }

    fn select_row(column: &str, name: &str) -> Row {
        let mut row = Row::default();
        row.values
            .insert(column.into(), ColumnValue::Select(SelectOption::new(name)));
        row
    }

    fn quantities(options: &[FacetOption]) -> Vec<(&str, u64)> {
        options
            .iter()
            .map(|o| (o.name(), o.quantity))
            .collect()
    }

    #[test]
    fn shared_select_option_counts_each_row() {
        let rows = vec![
            select_row("document_type", "PDF"),
            select_row("document_type", "PDF"),
        ];
        let options = facet_options(
            &rows,
            "document_type",
            &Criteria::new(),
            &ToleranceConfig::new(),
            None,
        );
        assert_eq!(quantities(&options), vec![("PDF", 2)]);
    }

    #[test]
    fn multi_select_rows_increment_each_exhibited_option_once() {
        let rows = vec![
            multi_row("family", &["HPLC", "AIA-CL"]),
            multi_row("family", &["HPLC", "HPLC"]),
        ];
        let options = facet_options(
            &rows,
            "family",
            &Criteria::new(),
            &ToleranceConfig::new(),
            None,
        );
        // Duplicate names within one row count that row once.
        assert_eq!(quantities(&options), vec![("AIA-CL", 1), ("HPLC", 2)]);
    }

    #[test]
    fn own_column_criterion_is_excluded_from_counts() {
        let mut rows = vec![
            multi_row("family", &["HPLC"]),
            multi_row("family", &["AIA-CL"]),
        ];
        rows[0]
            .values
            .insert("kind".into(), ColumnValue::Select(SelectOption::new("PDF")));
        rows[1]
            .values
            .insert("kind".into(), ColumnValue::Select(SelectOption::new("PDF")));

        let mut criteria = Criteria::new();
        criteria.insert("family", "HPLC");

        // Faceting `family` ignores the family filter itself, so both options
        // keep their unfiltered counts.
        let family = facet_options(&rows, "family", &criteria, &ToleranceConfig::new(), None);
        assert_eq!(quantities(&family), vec![("AIA-CL", 1), ("HPLC", 1)]);

        // Faceting `kind` applies the family filter: only the HPLC row remains.
        let kind = facet_options(&rows, "kind", &criteria, &ToleranceConfig::new(), None);
        assert_eq!(quantities(&kind), vec![("PDF", 1)]);
    }

    #[test]
    fn identities_come_from_the_full_dataset_even_when_filtered_out() {
        let mut rows = vec![select_row("kind", "PDF"), select_row("kind", "CSV")];
        rows[0]
            .values
            .insert("family".into(), ColumnValue::Text("HPLC".into()));

        let mut criteria = Criteria::new();
        criteria.insert("family", "HPLC");

        // The CSV row fails the family filter, but CSV still appears with a
        // zero quantity rather than vanishing from the facet list.
        let kind = facet_options(&rows, "kind", &criteria, &ToleranceConfig::new(), None);
        assert_eq!(quantities(&kind), vec![("CSV", 0), ("PDF", 1)]);
    }

    #[test]
    fn scalar_columns_synthesize_options() {
        let mut row_a = Row::default();
        row_a
            .values
            .insert("pressure".into(), ColumnValue::Number(2.0));
        let mut row_b = Row::default();
        row_b
            .values
            .insert("pressure".into(), ColumnValue::Number(10.0));

        let options = facet_options(
            &[row_a, row_b],
            "pressure",
            &Criteria::new(),
            &ToleranceConfig::new(),
            None,
        );
        // All-numeric names sort ascending by value, not lexically.
        assert_eq!(quantities(&options), vec![("2", 1), ("10", 1)]);
        assert_eq!(options[0].option.label.as_deref(), Some("2"));
    }

    #[test]
    fn rows_without_the_column_contribute_nothing() {
        let rows = vec![select_row("kind", "PDF"), Row::default()];
        let options = facet_options(
            &rows,
            "kind",
            &Criteria::new(),
            &ToleranceConfig::new(),
            None,
        );
        assert_eq!(quantities(&options), vec![("PDF", 1)]);
    }

    #[test]
    fn facet_all_covers_every_column() {
        let mut row = select_row("kind", "PDF");
        row.values
            .insert("family".into(), ColumnValue::Text("HPLC".into()));
        let rows = vec![row, select_row("kind", "CSV")];

        let all = facet_all(
            &rows,
            &Criteria::new(),
            &ToleranceConfig::new(),
            &Orderings::new(),
        );
        assert_eq!(
            all.keys().collect::<Vec<_>>(),
            vec![&"family".to_string(), &"kind".to_string()]
        );
        assert_eq!(quantities(&all["kind"]), vec![("CSV", 1), ("PDF", 1)]);
        assert_eq!(quantities(&all["family"]), vec![("HPLC", 1)]);
    }

    #[test]
    fn first_seen_option_record_wins_for_an_identity() {
        let mut first = SelectOption::new("PDF");
        first.id = Some("1".into());
        let mut second = SelectOption::new("PDF");
        second.id = Some("999".into());

        let mut row_a = Row::default();
        row_a
            .values
            .insert("kind".into(), ColumnValue::Select(first));
        let mut row_b = Row::default();
        row_b
            .values
            .insert("kind".into(), ColumnValue::Select(second));

        let options = facet_options(
            &[row_a, row_b],
            "kind",
            &Criteria::new(),
            &ToleranceConfig::new(),
            None,
        );
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].option.id.as_deref(), Some("1"));
        assert_eq!(options[0].quantity, 2);
    }
}
