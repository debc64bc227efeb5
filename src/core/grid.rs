//! Filterable, sortable projection over a set of report rows.
//!
//! The grid owns display state only (active sort key, per-column sticky
//! direction, filter text). It never owns or mutates the rows it projects.

use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;

/// One record of displayable data, keyed by column name. Rows are not
/// required to share identical key sets.
pub type Row = serde_json::Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Grid display state.
///
/// At most one column is active at a time; each column's direction is
/// sticky, preserved even while another column is active.
#[derive(Debug, Clone)]
pub struct Grid {
    columns: Vec<String>,
    sort_orders: HashMap<String, SortDirection>,
    sort_key: Option<String>,
    filter_text: String,
}

impl Grid {
    pub fn new(columns: Vec<String>) -> Self {
        let sort_orders = columns
            .iter()
            .map(|name| (name.clone(), SortDirection::Ascending))
            .collect();
        Self {
            columns,
            sort_orders,
            sort_key: None,
            filter_text: String::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn sort_key(&self) -> Option<&str> {
        self.sort_key.as_deref()
    }

    pub fn direction(&self, column: &str) -> SortDirection {
        self.sort_orders.get(column).copied().unwrap_or_default()
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter_text = text.into();
    }

    /// Choose `column` as the active sort key.
    ///
    /// Re-selecting the active column flips its stored direction. Selecting
    /// a different column activates it without resetting its stored
    /// direction.
    pub fn set_sort_key(&mut self, column: &str) {
        if self.sort_key.as_deref() == Some(column) {
            let direction = self
                .sort_orders
                .entry(column.to_string())
                .or_default();
            *direction = direction.flipped();
        } else {
            self.sort_orders.entry(column.to_string()).or_default();
            self.sort_key = Some(column.to_string());
        }
    }

    /// Compute the displayed projection: filter first, then a stable sort.
    ///
    /// Filtering before sorting keeps the displayed set identical no matter
    /// which order a caller reasons about. Produces a fresh sequence each
    /// call and never mutates `rows`.
    pub fn compute_view<'a>(&self, rows: &'a [Row]) -> Vec<&'a Row> {
        let mut view: Vec<&Row> = if self.filter_text.is_empty() {
            rows.iter().collect()
        } else {
            let needle = self.filter_text.to_lowercase();
            rows.iter()
                .filter(|row| {
                    row.values()
                        .any(|value| cell_text(Some(value)).to_lowercase().contains(&needle))
                })
                .collect()
        };

        if let Some(key) = &self.sort_key {
            let direction = self.direction(key);
            view.sort_by(|a, b| {
                let ordering = compare_cells(a.get(key.as_str()), b.get(key.as_str()));
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }

        view
    }
}

/// String form of a cell. An absent cell reads as `"undefined"`; this is the
/// single place that behavior is defined for filter, sort, and display.
pub fn cell_text(cell: Option<&Value>) -> String {
    match cell {
        None => "undefined".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) => "null".to_string(),
        Some(value) => value.to_string(),
    }
}

/// Three-way comparison between two cells: numbers numerically, strings
/// lexically, anything else by string form.
fn compare_cells(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let xa = x.as_f64().unwrap_or(f64::NAN);
            let ya = y.as_f64().unwrap_or(f64::NAN);
            xa.partial_cmp(&ya).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => cell_text(a).cmp(&cell_text(b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(pairs: &[(&str, Value)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn metareport_rows() -> Vec<Row> {
        vec![
            row(&[("component", json!("A")), ("support", json!("9000"))]),
            row(&[("component", json!("B")), ("support", json!("7000"))]),
        ]
    }

    fn grid_columns() -> Vec<String> {
        vec!["component".to_string(), "support".to_string()]
    }

    fn components(view: &[&Row]) -> Vec<String> {
        view.iter()
            .map(|r| cell_text(r.get("component")))
            .collect()
    }

    #[test]
    fn test_no_filter_no_sort_preserves_order() {
        let rows = metareport_rows();
        let grid = Grid::new(grid_columns());
        let view = grid.compute_view(&rows);
        assert_eq!(components(&view), vec!["A", "B"]);
    }

    #[test]
    fn test_sort_key_activation_ascending_then_toggle() {
        let rows = metareport_rows();
        let mut grid = Grid::new(grid_columns());

        grid.set_sort_key("support");
        let view = grid.compute_view(&rows);
        assert_eq!(components(&view), vec!["B", "A"]);

        grid.set_sort_key("support");
        let view = grid.compute_view(&rows);
        assert_eq!(components(&view), vec!["A", "B"]);
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let rows = metareport_rows();
        let mut grid = Grid::new(grid_columns());
        grid.set_filter("b");
        let view = grid.compute_view(&rows);
        assert_eq!(components(&view), vec!["B"]);
    }

    #[test]
    fn test_filter_by_cell_substring_includes_row() {
        let rows = vec![
            row(&[
                ("component", json!("network/ios")),
                ("maintainers", json!("alice bob")),
            ]),
            row(&[
                ("component", json!("cloud/amazon")),
                ("maintainers", json!("carol")),
            ]),
        ];
        let mut grid = Grid::new(vec!["component".to_string(), "maintainers".to_string()]);
        grid.set_filter("BOB");
        let view = grid.compute_view(&rows);
        assert_eq!(view.len(), 1);
        assert_eq!(cell_text(view[0].get("component")), "network/ios");
    }

    #[test]
    fn test_filter_with_absent_text_yields_empty_view() {
        let rows = metareport_rows();
        let mut grid = Grid::new(grid_columns());
        grid.set_filter("no such value");
        assert!(grid.compute_view(&rows).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let rows = metareport_rows();
        let mut grid = Grid::new(grid_columns());
        grid.set_filter("9000");

        let once = components(&grid.compute_view(&rows));
        let narrowed: Vec<Row> = grid.compute_view(&rows).into_iter().cloned().collect();
        let twice = components(&grid.compute_view(&narrowed));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_sort_is_stable_for_equal_values() {
        let rows = vec![
            row(&[("component", json!("A")), ("support", json!("core"))]),
            row(&[("component", json!("B")), ("support", json!("core"))]),
            row(&[("component", json!("C")), ("support", json!("community"))]),
        ];
        let mut grid = Grid::new(grid_columns());
        grid.set_sort_key("support");
        let view = grid.compute_view(&rows);
        // "community" < "core"; A and B keep their relative order
        assert_eq!(components(&view), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_direction_is_sticky_across_key_changes() {
        let rows = metareport_rows();
        let mut grid = Grid::new(grid_columns());

        grid.set_sort_key("support");
        grid.set_sort_key("support"); // now descending
        grid.set_sort_key("component"); // activate another column
        assert_eq!(grid.direction("support"), SortDirection::Descending);
        assert_eq!(grid.direction("component"), SortDirection::Ascending);

        // Re-activating "support" keeps the stored descending direction
        grid.set_sort_key("support");
        assert_eq!(grid.direction("support"), SortDirection::Descending);
        let view = grid.compute_view(&rows);
        assert_eq!(components(&view), vec!["A", "B"]);
    }

    #[test]
    fn test_numbers_sort_numerically() {
        let rows = vec![
            row(&[("component", json!("A")), ("support", json!(9000))]),
            row(&[("component", json!("B")), ("support", json!(700))]),
            row(&[("component", json!("C")), ("support", json!(80))]),
        ];
        let mut grid = Grid::new(grid_columns());
        grid.set_sort_key("support");
        let view = grid.compute_view(&rows);
        assert_eq!(components(&view), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_missing_cell_reads_as_undefined() {
        assert_eq!(cell_text(None), "undefined");
        assert_eq!(cell_text(Some(&json!(null))), "null");
        assert_eq!(cell_text(Some(&json!("x"))), "x");
        assert_eq!(cell_text(Some(&json!(42))), "42");
        assert_eq!(cell_text(Some(&json!(["a", "b"]))), r#"["a","b"]"#);
    }

    #[test]
    fn test_missing_cell_sorts_by_undefined_string() {
        let rows = vec![
            row(&[("component", json!("A"))]),
            row(&[("component", json!("B")), ("support", json!("core"))]),
        ];
        let mut grid = Grid::new(grid_columns());
        grid.set_sort_key("support");
        // "core" < "undefined", so B comes first; no error raised
        let view = grid.compute_view(&rows);
        assert_eq!(components(&view), vec!["B", "A"]);
    }

    #[test]
    fn test_empty_rows_always_produce_empty_view() {
        let rows: Vec<Row> = Vec::new();
        let mut grid = Grid::new(grid_columns());
        assert!(grid.compute_view(&rows).is_empty());
        grid.set_filter("x");
        grid.set_sort_key("support");
        assert!(grid.compute_view(&rows).is_empty());
    }

    #[test]
    fn test_compute_view_does_not_mutate_input() {
        let rows = metareport_rows();
        let mut grid = Grid::new(grid_columns());
        grid.set_sort_key("support");
        let _ = grid.compute_view(&rows);
        assert_eq!(components(&rows.iter().collect::<Vec<_>>()), vec!["A", "B"]);
    }

    #[test]
    fn test_filter_then_sort_matches_sort_then_filter_membership() {
        let rows = vec![
            row(&[("component", json!("net_a")), ("support", json!("3"))]),
            row(&[("component", json!("net_b")), ("support", json!("1"))]),
            row(&[("component", json!("other")), ("support", json!("2"))]),
        ];
        let mut grid = Grid::new(grid_columns());
        grid.set_filter("net");
        grid.set_sort_key("support");
        let view = grid.compute_view(&rows);
        assert_eq!(components(&view), vec!["net_b", "net_a"]);
    }
}
