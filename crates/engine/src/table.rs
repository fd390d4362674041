//! Filterable, sortable view over a list of JSON records.

use std::cmp::Ordering;

use groundwork_util::dates::{format_date_mmddyyyy, is_date_like_key};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub key: String,
    pub header: String,
}

impl Column {
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Rows are JSON objects; the view is the filtered, sorted list of row
/// indices and the selection always points into it.
#[derive(Debug, Default)]
pub struct ClientTable {
    columns: Vec<Column>,
    rows: Vec<Value>,
    filter: String,
    sort: Option<(usize, SortDirection)>,
    view: Vec<usize>,
    selected: usize,
}

impl ClientTable {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            ..Default::default()
        }
    }

    // Selectors
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn sort(&self) -> Option<(usize, SortDirection)> {
        self.sort
    }

    pub fn len(&self) -> usize {
        self.view.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        (!self.view.is_empty()).then_some(self.selected)
    }

    pub fn selected_row(&self) -> Option<&Value> {
        let row = *self.view.get(self.selected)?;
        self.rows.get(row)
    }

    /// Visible rows in display order.
    pub fn visible_rows(&self) -> impl Iterator<Item = &Value> {
        self.view.iter().filter_map(|index| self.rows.get(*index))
    }

    /// Display text for one cell. Date-like keys render as `MM/DD/YYYY`
    /// when they parse.
    pub fn cell_text(&self, row: &Value, column: &Column) -> String {
        let text = match row.get(&column.key) {
            None | Some(Value::Null) => return String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        };
        if is_date_like_key(&column.key) {
            return format_date_mmddyyyy(&text).unwrap_or(text);
        }
        text
    }

    // Reducers
    pub fn set_rows(&mut self, rows: Vec<Value>) {
        self.rows = rows;
        self.rebuild();
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.rebuild();
    }

    /// Sort by `column`; choosing the current sort column flips direction.
    pub fn sort_by(&mut self, column: usize) {
        if column >= self.columns.len() {
            return;
        }
        self.sort = match self.sort {
            Some((current, direction)) if current == column => Some((column, direction.toggled())),
            _ => Some((column, SortDirection::Ascending)),
        };
        self.rebuild();
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.view.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select(&mut self, index: usize) {
        self.selected = index;
        self.clamp_selection();
    }

    fn rebuild(&mut self) {
        let needle = self.filter.trim().to_lowercase();
        let mut view: Vec<usize> = (0..self.rows.len())
            .filter(|index| needle.is_empty() || self.row_matches(&self.rows[*index], &needle))
            .collect();

        if let Some((column, direction)) = self.sort
            && let Some(column) = self.columns.get(column)
        {
            view.sort_by(|a, b| compare_cells(self.rows[*a].get(&column.key), self.rows[*b].get(&column.key), direction));
        }

        self.view = view;
        self.clamp_selection();
    }

    fn row_matches(&self, row: &Value, needle: &str) -> bool {
        self.columns
            .iter()
            .any(|column| self.cell_text(row, column).to_lowercase().contains(needle))
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.view.len().saturating_sub(1));
    }
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.is_empty(),
        Some(_) => false,
    }
}

/// Missing values always sort last regardless of direction.
fn compare_cells(a: Option<&Value>, b: Option<&Value>, direction: SortDirection) -> Ordering {
    match (is_missing(a), is_missing(b)) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }
    let ordering = match (a.and_then(Value::as_f64), b.and_then(Value::as_f64)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => sort_key(a).cmp(&sort_key(b)),
    };
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

fn sort_key(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.to_lowercase(),
        Some(other) => other.to_string().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn table() -> ClientTable {
        let mut table = ClientTable::new(vec![
            Column::new("name", "Name"),
            Column::new("email", "Email"),
            Column::new("quantity", "Qty"),
            Column::new("contactDate", "Contacted"),
        ]);
        table.set_rows(vec![
            json!({"_id": "a", "name": "bob", "email": "bob@x.com", "quantity": 10, "contactDate": "2024-03-01T17:05:09.000Z"}),
            json!({"_id": "b", "name": "Alice", "email": "alice@y.org", "quantity": 9}),
            json!({"_id": "c", "email": "nobody@x.com", "quantity": 100}),
        ]);
        table
    }

    fn names(table: &ClientTable) -> Vec<String> {
        table
            .visible_rows()
            .map(|row| row["_id"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn filter_is_case_insensitive_across_columns() {
        let mut table = table();
        table.set_filter("X.COM");
        assert_eq!(names(&table), ["a", "c"]);
        table.set_filter("alice");
        assert_eq!(names(&table), ["b"]);
        table.set_filter("  ");
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn strings_sort_case_insensitively_with_missing_last() {
        let mut table = table();
        table.sort_by(0);
        assert_eq!(names(&table), ["b", "a", "c"]);
        table.sort_by(0);
        assert_eq!(table.sort(), Some((0, SortDirection::Descending)));
        assert_eq!(names(&table), ["a", "b", "c"]);
    }

    #[test]
    fn numbers_sort_numerically() {
        let mut table = table();
        table.sort_by(2);
        assert_eq!(names(&table), ["b", "a", "c"]);
    }

    #[test]
    fn selection_stays_inside_the_view() {
        let mut table = table();
        table.select(2);
        assert_eq!(table.selected_index(), Some(2));
        table.set_filter("alice");
        assert_eq!(table.selected_index(), Some(0));
        assert_eq!(table.selected_row().unwrap()["_id"], "b");
        table.select_next();
        assert_eq!(table.selected_index(), Some(0));

        table.set_filter("zzz");
        assert_eq!(table.selected_index(), None);
        assert!(table.selected_row().is_none());
    }

    #[test]
    fn date_columns_render_as_us_dates() {
        let table = table();
        let rows: Vec<_> = table.visible_rows().cloned().collect();
        let date = &table.columns()[3];
        assert_eq!(table.cell_text(&rows[0], date), "03/01/2024");
        assert_eq!(table.cell_text(&rows[1], date), "");
        assert_eq!(table.cell_text(&rows[0], &table.columns()[2]), "10");
    }
}
