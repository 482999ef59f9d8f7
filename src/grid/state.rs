use std::collections::HashMap;

use super::{
    search,
    sort::{
        self,
        Column,
        SortDirection,
    },
};
use crate::core::TermRecord;

/// Backing store of term records plus the transient filter/sort state of the grid.
///
/// The view is never cached: [`GridState::derive`] recomputes it from the records and
/// the current state on every call, so it is safe to call once per frame.
#[derive(Debug, Clone, Default)]
pub struct GridState {
    records: Vec<TermRecord>,
    search: String,
    sort_key: Option<Column>,
    sort_orders: HashMap<Column, SortDirection>,
}

impl GridState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<TermRecord>) -> Self {
        Self { records, ..Self::default() }
    }

    pub fn set_records(&mut self, records: Vec<TermRecord>) {
        self.records = records;
    }

    pub fn records(&self) -> &[TermRecord] {
        &self.records
    }

    pub fn set_filter(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort_key(&self) -> Option<Column> {
        self.sort_key
    }

    /// Direction the column sorts in, or `None` if it has never been chosen.
    pub fn sort_direction(&self, column: Column) -> Option<SortDirection> {
        self.sort_orders.get(&column).copied()
    }

    /// Makes `column` the active sort key and flips its direction. A column that was
    /// never chosen before starts ascending; afterwards every call flips it, including
    /// when coming back to it from another column.
    pub fn toggle_sort(&mut self, column: Column) {
        self.sort_key = Some(column);
        self.sort_orders
            .entry(column)
            .and_modify(|direction| *direction = direction.reversed())
            .or_insert(SortDirection::Ascending);
    }

    /// String-keyed variant of [`GridState::toggle_sort`]. Unknown keys are ignored.
    pub fn toggle_sort_key(&mut self, key: &str) {
        if let Some(column) = Column::from_key(key) {
            self.toggle_sort(column);
        }
    }

    pub fn clear_sort(&mut self) {
        self.sort_key = None;
    }

    /// Positions of the visible records in the backing store, filtered then sorted.
    pub fn visible_indices(&self) -> Vec<usize> {
        let query = self.search.to_lowercase();

        let mut indices: Vec<usize> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| search::matches_search(record, &query))
            .map(|(idx, _)| idx)
            .collect();

        if let Some(column) = self.sort_key {
            let direction = self.sort_direction(column).unwrap_or(SortDirection::Ascending);
            sort::sort_indices(&mut indices, &self.records, column, direction);
        }

        indices
    }

    pub fn derive(&self) -> Vec<&TermRecord> {
        self.visible_indices().into_iter().map(|idx| &self.records[idx]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        content: &str,
        forgot_counter: u32,
        sdate: i64,
        ndate: i64,
        status: &str,
    ) -> TermRecord {
        TermRecord {
            content: content.to_string(),
            forgot_counter,
            sdate,
            ndate,
            status: status.to_string(),
            fdate: 0,
        }
    }

    fn sample() -> GridState {
        GridState::with_records(vec![
            record("a", 2, 10, 20, "due"),
            record("b", 5, 5, 30, "new"),
        ])
    }

    fn contents(view: &[&TermRecord]) -> Vec<String> {
        view.iter().map(|record| record.content.clone()).collect()
    }

    #[test]
    fn test_filter_example() {
        let mut grid = sample();
        grid.set_filter("a");
        assert_eq!(contents(&grid.derive()), vec!["a"]);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let mut grid = GridState::with_records(vec![
            record("Petrichor", 0, 1, 1, "active"),
            record("zephyr", 0, 1, 1, "ACTIVE"),
        ]);
        grid.set_filter("PETRI");
        assert_eq!(contents(&grid.derive()), vec!["Petrichor"]);

        grid.set_filter("active");
        assert_eq!(grid.derive().len(), 2);
    }

    #[test]
    fn test_empty_filter_and_no_sort_is_identity() {
        let grid = sample();
        assert_eq!(contents(&grid.derive()), vec!["a", "b"]);
    }

    #[test]
    fn test_sort_example_toggles_direction() {
        let mut grid = sample();

        grid.toggle_sort(Column::ForgotCounter);
        assert_eq!(grid.sort_direction(Column::ForgotCounter), Some(SortDirection::Ascending));
        assert_eq!(contents(&grid.derive()), vec!["a", "b"]);

        grid.toggle_sort(Column::ForgotCounter);
        assert_eq!(grid.sort_direction(Column::ForgotCounter), Some(SortDirection::Descending));
        assert_eq!(contents(&grid.derive()), vec!["b", "a"]);
    }

    #[test]
    fn test_second_toggle_is_exact_reverse_for_distinct_keys() {
        let mut grid = GridState::with_records(vec![
            record("w", 0, 40, 0, "active"),
            record("x", 0, 10, 0, "active"),
            record("y", 0, 30, 0, "active"),
            record("z", 0, 20, 0, "active"),
        ]);

        grid.toggle_sort(Column::StartDate);
        let ascending = contents(&grid.derive());
        grid.toggle_sort(Column::StartDate);
        let mut descending = contents(&grid.derive());
        descending.reverse();

        assert_eq!(ascending, vec!["x", "z", "y", "w"]);
        assert_eq!(ascending, descending);
    }

    #[test]
    fn test_switching_columns_keeps_each_columns_parity() {
        let mut grid = sample();

        grid.toggle_sort(Column::ForgotCounter); // ascending
        grid.toggle_sort(Column::NextDate); // first time: ascending
        assert_eq!(grid.sort_key(), Some(Column::NextDate));
        assert_eq!(grid.sort_direction(Column::NextDate), Some(SortDirection::Ascending));

        grid.toggle_sort(Column::ForgotCounter); // continues from its own state
        assert_eq!(grid.sort_direction(Column::ForgotCounter), Some(SortDirection::Descending));
        assert_eq!(contents(&grid.derive()), vec!["b", "a"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut grid = GridState::with_records(vec![
            record("first", 1, 0, 0, "active"),
            record("second", 0, 0, 0, "active"),
            record("third", 1, 0, 0, "active"),
            record("fourth", 0, 0, 0, "active"),
        ]);

        grid.toggle_sort(Column::ForgotCounter);
        assert_eq!(contents(&grid.derive()), vec!["second", "fourth", "first", "third"]);
    }

    #[test]
    fn test_filter_applies_before_sort_and_store_is_untouched() {
        let mut grid = GridState::with_records(vec![
            record("cat", 3, 0, 0, "active"),
            record("dog", 1, 0, 0, "active"),
            record("catalog", 2, 0, 0, "done"),
        ]);

        grid.set_filter("cat");
        grid.toggle_sort(Column::ForgotCounter);
        assert_eq!(contents(&grid.derive()), vec!["catalog", "cat"]);

        let stored: Vec<&str> = grid.records().iter().map(|r| r.content.as_str()).collect();
        assert_eq!(stored, vec!["cat", "dog", "catalog"]);
    }

    #[test]
    fn test_derive_is_idempotent() {
        let mut grid = sample();
        grid.set_filter("e");
        grid.toggle_sort(Column::Status);

        let first: Vec<TermRecord> = grid.derive().into_iter().cloned().collect();
        let second: Vec<TermRecord> = grid.derive().into_iter().cloned().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_sort_key_is_ignored() {
        let mut grid = sample();
        grid.toggle_sort_key("fdate");
        assert_eq!(grid.sort_key(), None);

        grid.toggle_sort_key("status");
        assert_eq!(grid.sort_key(), Some(Column::Status));
    }
}
