//! Stateful table engine.

use std::borrow::Cow;

use log::debug;

use super::Column;
use super::TableConfig;
use super::TableState;
use super::TableView;
use super::derive_view;
use super::find_column;
use crate::model::Row;
use crate::model::Value;

/// A table view-model: input rows, columns, config and view state.
///
/// Every derived output is recomputed from the current inputs on access.
/// Nothing here fails: unknown column keys, out-of-range pages and rows
/// missing fields all degrade to empty or absent values.
///
/// # Example
///
/// ```
/// use datatable_lib::{Column, TableEngine};
/// use datatable_lib::model::Record;
///
/// let data = vec![
///     Record::new().set("name", "Charlie"),
///     Record::new().set("name", "Alice"),
/// ];
/// let mut engine = TableEngine::new(data, vec![Column::new("name").sortable()]);
///
/// engine.handle_sort("name");
/// let names: Vec<_> = engine
///     .paginated_data()
///     .iter()
///     .map(|r| r.get_string("name").unwrap().unwrap().to_string())
///     .collect();
/// assert_eq!(names, ["Alice", "Charlie"]);
/// ```
#[derive(Debug, Clone)]
pub struct TableEngine<R> {
    data: Vec<R>,
    columns: Vec<Column<R>>,
    config: TableConfig,
    state: TableState,
}

impl<R: Row> TableEngine<R> {
    /// Creates an engine with default config and fresh state.
    pub fn new(data: Vec<R>, columns: Vec<Column<R>>) -> Self {
        Self {
            data,
            columns,
            config: TableConfig::default(),
            state: TableState::default(),
        }
    }

    /// Sets the config (builder pattern).
    pub fn with_config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the page size (builder pattern). Zero is raised to one.
    pub fn with_items_per_page(mut self, items_per_page: usize) -> Self {
        self.config = self.config.with_items_per_page(items_per_page);
        self
    }

    /// Starts from an existing state (builder pattern).
    pub fn with_state(mut self, state: TableState) -> Self {
        self.state = state;
        self
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    pub fn data(&self) -> &[R] {
        &self.data
    }

    /// Replaces the rows, e.g. after the source refreshed. State is kept.
    pub fn set_data(&mut self, data: Vec<R>) {
        self.data = data;
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    /// Replaces the columns. State is kept.
    pub fn set_columns(&mut self, columns: Vec<Column<R>>) {
        self.columns = columns;
    }

    pub fn column(&self, key: &str) -> Option<&Column<R>> {
        find_column(&self.columns, key)
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn items_per_page(&self) -> usize {
        self.config.page_size()
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Sorts by a column; repeating the current field flips the direction.
    pub fn handle_sort(&mut self, field: &str) {
        self.note_unknown_key("sort", field);
        self.state.handle_sort(field);
        debug!(
            "sort: field={} direction={:?}",
            field, self.state.sort_direction
        );
    }

    /// Sets a column filter and returns to the first page.
    pub fn handle_filter(&mut self, column: &str, value: &str) {
        self.note_unknown_key("filter", column);
        self.state.handle_filter(column, value);
        debug!("filter: column={} value={:?}", column, value);
    }

    /// Moves to a page without bounds checking.
    pub fn handle_page_change(&mut self, page: usize) {
        self.state.handle_page_change(page);
        debug!("page: {}", page);
    }

    /// Clears all column filters and returns to the first page.
    pub fn reset_filters(&mut self) {
        self.state.reset_filters();
        debug!("filters reset");
    }

    /// Sets the global search text and returns to the first page.
    pub fn handle_search(&mut self, value: &str) {
        self.state.handle_search(value);
        debug!("search: {:?}", value);
    }

    pub fn clear_search(&mut self) {
        self.state.clear_search();
        debug!("search cleared");
    }

    /// Changes the page size and returns to the first page.
    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.config.items_per_page = items_per_page.max(1);
        self.state.current_page = 1;
        debug!("page size: {}", self.config.items_per_page);
    }

    // Unknown keys stay in state and are skipped by derivation.
    fn note_unknown_key(&self, action: &str, key: &str) {
        if self.column(key).is_none() {
            debug!("{}: no column with key '{}', ignored by the view", action, key);
        }
    }

    // =========================================================================
    // Derived outputs
    // =========================================================================

    /// Resolves a column's value for a row.
    pub fn resolve_value<'a>(&self, row: &'a R, column: &Column<R>) -> Option<Cow<'a, Value>> {
        column.resolve(row)
    }

    /// Derives the full view for the current state.
    pub fn view(&self) -> TableView<'_, R> {
        derive_view(&self.data, &self.columns, &self.state, &self.config)
    }

    pub fn filtered_and_sorted_data(&self) -> Vec<&R> {
        self.view().into_rows()
    }

    pub fn paginated_data(&self) -> Vec<&R> {
        self.view().page_rows().to_vec()
    }

    pub fn current_page(&self) -> usize {
        self.state.current_page
    }

    pub fn total_items(&self) -> usize {
        self.view().total_items()
    }

    pub fn total_pages(&self) -> usize {
        self.view().total_pages()
    }

    pub fn start_index(&self) -> usize {
        self.view().start_index()
    }

    pub fn end_index(&self) -> usize {
        self.view().end_index()
    }
}
