//! Mutable view state and the actions that drive it.

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use super::Direction;

/// State of one table view: page, sort and filters.
///
/// Created fresh per view and discarded with it. Actions mutate the state;
/// rows are derived from it by [`derive_view`](super::derive_view).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableState {
    /// 1-based page number.
    pub current_page: usize,
    /// Key of the column rows are sorted by.
    pub sort_field: Option<String>,
    pub sort_direction: Direction,
    /// Raw filter text per column key.
    pub filters: HashMap<String, String>,
    /// Global search text matched against every column.
    pub search: String,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            current_page: 1,
            sort_field: None,
            sort_direction: Direction::Asc,
            filters: HashMap::new(),
            search: String::new(),
        }
    }
}

impl TableState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorts by a column, flipping direction when it is already the sort field.
    pub fn handle_sort(&mut self, field: &str) {
        if self.sort_field.as_deref() == Some(field) {
            self.sort_direction = self.sort_direction.toggle();
        } else {
            self.sort_field = Some(field.to_string());
            self.sort_direction = Direction::Asc;
        }
    }

    /// Stores a column filter verbatim and returns to the first page.
    pub fn handle_filter(&mut self, column: &str, value: &str) {
        self.filters.insert(column.to_string(), value.to_string());
        self.current_page = 1;
    }

    /// Moves to a page. No bounds are enforced.
    pub fn handle_page_change(&mut self, page: usize) {
        self.current_page = page;
    }

    /// Clears all column filters and returns to the first page.
    pub fn reset_filters(&mut self) {
        self.filters.clear();
        self.current_page = 1;
    }

    /// Sets the global search text and returns to the first page.
    pub fn handle_search(&mut self, value: &str) {
        self.search = value.to_string();
        self.current_page = 1;
    }

    pub fn clear_search(&mut self) {
        self.handle_search("");
    }

    /// Filters whose text is non-empty after trimming.
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn active_filter_count(&self) -> usize {
        self.active_filters().count()
    }
}
