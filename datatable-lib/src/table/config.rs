//! Table configuration

use serde::Deserialize;
use serde::Serialize;

/// Default number of rows per page.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Configuration for a table view.
///
/// # Example
///
/// ```
/// use datatable_lib::TableConfig;
///
/// let config = TableConfig::default()
///     .with_items_per_page(50)
///     .with_search_min_chars(2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Rows shown per page. Never zero.
    ///
    /// Default: 20
    pub items_per_page: usize,

    /// Minimum trimmed length before the global search applies.
    ///
    /// Default: 0
    pub search_min_chars: usize,

    /// Page sizes offered to the user.
    ///
    /// Default: 10, 20, 50, 100
    pub page_size_options: Vec<usize>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            search_min_chars: 0,
            page_size_options: vec![10, 20, 50, 100],
        }
    }
}

impl TableConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size. Zero is raised to one.
    pub fn with_items_per_page(mut self, items_per_page: usize) -> Self {
        self.items_per_page = items_per_page.max(1);
        self
    }

    /// Sets the minimum search length.
    pub fn with_search_min_chars(mut self, min_chars: usize) -> Self {
        self.search_min_chars = min_chars;
        self
    }

    /// Sets the page size options.
    pub fn with_page_size_options(mut self, options: impl Into<Vec<usize>>) -> Self {
        self.page_size_options = options.into();
        self
    }

    /// Page size guarded against zero, for configs built by deserialization.
    pub fn page_size(&self) -> usize {
        self.items_per_page.max(1)
    }
}
