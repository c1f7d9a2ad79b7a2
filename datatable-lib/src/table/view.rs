//! Pure derivation of the filtered, sorted and paginated view.

use std::fmt;
use std::ops::RangeInclusive;

use log::trace;

use super::Column;
use super::SortKey;
use super::TableConfig;
use super::TableState;
use super::compare;
use super::find_column;
use crate::model::Row;

/// Derives the view of `data` for the given state.
///
/// Filters (AND across column keys), applies the global search, sorts a copy
/// when a known sort column is set, then paginates. Filter and sort keys that
/// match no column are ignored. The input is never reordered.
pub fn derive_view<'a, R: Row>(
    data: &'a [R],
    columns: &[Column<R>],
    state: &TableState,
    config: &TableConfig,
) -> TableView<'a, R> {
    let mut rows: Vec<&'a R> = data.iter().collect();

    for (key, needle) in state.active_filters() {
        let Some(column) = find_column(columns, key) else {
            continue;
        };
        let needle = needle.to_lowercase();
        rows.retain(|row| column.text(row).to_lowercase().contains(&needle));
    }

    let search = state.search.trim();
    if !search.is_empty() && search.chars().count() >= config.search_min_chars {
        let needle = search.to_lowercase();
        rows.retain(|row| {
            columns
                .iter()
                .any(|column| column.text(row).to_lowercase().contains(&needle))
        });
    }

    if let Some(column) = state.sort_field.as_deref().and_then(|key| find_column(columns, key)) {
        rows = sort_rows(rows, column, state);
    }

    trace!(
        "derived view: {} of {} rows, page {}",
        rows.len(),
        data.len(),
        state.current_page
    );

    TableView {
        rows,
        current_page: state.current_page,
        items_per_page: config.page_size(),
    }
}

fn sort_rows<'a, R: Row>(rows: Vec<&'a R>, column: &Column<R>, state: &TableState) -> Vec<&'a R> {
    let mut keyed: Vec<(SortKey, &'a R)> = rows
        .into_iter()
        .map(|row| (SortKey::normalize(column.resolve(row).as_deref()), row))
        .collect();
    // Stable: equal keys keep input order.
    keyed.sort_by(|(a, _), (b, _)| compare(a, b, state.sort_direction));
    keyed.into_iter().map(|(_, row)| row).collect()
}

/// A derived view over borrowed rows.
#[derive(Debug)]
pub struct TableView<'a, R> {
    rows: Vec<&'a R>,
    current_page: usize,
    items_per_page: usize,
}

impl<'a, R> TableView<'a, R> {
    /// Returns every row that survived filtering, in sorted order.
    pub fn rows(&self) -> &[&'a R] {
        &self.rows
    }

    /// Consumes the view and returns the filtered, sorted rows.
    pub fn into_rows(self) -> Vec<&'a R> {
        self.rows
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn total_items(&self) -> usize {
        self.rows.len()
    }

    pub fn total_pages(&self) -> usize {
        self.total_items().div_ceil(self.items_per_page)
    }

    /// Zero-based offset of the current page's first row.
    fn offset(&self) -> usize {
        self.current_page
            .saturating_sub(1)
            .saturating_mul(self.items_per_page)
    }

    /// 1-based index of the first row on the current page.
    pub fn start_index(&self) -> usize {
        self.offset().saturating_add(1)
    }

    /// 1-based index of the last row on the current page, clamped to the total.
    /// Zero for page 0, which shows no rows.
    pub fn end_index(&self) -> usize {
        if self.current_page == 0 {
            return 0;
        }
        self.offset()
            .saturating_add(self.items_per_page)
            .min(self.total_items())
    }

    /// Rows on the current page. Empty past the last page.
    pub fn page_rows(&self) -> &[&'a R] {
        if self.current_page == 0 {
            return &[];
        }
        let start = self.offset().min(self.rows.len());
        let end = start.saturating_add(self.items_per_page).min(self.rows.len());
        &self.rows[start..end]
    }

    /// Range summary for a "Showing x to y of z" footer.
    pub fn summary(&self) -> PageSummary {
        let total = self.total_items();
        if total == 0 {
            return PageSummary::default();
        }
        PageSummary {
            start: self.start_index(),
            end: self.end_index(),
            total,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Target of a "previous" control.
    pub fn previous_page(&self) -> usize {
        self.current_page.saturating_sub(1).max(1)
    }

    /// Target of a "next" control.
    pub fn next_page(&self) -> usize {
        (self.current_page + 1).min(self.total_pages()).max(1)
    }

    /// Page numbers offered to the user.
    pub fn page_numbers(&self) -> RangeInclusive<usize> {
        1..=self.total_pages()
    }
}

/// Displayed row range of the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageSummary {
    pub start: usize,
    pub end: usize,
    pub total: usize,
}

impl fmt::Display for PageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {} to {} of {} results", self.start, self.end, self.total)
    }
}
