//! Column descriptors.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use super::FieldPath;
use crate::model::Row;
use crate::model::Value;

/// Computes a column's value from a row.
pub type Accessor<R> = Arc<dyn Fn(&R) -> Value + Send + Sync>;

/// Formats a column's cell for display.
pub type Renderer<R> = Arc<dyn Fn(&R, Option<&Value>) -> String + Send + Sync>;

/// Placeholder shown for cells without a value.
pub const EMPTY_CELL: &str = "-";

/// Describes one addressable facet of a row.
///
/// The key doubles as a dotted field path (`details.score`). An accessor,
/// when set, takes precedence over the path for obtaining the value.
/// `sortable` and `filterable` are hints for the presenting UI; the engine
/// sorts and filters by whatever key it is asked for.
///
/// # Examples
///
/// ```
/// use datatable_lib::Column;
/// use datatable_lib::model::{Record, Value};
///
/// let columns: Vec<Column<Record>> = vec![
///     Column::new("name").header("Client").sortable().filterable(),
///     Column::new("details.score").sortable(),
///     Column::new("initial")
///         .accessor(|r: &Record| Value::from(r.get_string("name").ok().flatten().and_then(|n| n.chars().next().map(String::from)))),
/// ];
/// ```
pub struct Column<R> {
    key: String,
    path: FieldPath,
    header: String,
    sortable: bool,
    filterable: bool,
    hideable: bool,
    default_visible: bool,
    accessor: Option<Accessor<R>>,
    render: Option<Renderer<R>>,
}

impl<R> Column<R> {
    /// Creates a column addressing the given key.
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            path: FieldPath::parse(&key),
            header: key.clone(),
            key,
            sortable: false,
            filterable: false,
            hideable: true,
            default_visible: true,
            accessor: None,
            render: None,
        }
    }

    /// Sets the header text.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Marks the column as sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Marks the column as filterable.
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Sets whether the user may hide the column.
    pub fn hideable(mut self, hideable: bool) -> Self {
        self.hideable = hideable;
        self
    }

    /// Hides the column until the user enables it.
    pub fn hidden_by_default(mut self) -> Self {
        self.default_visible = false;
        self
    }

    /// Sets a computed accessor, overriding path lookup.
    pub fn accessor(mut self, f: impl Fn(&R) -> Value + Send + Sync + 'static) -> Self {
        self.accessor = Some(Arc::new(f));
        self
    }

    /// Sets a cell renderer.
    pub fn render(mut self, f: impl Fn(&R, Option<&Value>) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(f));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn header_text(&self) -> &str {
        &self.header
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn is_filterable(&self) -> bool {
        self.filterable
    }

    pub fn is_hideable(&self) -> bool {
        self.hideable
    }

    pub fn is_default_visible(&self) -> bool {
        self.default_visible
    }

    pub fn has_accessor(&self) -> bool {
        self.accessor.is_some()
    }
}

impl<R: Row> Column<R> {
    /// Resolves this column's value for a row.
    ///
    /// Uses the accessor if set, otherwise walks the key path. Returns
    /// `None` when the value is absent.
    pub fn resolve<'a>(&self, row: &'a R) -> Option<Cow<'a, Value>> {
        match &self.accessor {
            Some(accessor) => Some(Cow::Owned(accessor(row))),
            None => self.path.resolve(row).map(Cow::Borrowed),
        }
    }

    /// Returns the value's string form, with absent values as empty text.
    pub fn text(&self, row: &R) -> String {
        self.resolve(row).map(|v| v.to_string()).unwrap_or_default()
    }

    /// Formats the cell for display.
    pub fn display(&self, row: &R) -> String {
        let value = self.resolve(row);
        if let Some(render) = &self.render {
            return render(row, value.as_deref());
        }
        match value.as_deref() {
            None | Some(Value::Null) => EMPTY_CELL.to_string(),
            Some(v) => {
                let text = v.to_string();
                if text.is_empty() { EMPTY_CELL.to_string() } else { text }
            }
        }
    }
}

/// Resolves a column's value for a row.
pub fn resolve_value<'a, R: Row>(row: &'a R, column: &Column<R>) -> Option<Cow<'a, Value>> {
    column.resolve(row)
}

/// Finds a column by key.
pub fn find_column<'c, R>(columns: &'c [Column<R>], key: &str) -> Option<&'c Column<R>> {
    columns.iter().find(|c| c.key == key)
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            path: self.path.clone(),
            header: self.header.clone(),
            sortable: self.sortable,
            filterable: self.filterable,
            hideable: self.hideable,
            default_visible: self.default_visible,
            accessor: self.accessor.clone(),
            render: self.render.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("hideable", &self.hideable)
            .field("default_visible", &self.default_visible)
            .field("accessor", &self.accessor.is_some())
            .field("render", &self.render.is_some())
            .finish()
    }
}
