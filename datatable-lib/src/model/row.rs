//! Row trait for property access into caller records

use std::collections::BTreeMap;
use std::collections::HashMap;

use super::Value;

/// Property access into a table row.
///
/// The table engine never inspects rows directly; columns read them
/// through this trait (or through their own accessor). Implement it for a
/// domain type to table it without converting to [`Record`](super::Record).
///
/// # Example
///
/// ```
/// use datatable_lib::model::{Row, Value};
///
/// struct Lead {
///     name: Value,
/// }
///
/// impl Row for Lead {
///     fn field(&self, name: &str) -> Option<&Value> {
///         match name {
///             "name" => Some(&self.name),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Row {
    /// Returns the value of a top-level field, or `None` if absent.
    fn field(&self, name: &str) -> Option<&Value>;
}

impl Row for BTreeMap<String, Value> {
    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl Row for HashMap<String, Value> {
    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}
