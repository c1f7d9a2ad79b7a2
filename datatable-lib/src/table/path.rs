//! Dotted field paths into nested rows.

use std::fmt;

use crate::model::Row;
use crate::model::Value;

/// Segment delimiter for nested field access.
pub const PATH_DELIMITER: char = '.';

/// A parsed field path such as `details.score`.
///
/// Resolution walks one segment at a time. Records are descended by field
/// name and lists by decimal index; anything else ends the walk as absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parses a key into path segments.
    pub fn parse(key: &str) -> Self {
        Self {
            segments: key.split(PATH_DELIMITER).map(str::to_string).collect(),
        }
    }

    /// Returns the path segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns `true` if the path has more than one segment.
    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }

    /// Resolves the path against a row.
    ///
    /// Returns `None` when any segment is missing or an intermediate value
    /// is not structured.
    pub fn resolve<'a, R: Row + ?Sized>(&self, row: &'a R) -> Option<&'a Value> {
        let (first, rest) = self.segments.split_first()?;
        let mut current = row.field(first)?;
        for segment in rest {
            current = descend(current, segment)?;
        }
        Some(current)
    }
}

fn descend<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Record(record) => record.get(segment),
        Value::List(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl From<&str> for FieldPath {
    fn from(key: &str) -> Self {
        Self::parse(key)
    }
}
