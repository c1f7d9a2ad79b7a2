//! Sort direction and value normalization for ordering rows.

use std::cmp::Ordering;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde::Serialize;

use crate::model::Value;

/// Sort direction for ordering rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9, oldest first).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0, newest first).
    Desc,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn toggle(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    /// Applies this direction to an ascending comparison.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

/// A value normalized for comparison.
///
/// Rows are compared by the kind their value normalizes to rather than by
/// the raw [`Value`] variant, so numbers, dates and date-like strings order
/// sensibly against each other.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    /// No value. Always ordered last.
    Missing,
    /// Numeric value (booleans as 0/1).
    Number(f64),
    /// Point in time.
    Instant(DateTime<Utc>),
    /// Lower-cased text.
    Text(String),
}

impl SortKey {
    /// Normalizes a resolved column value.
    pub fn normalize(value: Option<&Value>) -> Self {
        let Some(value) = value else {
            return SortKey::Missing;
        };
        match value {
            Value::Null => SortKey::Missing,
            Value::Bool(b) => SortKey::Number(if *b { 1.0 } else { 0.0 }),
            Value::Int(n) => SortKey::Number(*n as f64),
            Value::Float(n) => SortKey::Number(*n),
            Value::Decimal(d) => d.to_f64().map(SortKey::Number).unwrap_or(SortKey::Missing),
            Value::DateTime(dt) => SortKey::Instant(*dt),
            Value::Date(d) => SortKey::Instant(midnight_utc(*d)),
            Value::String(s) => match parse_instant(s) {
                Some(instant) => SortKey::Instant(instant),
                None => SortKey::Text(s.to_lowercase()),
            },
            other => SortKey::Text(other.to_string().to_lowercase()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, SortKey::Missing)
    }

    /// Numeric position on the shared number/time axis.
    fn scalar(&self) -> Option<f64> {
        match self {
            SortKey::Number(n) => Some(*n),
            SortKey::Instant(dt) => Some(dt.timestamp_millis() as f64),
            _ => None,
        }
    }

    /// Ascending order of two non-missing keys.
    fn cmp_present(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Instant(a), SortKey::Instant(b)) => a.cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Text(_), _) => Ordering::Greater,
            (_, SortKey::Text(_)) => Ordering::Less,
            _ => match (self.scalar(), other.scalar()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => Ordering::Equal,
            },
        }
    }
}

/// Compares two sort keys in the given direction.
///
/// Missing keys order after present ones regardless of direction.
pub fn compare(a: &SortKey, b: &SortKey, direction: Direction) -> Ordering {
    match (a.is_missing(), b.is_missing()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => direction.apply(a.cmp_present(b)),
    }
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a whole string as a date or date-time.
///
/// Naive forms are read as UTC.
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().map(midnight_utc)
}
