//! Field values as seen by the unit of work
//!
//! Every persisted entity exposes its columns as a list of `(name, FieldValue)`
//! pairs. Change sets are computed by comparing two such lists, and the audit
//! trail renders the values through `audit::describe::render_value`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// A single column value of a persisted entity
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Absent value
    Null,
    /// Boolean flag
    Bool(bool),
    /// Integer column
    Int(i64),
    /// Free text
    Text(String),
    /// Point in time (dates are widened to midnight)
    Timestamp(NaiveDateTime),
    /// Reference to another entity
    Reference {
        /// Short type name of the referenced entity
        type_name: &'static str,
        /// Natural string representation, if the referenced entity has one
        display: Option<String>,
    },
    /// List or map column, stored as JSON
    Collection(serde_json::Value),
}

impl FieldValue {
    /// Build a reference value
    pub fn reference(type_name: &'static str, display: Option<String>) -> Self {
        Self::Reference { type_name, display }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::Timestamp(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value.naive_utc())
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Timestamp(value.and_time(NaiveTime::MIN))
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::Collection(serde_json::Value::from(value))
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
