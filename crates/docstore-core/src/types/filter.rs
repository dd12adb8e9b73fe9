//! Filter types for predicate queries.
//!
//! A [`Filter`] is the opaque predicate the repository passes through to the
//! store client. The core never interprets it; each client adapter translates
//! it into the store's native query form.

use serde::{Deserialize, Serialize};

/// Filter comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    /// Exact equality.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Substring match on string fields.
    Contains,
    /// List membership.
    In,
    /// The field is present on the document.
    IsDefined,
    /// The field is absent from the document.
    IsNotDefined,
}

/// A dynamic filter value that can represent the JSON scalar types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// A string value.
    String(String),
    /// An integer value.
    Integer(i64),
    /// A floating-point value.
    Float(f64),
    /// A boolean value.
    Boolean(bool),
    /// A list of string values (for the `In` operator).
    StringList(Vec<String>),
    /// No value (for `IsDefined`, `IsNotDefined`).
    Null,
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(v: Vec<String>) -> Self {
        Self::StringList(v)
    }
}

/// A single filter condition on a named field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterField {
    /// The document field name to filter on.
    pub field: String,
    /// The comparison operator.
    pub op: FilterOp,
    /// The value to compare against.
    pub value: FilterValue,
}

impl FilterField {
    /// Create a new filter field.
    pub fn new(field: impl Into<String>, op: FilterOp, value: impl Into<FilterValue>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// Shorthand for an equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOp::Eq, value)
    }

    /// Shorthand for a substring filter.
    pub fn contains(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(field, FilterOp::Contains, FilterValue::String(pattern.into()))
    }
}

/// A conjunction of filter conditions over a document type's fields.
///
/// An empty filter matches every document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Filter {
    /// The conditions, combined with logical AND.
    pub conditions: Vec<FilterField>,
}

impl Filter {
    /// Create an empty filter that matches all documents.
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter from a single condition.
    pub fn matching(field: impl Into<String>, op: FilterOp, value: impl Into<FilterValue>) -> Self {
        Self {
            conditions: vec![FilterField::new(field, op, value)],
        }
    }

    /// Add another condition (logical AND).
    pub fn and(mut self, field: impl Into<String>, op: FilterOp, value: impl Into<FilterValue>) -> Self {
        self.conditions.push(FilterField::new(field, op, value));
        self
    }

    /// Whether this filter has no conditions.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}
