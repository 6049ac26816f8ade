//! Backend-neutral filter descriptions.
//!
//! A [`Filter`] is a tree of boundary comparisons joined by conjunction or
//! disjunction. Field names are plain strings here; they are resolved and
//! type-checked when the filter is compiled into a [`crate::Predicate`].
//!
//! Filters deserialize from YAML:
//!
//! ```yaml
//! all:
//!   - { field: remote, op: eq, value: true }
//!   - any:
//!       - { field: salary, op: lt, value: 50000 }
//!       - { field: hire_date, op: gte, years_ago: 1 }
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Comparison operator. Each operator states its boundary semantics exactly:
/// `Gte`/`Lte` include the bound, `Gt`/`Lt` exclude it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOp {
    /// Returns true if this operator needs an ordered field type.
    pub fn is_range(self) -> bool {
        !matches!(self, CompareOp::Eq | CompareOp::Ne)
    }

    /// Whether `value <op> bound` holds, given `value.cmp(bound)`.
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::Ne => ordering != Ordering::Equal,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::Gte => ordering != Ordering::Less,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::Lte => ordering != Ordering::Greater,
        }
    }

    /// Returns the operator name for messages and explain output
    pub fn op_name(self) -> &'static str {
        match self {
            CompareOp::Eq => "eq",
            CompareOp::Ne => "ne",
            CompareOp::Gt => "gt",
            CompareOp::Gte => "gte",
            CompareOp::Lt => "lt",
            CompareOp::Lte => "lte",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.op_name())
    }
}

/// A literal bound value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Text, or an ISO date (`YYYY-MM-DD`) when compared with a date field
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Text(s) => write!(f, "'{s}'"),
        }
    }
}

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bound {
    /// A fixed value
    Value(Scalar),
    /// The evaluation date minus this many calendar years
    YearsAgo(u32),
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Value(scalar) => write!(f, "{scalar}"),
            Bound::YearsAgo(years) => write!(f, "{years} years ago"),
        }
    }
}

/// A single boundary comparison `field <op> bound`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub field: String,
    pub op: CompareOp,
    #[serde(flatten)]
    pub bound: Bound,
}

impl Comparison {
    pub fn new(field: impl Into<String>, op: CompareOp, bound: Bound) -> Self {
        Self {
            field: field.into(),
            op,
            bound,
        }
    }
}

/// A filter tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Filter {
    /// Every child must match (an empty list matches everything)
    All { all: Vec<Filter> },
    /// At least one child must match (an empty list matches nothing)
    Any { any: Vec<Filter> },
    Compare(Comparison),
}

impl Filter {
    pub fn all(filters: Vec<Filter>) -> Self {
        Filter::All { all: filters }
    }

    pub fn any(filters: Vec<Filter>) -> Self {
        Filter::Any { any: filters }
    }

    pub fn compare(field: impl Into<String>, op: CompareOp, value: Scalar) -> Self {
        Filter::Compare(Comparison::new(field, op, Bound::Value(value)))
    }

    pub fn gt(field: impl Into<String>, value: Scalar) -> Self {
        Self::compare(field, CompareOp::Gt, value)
    }

    pub fn gte(field: impl Into<String>, value: Scalar) -> Self {
        Self::compare(field, CompareOp::Gte, value)
    }

    pub fn lt(field: impl Into<String>, value: Scalar) -> Self {
        Self::compare(field, CompareOp::Lt, value)
    }

    pub fn lte(field: impl Into<String>, value: Scalar) -> Self {
        Self::compare(field, CompareOp::Lte, value)
    }

    pub fn eq(field: impl Into<String>, value: Scalar) -> Self {
        Self::compare(field, CompareOp::Eq, value)
    }
}
