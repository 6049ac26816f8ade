//! Compiled predicates.
//!
//! A [`Predicate`] is a [`Filter`] whose field names are resolved against the
//! record schema and whose bounds are converted to the field's value type.
//! Compilation is where every configuration error surfaces; matching a
//! compiled predicate cannot fail.

use crate::error::QueryError;
use crate::filter::{Bound, CompareOp, Comparison, Filter, Scalar};
use crate::plan::EvaluationContext;
use chrono::NaiveDate;
use staff_core::{Employee, Field, FieldKind, FieldValue};
use std::fmt;

/// A typed bound value.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Integer(i64),
    Real(f64),
    Date(NaiveDate),
    Text(String),
    Boolean(bool),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Integer(i) => write!(f, "{i}"),
            Operand::Real(x) => write!(f, "{x}"),
            Operand::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Operand::Text(s) => write!(f, "'{s}'"),
            Operand::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// `field <op> value` with a resolved field.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: Field,
    pub op: CompareOp,
    pub value: Operand,
}

impl Condition {
    /// Test one record. An absent field value never matches, whatever the operator.
    pub fn matches(&self, employee: &Employee) -> bool {
        let Some(actual) = self.field.value(employee) else {
            return false;
        };

        let ordering = match (&actual, &self.value) {
            (FieldValue::Integer(a), Operand::Integer(b)) => Some(a.cmp(b)),
            (FieldValue::Integer(a), Operand::Real(b)) => (*a as f64).partial_cmp(b),
            (FieldValue::Real(a), Operand::Real(b)) => a.partial_cmp(b),
            (FieldValue::Real(a), Operand::Integer(b)) => a.partial_cmp(&(*b as f64)),
            (FieldValue::Date(a), Operand::Date(b)) => Some(a.cmp(b)),
            (FieldValue::Text(a), Operand::Text(b)) => Some(a.as_ref().cmp(b.as_str())),
            (FieldValue::Boolean(a), Operand::Boolean(b)) => Some(a.cmp(b)),
            (FieldValue::TextList(items), Operand::Text(b)) => {
                // List equality is membership
                let found = items.iter().any(|item| item == b);
                return match self.op {
                    CompareOp::Eq => found,
                    CompareOp::Ne => !found,
                    _ => false,
                };
            }
            _ => None,
        };

        ordering.map_or(false, |ordering| self.op.holds(ordering))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.op, self.value)
    }
}

/// A compiled filter tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    All(Vec<Predicate>),
    Any(Vec<Predicate>),
    Condition(Condition),
}

impl Predicate {
    /// Resolve and type-check `filter` for the query named `query`.
    pub fn compile(
        filter: &Filter,
        query: &str,
        ctx: &EvaluationContext,
    ) -> Result<Self, QueryError> {
        match filter {
            Filter::All { all } => Ok(Predicate::All(
                all.iter()
                    .map(|f| Self::compile(f, query, ctx))
                    .collect::<Result<_, _>>()?,
            )),
            Filter::Any { any } => Ok(Predicate::Any(
                any.iter()
                    .map(|f| Self::compile(f, query, ctx))
                    .collect::<Result<_, _>>()?,
            )),
            Filter::Compare(comparison) => {
                Ok(Predicate::Condition(compile_condition(comparison, query, ctx)?))
            }
        }
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        match self {
            Predicate::All(children) => children.iter().all(|p| p.matches(employee)),
            Predicate::Any(children) => children.iter().any(|p| p.matches(employee)),
            Predicate::Condition(condition) => condition.matches(employee),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (children, joiner) = match self {
            Predicate::Condition(condition) => return write!(f, "{condition}"),
            Predicate::All(children) => (children, " AND "),
            Predicate::Any(children) => (children, " OR "),
        };
        if children.is_empty() {
            return f.write_str(if joiner == " AND " { "TRUE" } else { "FALSE" });
        }
        f.write_str("(")?;
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                f.write_str(joiner)?;
            }
            write!(f, "{child}")?;
        }
        f.write_str(")")
    }
}

fn compile_condition(
    comparison: &Comparison,
    query: &str,
    ctx: &EvaluationContext,
) -> Result<Condition, QueryError> {
    let field: Field = comparison
        .field
        .parse()
        .map_err(|_| QueryError::UnknownField {
            query: query.to_string(),
            field: comparison.field.clone(),
        })?;
    let kind = field.kind();

    if comparison.op.is_range() && !kind.is_ordered() {
        return Err(QueryError::IncompatibleOperator {
            query: query.to_string(),
            field: comparison.field.clone(),
            op: comparison.op.op_name(),
        });
    }

    let incompatible = || QueryError::IncompatibleBound {
        query: query.to_string(),
        field: comparison.field.clone(),
        bound: comparison.bound.to_string(),
    };

    let value = match (&comparison.bound, kind) {
        (Bound::YearsAgo(years), FieldKind::Date) => Operand::Date(ctx.years_before_today(*years)),
        (Bound::YearsAgo(_), _) => return Err(incompatible()),
        (Bound::Value(scalar), kind) => match (scalar, kind) {
            (Scalar::Int(i), FieldKind::Integer) => Operand::Integer(*i),
            (Scalar::Float(x), FieldKind::Integer | FieldKind::Real) => Operand::Real(*x),
            (Scalar::Int(i), FieldKind::Real) => Operand::Real(*i as f64),
            (Scalar::Text(s), FieldKind::Date) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(Operand::Date)
                .map_err(|_| incompatible())?,
            (Scalar::Text(s), FieldKind::Text | FieldKind::TextList) => Operand::Text(s.clone()),
            (Scalar::Bool(b), FieldKind::Boolean) => Operand::Boolean(*b),
            _ => return Err(incompatible()),
        },
    };

    Ok(Condition {
        field,
        op: comparison.op,
        value,
    })
}
