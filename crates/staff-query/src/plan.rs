//! Query plans: a specification compiled against one evaluation instant.

use crate::error::QueryError;
use crate::predicate::Predicate;
use crate::projection::{tenure_months, Projection};
use crate::row::ResultRow;
use crate::spec::QuerySpec;
use chrono::{DateTime, Months, NaiveDate, Utc};
use serde_json::Value;
use staff_core::{Employee, Field};
use std::fmt;

/// The instant a query is evaluated at.
///
/// Captured once per evaluation so every relative bound and derived metric
/// in one result set refers to the same "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluationContext {
    now: DateTime<Utc>,
}

impl EvaluationContext {
    /// Context at the current wall-clock instant.
    pub fn current() -> Self {
        Self { now: Utc::now() }
    }

    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    /// Today minus `years` calendar years. Feb 29 maps to Feb 28.
    pub fn years_before_today(&self, years: u32) -> NaiveDate {
        self.today()
            .checked_sub_months(Months::new(years.saturating_mul(12)))
            .unwrap_or(NaiveDate::MIN)
    }
}

/// A resolved output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    FullName,
    TenureMonths,
    Field(Field),
}

impl Column {
    pub fn name(&self) -> &'static str {
        match self {
            Column::FullName => "full_name",
            Column::TenureMonths => "tenure_months",
            Column::Field(field) => field.name(),
        }
    }
}

/// A compiled, executable query.
#[derive(Debug, Clone)]
pub struct QueryPlan {
    name: String,
    predicate: Predicate,
    columns: Vec<Column>,
    now: DateTime<Utc>,
}

impl QueryPlan {
    /// Resolve every field the specification names and fix relative bounds
    /// against `ctx`. Fails before any record is read.
    pub fn compile(spec: &QuerySpec, ctx: &EvaluationContext) -> Result<Self, QueryError> {
        let name = spec.name().to_string();
        let predicate = Predicate::compile(&spec.filter(), &name, ctx)?;

        let columns = spec
            .projection()
            .into_iter()
            .map(|projection| match projection {
                Projection::FullName => Ok(Column::FullName),
                Projection::TenureMonths => Ok(Column::TenureMonths),
                Projection::Field(field) => field
                    .parse::<Field>()
                    .map(Column::Field)
                    .map_err(|_| QueryError::UnknownField {
                        query: name.clone(),
                        field,
                    }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name,
            predicate,
            columns,
            now: ctx.now(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// Output columns; empty for full-record queries.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn is_projected(&self) -> bool {
        !self.columns.is_empty()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        self.predicate.matches(employee)
    }

    /// Shape one matching record into an output row.
    pub fn project(&self, employee: &Employee) -> ResultRow {
        if !self.is_projected() {
            return ResultRow::from_employee(employee);
        }

        let mut row = ResultRow::new();
        for column in &self.columns {
            let value = match column {
                Column::FullName => Value::from(employee.full_name()),
                Column::TenureMonths => Value::from(tenure_months(employee.hire_date, self.now)),
                Column::Field(field) => field
                    .value(employee)
                    .map(|v| v.to_json())
                    .unwrap_or(Value::Null),
            };
            row.insert(column.name(), value);
        }
        row
    }

    /// Filter and project `population`, preserving its order.
    pub fn run(&self, population: &[Employee]) -> Vec<ResultRow> {
        population
            .iter()
            .filter(|employee| self.matches(employee))
            .map(|employee| self.project(employee))
            .collect()
    }
}

impl fmt::Display for QueryPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: WHERE {}", self.name, self.predicate)?;
        if self.is_projected() {
            let names: Vec<&str> = self.columns.iter().map(Column::name).collect();
            write!(f, " SELECT {}", names.join(", "))?;
        }
        Ok(())
    }
}
