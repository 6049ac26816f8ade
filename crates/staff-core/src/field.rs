//! Closed field schema of the employee record.
//!
//! Query specifications name fields by their wire name (`salary`,
//! `address.state`, ...). Those names are resolved against [`Field`] before
//! any record is touched, so an unknown name is a configuration error rather
//! than a silently empty result.

use crate::record::Employee;
use chrono::NaiveDate;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// A field of [`Employee`] addressable by queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    EmployeeId,
    FirstName,
    LastName,
    Email,
    Department,
    Position,
    Salary,
    YearsExperience,
    PerformanceRating,
    Skills,
    HireDate,
    LastPromotion,
    Remote,
    City,
    State,
    Zip,
}

/// Value type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Real,
    Date,
    Boolean,
    TextList,
}

impl FieldKind {
    /// Whether values of this kind have a total order usable by range comparisons.
    pub fn is_ordered(self) -> bool {
        matches!(self, FieldKind::Integer | FieldKind::Real | FieldKind::Date)
    }
}

/// Borrowed value of a field read from a record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Text(Cow<'a, str>),
    Integer(i64),
    Real(f64),
    Date(NaiveDate),
    Boolean(bool),
    TextList(&'a [String]),
}

impl FieldValue<'_> {
    /// JSON representation, matching the record's wire shape.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::from(s.to_string()),
            FieldValue::Integer(i) => Value::from(*i),
            FieldValue::Real(f) => Value::from(*f),
            FieldValue::Date(d) => Value::from(d.format("%Y-%m-%d").to_string()),
            FieldValue::Boolean(b) => Value::from(*b),
            FieldValue::TextList(items) => Value::from(items.to_vec()),
        }
    }
}

/// Error returned when a field name is not part of the schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown field: '{0}'")]
pub struct UnknownField(pub String);

impl Field {
    pub const ALL: [Field; 16] = [
        Field::EmployeeId,
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Department,
        Field::Position,
        Field::Salary,
        Field::YearsExperience,
        Field::PerformanceRating,
        Field::Skills,
        Field::HireDate,
        Field::LastPromotion,
        Field::Remote,
        Field::City,
        Field::State,
        Field::Zip,
    ];

    /// Wire name; nested address fields use dotted paths.
    pub fn name(self) -> &'static str {
        match self {
            Field::EmployeeId => "employee_id",
            Field::FirstName => "first_name",
            Field::LastName => "last_name",
            Field::Email => "email",
            Field::Department => "department",
            Field::Position => "position",
            Field::Salary => "salary",
            Field::YearsExperience => "years_experience",
            Field::PerformanceRating => "performance_rating",
            Field::Skills => "skills",
            Field::HireDate => "hire_date",
            Field::LastPromotion => "last_promotion",
            Field::Remote => "remote",
            Field::City => "address.city",
            Field::State => "address.state",
            Field::Zip => "address.zip",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::EmployeeId
            | Field::FirstName
            | Field::LastName
            | Field::Email
            | Field::Department
            | Field::Position
            | Field::City
            | Field::State
            | Field::Zip => FieldKind::Text,
            Field::Salary | Field::YearsExperience => FieldKind::Integer,
            Field::PerformanceRating => FieldKind::Real,
            Field::Skills => FieldKind::TextList,
            Field::HireDate | Field::LastPromotion => FieldKind::Date,
            Field::Remote => FieldKind::Boolean,
        }
    }

    /// Read this field from a record. Returns `None` only for an absent
    /// optional field (`last_promotion`).
    pub fn value(self, employee: &Employee) -> Option<FieldValue<'_>> {
        let value = match self {
            // The only text field not stored as a string
            Field::EmployeeId => FieldValue::Text(Cow::Owned(employee.employee_id.to_string())),
            Field::FirstName => FieldValue::Text(Cow::Borrowed(&employee.first_name)),
            Field::LastName => FieldValue::Text(Cow::Borrowed(&employee.last_name)),
            Field::Email => FieldValue::Text(Cow::Borrowed(&employee.email)),
            Field::Department => FieldValue::Text(Cow::Borrowed(employee.department.as_str())),
            Field::Position => FieldValue::Text(Cow::Borrowed(employee.position.as_str())),
            Field::Salary => FieldValue::Integer(employee.salary),
            Field::YearsExperience => FieldValue::Integer(i64::from(employee.years_experience)),
            Field::PerformanceRating => FieldValue::Real(employee.performance_rating),
            Field::Skills => FieldValue::TextList(&employee.skills),
            Field::HireDate => FieldValue::Date(employee.hire_date),
            Field::LastPromotion => FieldValue::Date(employee.last_promotion?),
            Field::Remote => FieldValue::Boolean(employee.remote),
            Field::City => FieldValue::Text(Cow::Borrowed(&employee.address.city)),
            Field::State => FieldValue::Text(Cow::Borrowed(employee.address.state.as_str())),
            Field::Zip => FieldValue::Text(Cow::Borrowed(&employee.address.zip)),
        };
        Some(value)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}
