//! The employee record and its wire shape.

use crate::catalog::{Department, Position};
use crate::geography::State;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ID_PREFIX: &str = "EMP";

/// Unique, immutable employee identity.
///
/// Rendered on the wire as `EMP` followed by a zero-padded sequence number
/// (`EMP000042`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct EmployeeId(u64);

impl EmployeeId {
    pub const fn new(sequence: u64) -> Self {
        Self(sequence)
    }

    pub fn sequence(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ID_PREFIX}{:06}", self.0)
    }
}

/// Error returned when an identity string is not of the form `EMPnnnnnn`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid employee id: '{0}'")]
pub struct ParseEmployeeIdError(pub String);

impl FromStr for EmployeeId {
    type Err = ParseEmployeeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(ID_PREFIX)
            .and_then(|digits| digits.parse::<u64>().ok())
            .map(EmployeeId)
            .ok_or_else(|| ParseEmployeeIdError(s.to_string()))
    }
}

impl From<EmployeeId> for String {
    fn from(id: EmployeeId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for EmployeeId {
    type Error = ParseEmployeeIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Postal address of an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub state: State,
    pub zip: String,
}

/// A single employee record.
///
/// Records are built once by the generator and never mutated afterwards.
/// Field names and types here are the wire shape shared by every store and
/// export format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: Department,
    pub position: Position,
    pub salary: i64,
    pub years_experience: u32,
    pub performance_rating: f64,
    pub skills: Vec<String>,
    pub hire_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_promotion: Option<NaiveDate>,
    pub remote: bool,
    pub address: Address,
}

impl Employee {
    /// First and last name joined by a single space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Employee {
        Employee {
            employee_id: EmployeeId::new(7),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada.lovelace@example.com".to_string(),
            department: Department::Engineering,
            position: Position::StaffEngineer,
            salary: 150_000,
            years_experience: 12,
            performance_rating: 4.5,
            skills: vec!["Rust".to_string()],
            hire_date: NaiveDate::from_ymd_opt(2015, 3, 1).unwrap(),
            last_promotion: None,
            remote: true,
            address: Address {
                city: "Boston".to_string(),
                state: State::MA,
                zip: "02110".to_string(),
            },
        }
    }

    #[test]
    fn test_employee_id_format() {
        assert_eq!(EmployeeId::new(42).to_string(), "EMP000042");
        assert_eq!("EMP000042".parse::<EmployeeId>().unwrap(), EmployeeId::new(42));
        assert!("E42".parse::<EmployeeId>().is_err());
        assert!("EMPxyz".parse::<EmployeeId>().is_err());
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(json["employee_id"], "EMP000007");
        assert_eq!(json["department"], "Engineering");
        assert_eq!(json["position"], "Staff Engineer");
        assert_eq!(json["salary"], 150_000);
        assert_eq!(json["hire_date"], "2015-03-01");
        assert_eq!(json["address"]["state"], "MA");
        // Absent promotion is omitted, not null
        assert!(json.get("last_promotion").is_none());
    }

    #[test]
    fn test_wire_shape_parses_back() {
        let mut employee = sample();
        employee.last_promotion = NaiveDate::from_ymd_opt(2019, 6, 15);

        let json = serde_json::to_string(&employee).unwrap();
        let parsed: Employee = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, employee);
    }

    #[test]
    fn test_full_name() {
        assert_eq!(sample().full_name(), "Ada Lovelace");
    }
}
