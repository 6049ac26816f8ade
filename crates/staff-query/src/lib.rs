//! Declarative queries over employee populations.
//!
//! Specifications ([`QuerySpec`]) describe a filter tree with explicit
//! boundary operators and an optional projection. They are compiled into a
//! [`QueryPlan`] against a single evaluation instant, then run either over an
//! in-memory population ([`executor::evaluate`]) or through a [`Store`]
//! ([`executor::execute`]).
//!
//! # Example
//!
//! ```rust
//! use staff_query::{executor, QuerySpec};
//!
//! let rows = executor::evaluate(&QuerySpec::high_performers(), &[]).unwrap();
//! assert!(rows.is_empty());
//! ```

pub mod error;
pub mod executor;
pub mod filter;
pub mod library;
pub mod plan;
pub mod predicate;
pub mod projection;
pub mod row;
pub mod spec;
pub mod store;

pub use error::QueryError;
pub use filter::{Bound, CompareOp, Comparison, Filter, Scalar};
pub use library::QueryLibrary;
pub use plan::{Column, EvaluationContext, QueryPlan};
pub use predicate::{Condition, Operand, Predicate};
pub use projection::{tenure_months, Projection, AVERAGE_DAYS_PER_MONTH, MILLIS_PER_MONTH};
pub use row::ResultRow;
pub use spec::{CustomQuery, QuerySpec};
pub use store::{Store, StoreError};

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;
    use staff_core::{Address, Department, Employee, EmployeeId, Position, State};

    /// A record with the query-relevant fields set and everything else fixed.
    pub fn employee(salary: i64, performance_rating: f64, years_experience: u32) -> Employee {
        Employee {
            employee_id: EmployeeId::new(1),
            first_name: "Ada".to_string(),
            last_name: "Park".to_string(),
            email: "ada.park@example.com".to_string(),
            department: Department::Engineering,
            position: Position::SoftwareEngineer,
            salary,
            years_experience,
            performance_rating,
            skills: vec!["Rust".to_string(), "Kubernetes".to_string()],
            hire_date: NaiveDate::from_ymd_opt(2019, 3, 15).unwrap(),
            last_promotion: NaiveDate::from_ymd_opt(2022, 8, 1),
            remote: true,
            address: Address {
                city: "San Francisco".to_string(),
                state: State::CA,
                zip: "94105".to_string(),
            },
        }
    }
}
