//! Core types for staffgen.
//!
//! This crate provides the foundational types shared by the generator,
//! the query layer and the store adapters:
//!
//! - [`Catalog`] - Validated department/position/skill/salary tables
//! - [`Employee`] - The employee record and its wire shape
//! - [`Field`] - The closed field schema queries are resolved against
//! - [`State`] - The fixed geography table used for addresses
//!
//! # Architecture
//!
//! ```text
//! staff-core (this crate)
//!    │
//!    ├─── staff-generator  (draws from the Catalog, produces Employees)
//!    ├─── staff-query      (resolves Fields, evaluates predicates)
//!    ├─── staff-store      (persists Employees behind the Store trait)
//!    └─── staff-export     (writes rows to JSONL/CSV)
//! ```
//!
//! # Example
//!
//! ```rust
//! use staff_core::{Catalog, Department};
//!
//! let catalog = Catalog::standard().unwrap();
//! let positions = catalog.positions(Department::Engineering);
//! let band = catalog.salary_band(positions[0]);
//! assert!(band.low <= band.high);
//! ```

pub mod catalog;
pub mod field;
pub mod geography;
pub mod names;
pub mod record;

// Re-exports for convenience
pub use catalog::{Catalog, CatalogError, Department, DepartmentProfile, Position, SalaryBand};
pub use field::{Field, FieldKind, FieldValue, UnknownField};
pub use geography::State;
pub use record::{Address, Employee, EmployeeId, ParseEmployeeIdError};
