//! Post-construction checks every generated record must pass.

use crate::config::GeneratorConfig;
use chrono::NaiveDate;
use staff_core::{Catalog, Employee, EmployeeId};
use std::collections::HashSet;

/// A generated record broke one of its own invariants.
///
/// This is a defect in the generator, never an expected runtime condition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Record {identity} violates invariant: {detail}")]
pub struct InvariantViolation {
    pub identity: EmployeeId,
    pub detail: String,
}

/// Verify a record against the catalog, the configuration and the reference date.
pub fn check(
    employee: &Employee,
    catalog: &Catalog,
    config: &GeneratorConfig,
    today: NaiveDate,
) -> Result<(), InvariantViolation> {
    let fail = |detail: String| InvariantViolation {
        identity: employee.employee_id,
        detail,
    };

    if !catalog
        .positions(employee.department)
        .contains(&employee.position)
    {
        return Err(fail(format!(
            "position '{}' not in department '{}'",
            employee.position, employee.department
        )));
    }

    let pool = catalog.skill_pool(employee.department);
    if let Some(skill) = employee.skills.iter().find(|s| !pool.contains(*s)) {
        return Err(fail(format!(
            "skill '{skill}' not in '{}' pool",
            employee.department
        )));
    }
    let max_skills = config.skills.max.min(pool.len());
    if !(config.skills.min..=max_skills).contains(&employee.skills.len()) {
        return Err(fail(format!(
            "{} skills outside configured range [{}, {max_skills}]",
            employee.skills.len(),
            config.skills.min
        )));
    }
    let distinct: HashSet<&String> = employee.skills.iter().collect();
    if distinct.len() != employee.skills.len() {
        return Err(fail("duplicate skills".to_string()));
    }

    let band = catalog.salary_band(employee.position);
    if !band.contains(employee.salary) {
        return Err(fail(format!(
            "salary {} outside band [{}, {}]",
            employee.salary, band.low, band.high
        )));
    }

    let rating = &config.rating;
    if !(rating.min..=rating.max).contains(&employee.performance_rating) {
        return Err(fail(format!(
            "performance_rating {} outside [{}, {}]",
            employee.performance_rating, rating.min, rating.max
        )));
    }

    if employee.hire_date > today {
        return Err(fail(format!(
            "hire_date {} after {today}",
            employee.hire_date
        )));
    }

    if let Some(promotion) = employee.last_promotion {
        if !(employee.hire_date < promotion && promotion < today) {
            return Err(fail(format!(
                "last_promotion {promotion} not strictly between {} and {today}",
                employee.hire_date
            )));
        }
    }

    Ok(())
}
