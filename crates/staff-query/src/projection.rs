//! Output columns: pass-through fields and derived metrics.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Average month length in days used for tenure.
///
/// Kept as an approximation instead of calendar-month arithmetic so tenure
/// values match previously exported data at month boundaries.
pub const AVERAGE_DAYS_PER_MONTH: f64 = 30.44;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Milliseconds in one average month.
pub const MILLIS_PER_MONTH: f64 = MILLIS_PER_DAY * AVERAGE_DAYS_PER_MONTH;

/// Tenure in months from the start of `hire_date` (UTC) to `now`.
pub fn tenure_months(hire_date: NaiveDate, now: DateTime<Utc>) -> f64 {
    let hired_at = hire_date.and_time(NaiveTime::MIN);
    let elapsed = now.naive_utc() - hired_at;
    elapsed.num_milliseconds() as f64 / MILLIS_PER_MONTH
}

/// An output column requested by a specification.
///
/// Deserializes from a plain string: `full_name`, `tenure_months`, or any
/// field name for pass-through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Projection {
    /// `first_name` and `last_name` joined by a space
    FullName,
    /// Months between hire date and the evaluation instant
    TenureMonths,
    /// A record field copied as-is
    Field(String),
}

impl Projection {
    pub fn field(name: impl Into<String>) -> Self {
        Projection::Field(name.into())
    }

    /// Output column name.
    pub fn column_name(&self) -> &str {
        match self {
            Projection::FullName => "full_name",
            Projection::TenureMonths => "tenure_months",
            Projection::Field(name) => name,
        }
    }
}

impl From<String> for Projection {
    fn from(name: String) -> Self {
        match name.as_str() {
            "full_name" => Projection::FullName,
            "tenure_months" => Projection::TenureMonths,
            _ => Projection::Field(name),
        }
    }
}

impl From<Projection> for String {
    fn from(projection: Projection) -> Self {
        projection.column_name().to_string()
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_tenure_uses_average_month() {
        let hire = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();

        // 60 days, not two calendar months
        let tenure = tenure_months(hire, now);
        assert!((tenure - 60.0 / 30.44).abs() < 1e-12);
        assert!(tenure < 2.0);
    }

    #[test]
    fn test_tenure_counts_partial_days() {
        let hire = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();

        assert!((tenure_months(hire, now) - 0.5 / 30.44).abs() < 1e-12);
    }

    #[test]
    fn test_parse_projection_list() {
        let parsed: Vec<Projection> =
            serde_yaml::from_str("[full_name, salary, tenure_months]").unwrap();
        assert_eq!(
            parsed,
            vec![
                Projection::FullName,
                Projection::field("salary"),
                Projection::TenureMonths
            ]
        );
    }
}
