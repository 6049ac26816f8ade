//! Query specifications.
//!
//! Each [`QuerySpec`] variant is a pure description of a filter and an
//! optional projection. Nothing here touches records or any store's query
//! syntax; compilation into something executable happens in [`crate::plan`].

use crate::filter::{Bound, CompareOp, Comparison, Filter, Scalar};
use crate::projection::Projection;
use serde::{Deserialize, Serialize};

const DEFAULT_HIGH_PERFORMER_RATING: f64 = 4.0;
const DEFAULT_HIGH_PERFORMER_SALARY: i64 = 80_000;
const DEFAULT_BAND_MIN_YEARS: u32 = 5;
const DEFAULT_BAND_MAX_YEARS: u32 = 10;
const DEFAULT_BAND_MIN_SALARY: i64 = 70_000;
const DEFAULT_BAND_MAX_SALARY: i64 = 120_000;
const DEFAULT_OUTLIER_BELOW: i64 = 60_000;
const DEFAULT_OUTLIER_ABOVE: i64 = 100_000;
const DEFAULT_RECENT_WITHIN_YEARS: u32 = 2;
const DEFAULT_RECENT_RATING: f64 = 3.5;

fn default_high_performer_rating() -> f64 {
    DEFAULT_HIGH_PERFORMER_RATING
}
fn default_high_performer_salary() -> i64 {
    DEFAULT_HIGH_PERFORMER_SALARY
}
fn default_band_min_years() -> u32 {
    DEFAULT_BAND_MIN_YEARS
}
fn default_band_max_years() -> u32 {
    DEFAULT_BAND_MAX_YEARS
}
fn default_band_min_salary() -> i64 {
    DEFAULT_BAND_MIN_SALARY
}
fn default_band_max_salary() -> i64 {
    DEFAULT_BAND_MAX_SALARY
}
fn default_outlier_below() -> i64 {
    DEFAULT_OUTLIER_BELOW
}
fn default_outlier_above() -> i64 {
    DEFAULT_OUTLIER_ABOVE
}
fn default_recent_within_years() -> u32 {
    DEFAULT_RECENT_WITHIN_YEARS
}
fn default_recent_rating() -> f64 {
    DEFAULT_RECENT_RATING
}

/// A user-defined named specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomQuery {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub filter: Filter,
    /// Output columns; empty returns full records
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projection: Vec<Projection>,
}

/// A named query specification.
///
/// The canonical variants carry their bound parameters with the standard
/// values as defaults, so `{ type: high_performers }` in YAML yields the
/// canonical query and `{ type: high_performers, min_rating: 4.5 }` a
/// stricter one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuerySpec {
    /// `performance_rating >= min_rating AND salary > salary_above`
    HighPerformers {
        #[serde(default = "default_high_performer_rating")]
        min_rating: f64,
        #[serde(default = "default_high_performer_salary")]
        salary_above: i64,
    },
    /// `min_years <= years_experience <= max_years AND min_salary <= salary <= max_salary`
    ExperienceBand {
        #[serde(default = "default_band_min_years")]
        min_years: u32,
        #[serde(default = "default_band_max_years")]
        max_years: u32,
        #[serde(default = "default_band_min_salary")]
        min_salary: i64,
        #[serde(default = "default_band_max_salary")]
        max_salary: i64,
    },
    /// `salary < below OR salary > above`
    SalaryOutliers {
        #[serde(default = "default_outlier_below")]
        below: i64,
        #[serde(default = "default_outlier_above")]
        above: i64,
    },
    /// `hire_date >= today - within_years AND performance_rating > rating_above`
    RecentHighPerformers {
        #[serde(default = "default_recent_within_years")]
        within_years: u32,
        #[serde(default = "default_recent_rating")]
        rating_above: f64,
    },
    Custom(CustomQuery),
}

impl QuerySpec {
    pub fn high_performers() -> Self {
        QuerySpec::HighPerformers {
            min_rating: DEFAULT_HIGH_PERFORMER_RATING,
            salary_above: DEFAULT_HIGH_PERFORMER_SALARY,
        }
    }

    pub fn experience_band() -> Self {
        QuerySpec::ExperienceBand {
            min_years: DEFAULT_BAND_MIN_YEARS,
            max_years: DEFAULT_BAND_MAX_YEARS,
            min_salary: DEFAULT_BAND_MIN_SALARY,
            max_salary: DEFAULT_BAND_MAX_SALARY,
        }
    }

    pub fn salary_outliers() -> Self {
        QuerySpec::SalaryOutliers {
            below: DEFAULT_OUTLIER_BELOW,
            above: DEFAULT_OUTLIER_ABOVE,
        }
    }

    pub fn recent_high_performers() -> Self {
        QuerySpec::RecentHighPerformers {
            within_years: DEFAULT_RECENT_WITHIN_YEARS,
            rating_above: DEFAULT_RECENT_RATING,
        }
    }

    /// The four standard specifications in their standard order.
    pub fn canonical() -> Vec<QuerySpec> {
        vec![
            Self::high_performers(),
            Self::experience_band(),
            Self::salary_outliers(),
            Self::recent_high_performers(),
        ]
    }

    pub fn name(&self) -> &str {
        match self {
            QuerySpec::HighPerformers { .. } => "high_performers",
            QuerySpec::ExperienceBand { .. } => "experience_band",
            QuerySpec::SalaryOutliers { .. } => "salary_outliers",
            QuerySpec::RecentHighPerformers { .. } => "recent_high_performers",
            QuerySpec::Custom(custom) => &custom.name,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, QuerySpec::Custom(_))
    }

    pub fn description(&self) -> &str {
        match self {
            QuerySpec::HighPerformers { .. } => "Highly rated employees above the salary threshold",
            QuerySpec::ExperienceBand { .. } => "Mid-career employees within a salary band",
            QuerySpec::SalaryOutliers { .. } => "Salaries outside the normal band",
            QuerySpec::RecentHighPerformers { .. } => "Recent hires with strong ratings",
            QuerySpec::Custom(custom) => custom.description.as_deref().unwrap_or(""),
        }
    }

    /// Filter tree with explicit boundary operators.
    pub fn filter(&self) -> Filter {
        match self {
            QuerySpec::HighPerformers {
                min_rating,
                salary_above,
            } => Filter::all(vec![
                Filter::gte("performance_rating", Scalar::Float(*min_rating)),
                Filter::gt("salary", Scalar::Int(*salary_above)),
            ]),
            QuerySpec::ExperienceBand {
                min_years,
                max_years,
                min_salary,
                max_salary,
            } => Filter::all(vec![
                Filter::gte("years_experience", Scalar::Int(i64::from(*min_years))),
                Filter::lte("years_experience", Scalar::Int(i64::from(*max_years))),
                Filter::gte("salary", Scalar::Int(*min_salary)),
                Filter::lte("salary", Scalar::Int(*max_salary)),
            ]),
            QuerySpec::SalaryOutliers { below, above } => Filter::any(vec![
                Filter::lt("salary", Scalar::Int(*below)),
                Filter::gt("salary", Scalar::Int(*above)),
            ]),
            QuerySpec::RecentHighPerformers {
                within_years,
                rating_above,
            } => Filter::all(vec![
                Filter::Compare(Comparison::new(
                    "hire_date",
                    CompareOp::Gte,
                    Bound::YearsAgo(*within_years),
                )),
                Filter::gt("performance_rating", Scalar::Float(*rating_above)),
            ]),
            QuerySpec::Custom(custom) => custom.filter.clone(),
        }
    }

    /// Output columns. Empty means full records.
    pub fn projection(&self) -> Vec<Projection> {
        match self {
            QuerySpec::HighPerformers { .. } | QuerySpec::ExperienceBand { .. } => Vec::new(),
            QuerySpec::SalaryOutliers { .. } => vec![
                Projection::FullName,
                Projection::field("salary"),
                Projection::field("years_experience"),
            ],
            QuerySpec::RecentHighPerformers { .. } => vec![
                Projection::FullName,
                Projection::field("performance_rating"),
                Projection::field("hire_date"),
                Projection::TenureMonths,
            ],
            QuerySpec::Custom(custom) => custom.projection.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_names() {
        let names: Vec<String> = QuerySpec::canonical()
            .iter()
            .map(|s| s.name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "high_performers",
                "experience_band",
                "salary_outliers",
                "recent_high_performers"
            ]
        );
    }

    #[test]
    fn test_defaults_from_yaml() {
        let spec: QuerySpec = serde_yaml::from_str("type: high_performers").unwrap();
        assert_eq!(spec, QuerySpec::high_performers());

        let spec: QuerySpec =
            serde_yaml::from_str("type: salary_outliers\nabove: 150000").unwrap();
        assert_eq!(
            spec,
            QuerySpec::SalaryOutliers {
                below: 60_000,
                above: 150_000
            }
        );
    }

    #[test]
    fn test_outliers_is_disjunction() {
        match QuerySpec::salary_outliers().filter() {
            Filter::Any { any } => assert_eq!(any.len(), 2),
            other => panic!("expected disjunction, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_from_yaml() {
        let yaml = r#"
type: custom
name: remote_seniors
description: Remote staff with ten or more years
filter:
  all:
    - { field: remote, op: eq, value: true }
    - { field: years_experience, op: gte, value: 10 }
projection: [full_name, department]
"#;
        let spec: QuerySpec = serde_yaml::from_str(yaml).unwrap();
        assert!(spec.is_custom());
        assert_eq!(spec.name(), "remote_seniors");
        assert_eq!(spec.description(), "Remote staff with ten or more years");
        assert_eq!(
            spec.projection(),
            vec![Projection::FullName, Projection::field("department")]
        );
    }
}
