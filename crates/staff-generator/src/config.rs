//! Generator configuration.
//!
//! Configuration can be loaded from YAML and then overridden field by field
//! from the command line. Every value is checked by [`GeneratorConfig::validate`]
//! before any record is generated.

use serde::{Deserialize, Serialize};
use staff_core::{CatalogError, Department};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Error type for invalid generator configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading configuration file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Population size must be positive
    #[error("Invalid population size {0}: must be greater than zero")]
    InvalidPopulationSize(u64),

    /// Identities would not fit in the id space
    #[error("Identity overflow: offset {offset} + count {count} exceeds u64")]
    IdentityOverflow { offset: u64, count: u64 },

    /// Probability outside [0, 1]
    #[error("Invalid {name}: {value} is not a probability in [0, 1]")]
    InvalidProbability { name: &'static str, value: f64 },

    /// Range with min > max or non-finite bounds
    #[error("Invalid {name} range: min {min} > max {max}")]
    InvalidRange {
        name: &'static str,
        min: f64,
        max: f64,
    },

    /// Rating distribution parameters rejected
    #[error("Invalid rating distribution (mean {mean}, std_dev {std_dev})")]
    InvalidRatingDistribution { mean: f64, std_dev: f64 },

    /// Salary bonus factor negative or not finite
    #[error("Invalid salary_bonus_per_year: {0}")]
    InvalidSalaryBonus(f64),

    /// Minimum skill count larger than a department's skill pool
    #[error("skills.min {min} exceeds the {pool_size}-skill pool of department '{department}'")]
    SkillPoolTooSmall {
        department: Department,
        min: usize,
        pool_size: usize,
    },

    /// Department weight negative or not finite
    #[error("Invalid weight {weight} for department '{department}'")]
    InvalidWeight { department: Department, weight: f64 },

    /// Department weight table has no positive entry
    #[error("Department weights must contain at least one positive weight")]
    NoPositiveWeight,

    /// The catalog itself failed validation
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Performance rating distribution: a normal distribution clamped to `[min, max]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RatingConfig {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            mean: 3.5,
            std_dev: 0.8,
            min: 1.0,
            max: 5.0,
        }
    }
}

/// Inclusive bounds on the number of skills per record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SkillCountConfig {
    pub min: usize,
    pub max: usize,
}

impl Default for SkillCountConfig {
    fn default() -> Self {
        Self { min: 2, max: 5 }
    }
}

/// Configuration for record generation and population building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Number of records to build
    pub population_size: u64,

    /// Random seed; `None` draws a fresh seed per run
    pub seed: Option<u64>,

    /// First identity sequence number
    pub id_offset: u64,

    /// Domain used for generated email addresses
    pub email_domain: String,

    /// Multiplicative salary increase per year of experience (0.02 = 2%)
    pub salary_bonus_per_year: f64,

    pub rating: RatingConfig,

    pub skills: SkillCountConfig,

    /// Probability that a record carries a last_promotion date
    pub promotion_probability: f64,

    /// Probability that a record is remote
    pub remote_probability: f64,

    /// Relative department weights; uniform when absent
    pub department_weights: Option<BTreeMap<Department, f64>>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            population_size: 1000,
            seed: None,
            id_offset: 1,
            email_domain: "example.com".to_string(),
            salary_bonus_per_year: 0.02,
            rating: RatingConfig::default(),
            skills: SkillCountConfig::default(),
            promotion_probability: 0.6,
            remote_probability: 0.3,
            department_weights: None,
        }
    }
}

impl GeneratorConfig {
    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Check every option. Called before any generation work starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::InvalidPopulationSize(self.population_size));
        }
        if self.id_offset.checked_add(self.population_size).is_none() {
            return Err(ConfigError::IdentityOverflow {
                offset: self.id_offset,
                count: self.population_size,
            });
        }

        check_probability("promotion_probability", self.promotion_probability)?;
        check_probability("remote_probability", self.remote_probability)?;

        if !self.salary_bonus_per_year.is_finite() || self.salary_bonus_per_year < 0.0 {
            return Err(ConfigError::InvalidSalaryBonus(self.salary_bonus_per_year));
        }

        let rating = &self.rating;
        if !(rating.min.is_finite() && rating.max.is_finite()) || rating.min > rating.max {
            return Err(ConfigError::InvalidRange {
                name: "rating",
                min: rating.min,
                max: rating.max,
            });
        }
        if !rating.mean.is_finite() || !rating.std_dev.is_finite() || rating.std_dev <= 0.0 {
            return Err(ConfigError::InvalidRatingDistribution {
                mean: rating.mean,
                std_dev: rating.std_dev,
            });
        }

        if self.skills.min > self.skills.max {
            return Err(ConfigError::InvalidRange {
                name: "skills",
                min: self.skills.min as f64,
                max: self.skills.max as f64,
            });
        }

        if let Some(weights) = &self.department_weights {
            for (department, weight) in weights {
                if !weight.is_finite() || *weight < 0.0 {
                    return Err(ConfigError::InvalidWeight {
                        department: *department,
                        weight: *weight,
                    });
                }
            }
            if !weights.values().any(|w| *w > 0.0) {
                return Err(ConfigError::NoPositiveWeight);
            }
        }

        Ok(())
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { name, value })
    }
}
