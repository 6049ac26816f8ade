//! Record generator producing one internally consistent employee per identity.

use crate::config::{ConfigError, GeneratorConfig};
use crate::generators::{contact, dates, experience, rating, salary, skills};
use crate::invariants::{self, InvariantViolation};
use chrono::NaiveDate;
use rand::distributions::WeightedIndex;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use staff_core::{Catalog, Department, Employee, EmployeeId};
use tracing::error;

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Invalid configuration, reported before any record is generated
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A generated record failed its own invariants
    #[error("Generation invariant violation: {0}")]
    InvariantViolation(#[from] InvariantViolation),

    /// The worker pool could not be started
    #[error("Failed to start worker pool: {0}")]
    WorkerPool(String),
}

enum DepartmentPicker {
    Uniform,
    Weighted {
        departments: Vec<Department>,
        weights: Vec<f64>,
        index: WeightedIndex<f64>,
    },
}

impl DepartmentPicker {
    fn from_config(config: &GeneratorConfig) -> Result<Self, ConfigError> {
        let Some(weights) = &config.department_weights else {
            return Ok(DepartmentPicker::Uniform);
        };

        // Departments left out of the table get weight zero
        let departments: Vec<Department> = Department::ALL.to_vec();
        let values: Vec<f64> = departments
            .iter()
            .map(|d| weights.get(d).copied().unwrap_or(0.0))
            .collect();
        let index =
            WeightedIndex::new(values.iter()).map_err(|_| ConfigError::NoPositiveWeight)?;

        Ok(DepartmentPicker::Weighted {
            departments,
            weights: values,
            index,
        })
    }

    /// Departments that can be drawn.
    fn candidates(&self) -> Vec<Department> {
        match self {
            DepartmentPicker::Uniform => Department::ALL.to_vec(),
            DepartmentPicker::Weighted {
                departments,
                weights,
                ..
            } => departments
                .iter()
                .zip(weights)
                .filter(|(_, weight)| **weight > 0.0)
                .map(|(department, _)| *department)
                .collect(),
        }
    }

    fn pick<R: Rng>(&self, rng: &mut R) -> Department {
        match self {
            DepartmentPicker::Uniform => Department::ALL[rng.gen_range(0..Department::ALL.len())],
            DepartmentPicker::Weighted {
                departments, index, ..
            } => departments[index.sample(rng)],
        }
    }
}

/// Generates employee records from the catalog.
///
/// The generator holds no RNG of its own: the caller passes one per call, so
/// the same generator can be shared read-only between worker threads while
/// each worker drives its own deterministic stream.
pub struct RecordGenerator<'a> {
    catalog: &'a Catalog,
    config: &'a GeneratorConfig,
    today: NaiveDate,
    departments: DepartmentPicker,
    rating: Normal<f64>,
}

impl<'a> RecordGenerator<'a> {
    /// Create a generator. `today` is the reference date all generated dates
    /// are relative to.
    pub fn new(
        catalog: &'a Catalog,
        config: &'a GeneratorConfig,
        today: NaiveDate,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let departments = DepartmentPicker::from_config(config)?;
        for department in departments.candidates() {
            let pool_size = catalog.skill_pool(department).len();
            if config.skills.min > pool_size {
                return Err(ConfigError::SkillPoolTooSmall {
                    department,
                    min: config.skills.min,
                    pool_size,
                });
            }
        }
        let rating = Normal::new(config.rating.mean, config.rating.std_dev).map_err(|_| {
            ConfigError::InvalidRatingDistribution {
                mean: config.rating.mean,
                std_dev: config.rating.std_dev,
            }
        })?;

        Ok(Self {
            catalog,
            config,
            today,
            departments,
            rating,
        })
    }

    /// Reference date used for hire and promotion dates.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn config(&self) -> &GeneratorConfig {
        self.config
    }

    /// Generate the record for `identity`, drawing all randomness from `rng`.
    pub fn generate<R: Rng>(
        &self,
        identity: EmployeeId,
        rng: &mut R,
    ) -> Result<Employee, GeneratorError> {
        let config = self.config;

        let department = self.departments.pick(rng);
        let positions = self.catalog.positions(department);
        let position = positions[rng.gen_range(0..positions.len())];
        let rank = self.catalog.seniority_rank(position);

        let years_experience = experience::sample_years_experience(rng, rank);
        let salary = salary::sample_salary(
            rng,
            self.catalog.salary_band(position),
            years_experience,
            config.salary_bonus_per_year,
        );
        let performance_rating =
            rating::sample_rating(rng, &self.rating, config.rating.min, config.rating.max);

        let hire_date = dates::sample_hire_date(rng, self.today, years_experience);
        let last_promotion =
            dates::sample_promotion(rng, hire_date, self.today, config.promotion_probability);

        let skills = skills::sample_skills(
            rng,
            self.catalog.skill_pool(department),
            config.skills.min,
            config.skills.max,
        );

        let (first_name, last_name) = contact::sample_name(rng);
        let email = contact::email_for(&first_name, &last_name, &config.email_domain);
        let remote = rng.gen_bool(config.remote_probability);
        let address = contact::sample_address(rng);

        let employee = Employee {
            employee_id: identity,
            first_name,
            last_name,
            email,
            department,
            position,
            salary,
            years_experience,
            performance_rating,
            skills,
            hire_date,
            last_promotion,
            remote,
            address,
        };

        if let Err(violation) = invariants::check(&employee, self.catalog, config, self.today) {
            error!("{violation}");
            return Err(violation.into());
        }

        Ok(employee)
    }
}
