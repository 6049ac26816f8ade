//! Distribution catalog: departments, positions, skill pools and salary bands.
//!
//! The catalog is a set of closed enumerations plus validated lookup tables.
//! It is built once, checked at construction time and then shared read-only
//! for the lifetime of the process.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for catalog construction.
///
/// Every variant is a programming error in the mapping tables, never a
/// runtime data condition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// A department has no profile in the table
    #[error("Department '{0}' has no profile")]
    MissingDepartment(Department),

    /// A department appears twice in the table
    #[error("Department '{0}' is mapped more than once")]
    DuplicateDepartment(Department),

    /// A department has an empty position list
    #[error("Department '{0}' has no positions")]
    EmptyPositions(Department),

    /// A department has an empty skill pool
    #[error("Department '{0}' has an empty skill pool")]
    EmptySkillPool(Department),

    /// A position is listed under more than one department
    #[error("Position '{position}' is listed under both '{first}' and '{second}'")]
    PositionInMultipleDepartments {
        position: Position,
        first: Department,
        second: Department,
    },

    /// A position is not listed under any department
    #[error("Position '{0}' is not assigned to any department")]
    UnassignedPosition(Position),

    /// A position has no salary band
    #[error("Position '{0}' has no salary band")]
    MissingBand(Position),

    /// A position has more than one salary band
    #[error("Position '{0}' has more than one salary band")]
    DuplicateBand(Position),

    /// A salary band is inverted
    #[error("Salary band for '{position}' is inverted: low {low} > high {high}")]
    InvalidBand { position: Position, low: i64, high: i64 },
}

// ============================================================================
// Enumerations
// ============================================================================

/// Departments an employee can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Department {
    Engineering,
    Sales,
    Marketing,
    Finance,
    #[serde(rename = "Human Resources")]
    HumanResources,
    Operations,
}

impl Department {
    /// All departments, in table order.
    pub const ALL: [Department; 6] = [
        Department::Engineering,
        Department::Sales,
        Department::Marketing,
        Department::Finance,
        Department::HumanResources,
        Department::Operations,
    ];

    /// Wire name of the department.
    pub fn as_str(self) -> &'static str {
        match self {
            Department::Engineering => "Engineering",
            Department::Sales => "Sales",
            Department::Marketing => "Marketing",
            Department::Finance => "Finance",
            Department::HumanResources => "Human Resources",
            Department::Operations => "Operations",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown department: {s}"))
    }
}

/// Job positions. Each position belongs to exactly one department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "Junior Software Engineer")]
    JuniorSoftwareEngineer,
    #[serde(rename = "Software Engineer")]
    SoftwareEngineer,
    #[serde(rename = "Senior Software Engineer")]
    SeniorSoftwareEngineer,
    #[serde(rename = "Staff Engineer")]
    StaffEngineer,
    #[serde(rename = "Engineering Manager")]
    EngineeringManager,

    #[serde(rename = "Sales Representative")]
    SalesRepresentative,
    #[serde(rename = "Account Executive")]
    AccountExecutive,
    #[serde(rename = "Senior Account Executive")]
    SeniorAccountExecutive,
    #[serde(rename = "Sales Manager")]
    SalesManager,

    #[serde(rename = "Marketing Coordinator")]
    MarketingCoordinator,
    #[serde(rename = "Marketing Specialist")]
    MarketingSpecialist,
    #[serde(rename = "Marketing Manager")]
    MarketingManager,
    #[serde(rename = "Marketing Director")]
    MarketingDirector,

    #[serde(rename = "Financial Analyst")]
    FinancialAnalyst,
    #[serde(rename = "Senior Financial Analyst")]
    SeniorFinancialAnalyst,
    #[serde(rename = "Finance Manager")]
    FinanceManager,
    #[serde(rename = "Controller")]
    Controller,

    #[serde(rename = "HR Coordinator")]
    HrCoordinator,
    #[serde(rename = "HR Specialist")]
    HrSpecialist,
    #[serde(rename = "HR Manager")]
    HrManager,
    #[serde(rename = "HR Director")]
    HrDirector,

    #[serde(rename = "Operations Associate")]
    OperationsAssociate,
    #[serde(rename = "Operations Analyst")]
    OperationsAnalyst,
    #[serde(rename = "Operations Manager")]
    OperationsManager,
    #[serde(rename = "Operations Director")]
    OperationsDirector,
}

impl Position {
    /// All positions, in declaration order.
    pub const ALL: [Position; 25] = [
        Position::JuniorSoftwareEngineer,
        Position::SoftwareEngineer,
        Position::SeniorSoftwareEngineer,
        Position::StaffEngineer,
        Position::EngineeringManager,
        Position::SalesRepresentative,
        Position::AccountExecutive,
        Position::SeniorAccountExecutive,
        Position::SalesManager,
        Position::MarketingCoordinator,
        Position::MarketingSpecialist,
        Position::MarketingManager,
        Position::MarketingDirector,
        Position::FinancialAnalyst,
        Position::SeniorFinancialAnalyst,
        Position::FinanceManager,
        Position::Controller,
        Position::HrCoordinator,
        Position::HrSpecialist,
        Position::HrManager,
        Position::HrDirector,
        Position::OperationsAssociate,
        Position::OperationsAnalyst,
        Position::OperationsManager,
        Position::OperationsDirector,
    ];

    /// Wire name of the position.
    pub fn as_str(self) -> &'static str {
        match self {
            Position::JuniorSoftwareEngineer => "Junior Software Engineer",
            Position::SoftwareEngineer => "Software Engineer",
            Position::SeniorSoftwareEngineer => "Senior Software Engineer",
            Position::StaffEngineer => "Staff Engineer",
            Position::EngineeringManager => "Engineering Manager",
            Position::SalesRepresentative => "Sales Representative",
            Position::AccountExecutive => "Account Executive",
            Position::SeniorAccountExecutive => "Senior Account Executive",
            Position::SalesManager => "Sales Manager",
            Position::MarketingCoordinator => "Marketing Coordinator",
            Position::MarketingSpecialist => "Marketing Specialist",
            Position::MarketingManager => "Marketing Manager",
            Position::MarketingDirector => "Marketing Director",
            Position::FinancialAnalyst => "Financial Analyst",
            Position::SeniorFinancialAnalyst => "Senior Financial Analyst",
            Position::FinanceManager => "Finance Manager",
            Position::Controller => "Controller",
            Position::HrCoordinator => "HR Coordinator",
            Position::HrSpecialist => "HR Specialist",
            Position::HrManager => "HR Manager",
            Position::HrDirector => "HR Director",
            Position::OperationsAssociate => "Operations Associate",
            Position::OperationsAnalyst => "Operations Analyst",
            Position::OperationsManager => "Operations Manager",
            Position::OperationsDirector => "Operations Director",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown position: {s}"))
    }
}

/// Inclusive salary range for a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBand {
    pub low: i64,
    pub high: i64,
}

impl SalaryBand {
    pub const fn new(low: i64, high: i64) -> Self {
        Self { low, high }
    }

    /// Whether `salary` lies inside the band (both ends inclusive).
    pub fn contains(&self, salary: i64) -> bool {
        (self.low..=self.high).contains(&salary)
    }
}

/// Positions (ordered by seniority) and skill pool for one department.
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentProfile {
    pub department: Department,
    pub positions: Vec<Position>,
    pub skills: Vec<String>,
}

impl DepartmentProfile {
    pub fn new(department: Department, positions: &[Position], skills: &[&str]) -> Self {
        Self {
            department,
            positions: positions.to_vec(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ============================================================================
// Catalog
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct PositionEntry {
    department: Department,
    rank: usize,
    band: SalaryBand,
}

/// Validated lookup tables. All accessors are total once construction succeeds.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Indexed by `Department::index`
    profiles: Vec<DepartmentProfile>,
    /// Indexed by `Position::index`
    positions: Vec<PositionEntry>,
}

static STANDARD: Lazy<Result<Catalog, CatalogError>> = Lazy::new(Catalog::build_standard);

impl Catalog {
    /// The built-in catalog, built and validated once per process.
    pub fn standard() -> Result<&'static Catalog, CatalogError> {
        STANDARD.as_ref().map_err(Clone::clone)
    }

    /// Build a catalog from raw tables, validating that every department and
    /// every position is mapped exactly once.
    pub fn from_tables(
        profiles: Vec<DepartmentProfile>,
        bands: &[(Position, SalaryBand)],
    ) -> Result<Self, CatalogError> {
        let mut by_department: Vec<Option<DepartmentProfile>> = vec![None; Department::ALL.len()];
        for profile in profiles {
            let slot = &mut by_department[profile.department.index()];
            if slot.is_some() {
                return Err(CatalogError::DuplicateDepartment(profile.department));
            }
            if profile.positions.is_empty() {
                return Err(CatalogError::EmptyPositions(profile.department));
            }
            if profile.skills.is_empty() {
                return Err(CatalogError::EmptySkillPool(profile.department));
            }
            *slot = Some(profile);
        }

        let mut ordered = Vec::with_capacity(Department::ALL.len());
        for (department, slot) in Department::ALL.into_iter().zip(by_department) {
            ordered.push(slot.ok_or(CatalogError::MissingDepartment(department))?);
        }

        let mut owners: Vec<Option<(Department, usize)>> = vec![None; Position::ALL.len()];
        for profile in &ordered {
            for (rank, position) in profile.positions.iter().enumerate() {
                let slot = &mut owners[position.index()];
                if let Some((first, _)) = *slot {
                    return Err(CatalogError::PositionInMultipleDepartments {
                        position: *position,
                        first,
                        second: profile.department,
                    });
                }
                *slot = Some((profile.department, rank));
            }
        }

        let mut band_slots: Vec<Option<SalaryBand>> = vec![None; Position::ALL.len()];
        for (position, band) in bands {
            if band.low > band.high {
                return Err(CatalogError::InvalidBand {
                    position: *position,
                    low: band.low,
                    high: band.high,
                });
            }
            let slot = &mut band_slots[position.index()];
            if slot.is_some() {
                return Err(CatalogError::DuplicateBand(*position));
            }
            *slot = Some(*band);
        }

        let mut positions = Vec::with_capacity(Position::ALL.len());
        for position in Position::ALL {
            let (department, rank) =
                owners[position.index()].ok_or(CatalogError::UnassignedPosition(position))?;
            let band = band_slots[position.index()].ok_or(CatalogError::MissingBand(position))?;
            positions.push(PositionEntry {
                department,
                rank,
                band,
            });
        }

        Ok(Self {
            profiles: ordered,
            positions,
        })
    }

    /// Positions available in a department, ordered from least to most senior.
    pub fn positions(&self, department: Department) -> &[Position] {
        &self.profiles[department.index()].positions
    }

    /// Skill pool of a department (never empty).
    pub fn skill_pool(&self, department: Department) -> &[String] {
        &self.profiles[department.index()].skills
    }

    /// Salary band of a position.
    pub fn salary_band(&self, position: Position) -> SalaryBand {
        self.positions[position.index()].band
    }

    /// Seniority rank of a position: its index in its department's position list.
    pub fn seniority_rank(&self, position: Position) -> usize {
        self.positions[position.index()].rank
    }

    /// Department a position belongs to.
    pub fn department_of(&self, position: Position) -> Department {
        self.positions[position.index()].department
    }

    /// Department profiles in table order.
    pub fn profiles(&self) -> &[DepartmentProfile] {
        &self.profiles
    }

    fn build_standard() -> Result<Catalog, CatalogError> {
        use Position::*;

        let profiles = vec![
            DepartmentProfile::new(
                Department::Engineering,
                &[
                    JuniorSoftwareEngineer,
                    SoftwareEngineer,
                    SeniorSoftwareEngineer,
                    StaffEngineer,
                    EngineeringManager,
                ],
                &[
                    "Rust",
                    "Python",
                    "Go",
                    "Java",
                    "TypeScript",
                    "Kubernetes",
                    "AWS",
                    "PostgreSQL",
                    "System Design",
                    "CI/CD",
                ],
            ),
            DepartmentProfile::new(
                Department::Sales,
                &[
                    SalesRepresentative,
                    AccountExecutive,
                    SeniorAccountExecutive,
                    SalesManager,
                ],
                &[
                    "Negotiation",
                    "CRM",
                    "Salesforce",
                    "Prospecting",
                    "Public Speaking",
                    "Account Management",
                    "Forecasting",
                ],
            ),
            DepartmentProfile::new(
                Department::Marketing,
                &[
                    MarketingCoordinator,
                    MarketingSpecialist,
                    MarketingManager,
                    MarketingDirector,
                ],
                &[
                    "SEO",
                    "Content Strategy",
                    "Google Analytics",
                    "Copywriting",
                    "Social Media",
                    "Brand Management",
                    "Email Marketing",
                ],
            ),
            DepartmentProfile::new(
                Department::Finance,
                &[
                    FinancialAnalyst,
                    SeniorFinancialAnalyst,
                    FinanceManager,
                    Controller,
                ],
                &[
                    "Financial Modeling",
                    "Excel",
                    "Budgeting",
                    "GAAP",
                    "Forecasting",
                    "SQL",
                    "Risk Analysis",
                ],
            ),
            DepartmentProfile::new(
                Department::HumanResources,
                &[HrCoordinator, HrSpecialist, HrManager, HrDirector],
                &[
                    "Recruiting",
                    "Onboarding",
                    "Employee Relations",
                    "Compensation",
                    "HRIS",
                    "Labor Law",
                    "Training",
                ],
            ),
            DepartmentProfile::new(
                Department::Operations,
                &[
                    OperationsAssociate,
                    OperationsAnalyst,
                    OperationsManager,
                    OperationsDirector,
                ],
                &[
                    "Supply Chain",
                    "Logistics",
                    "Lean",
                    "Six Sigma",
                    "Project Management",
                    "Vendor Management",
                    "Excel",
                ],
            ),
        ];

        let bands = [
            (JuniorSoftwareEngineer, SalaryBand::new(60_000, 85_000)),
            (SoftwareEngineer, SalaryBand::new(80_000, 120_000)),
            (SeniorSoftwareEngineer, SalaryBand::new(110_000, 160_000)),
            (StaffEngineer, SalaryBand::new(140_000, 200_000)),
            (EngineeringManager, SalaryBand::new(150_000, 220_000)),
            (SalesRepresentative, SalaryBand::new(40_000, 65_000)),
            (AccountExecutive, SalaryBand::new(55_000, 90_000)),
            (SeniorAccountExecutive, SalaryBand::new(75_000, 120_000)),
            (SalesManager, SalaryBand::new(95_000, 150_000)),
            (MarketingCoordinator, SalaryBand::new(42_000, 60_000)),
            (MarketingSpecialist, SalaryBand::new(55_000, 80_000)),
            (MarketingManager, SalaryBand::new(80_000, 120_000)),
            (MarketingDirector, SalaryBand::new(120_000, 180_000)),
            (FinancialAnalyst, SalaryBand::new(55_000, 75_000)),
            (SeniorFinancialAnalyst, SalaryBand::new(75_000, 105_000)),
            (FinanceManager, SalaryBand::new(100_000, 145_000)),
            (Controller, SalaryBand::new(130_000, 190_000)),
            (HrCoordinator, SalaryBand::new(40_000, 58_000)),
            (HrSpecialist, SalaryBand::new(52_000, 75_000)),
            (HrManager, SalaryBand::new(75_000, 115_000)),
            (HrDirector, SalaryBand::new(110_000, 165_000)),
            (OperationsAssociate, SalaryBand::new(38_000, 55_000)),
            (OperationsAnalyst, SalaryBand::new(50_000, 75_000)),
            (OperationsManager, SalaryBand::new(75_000, 115_000)),
            (OperationsDirector, SalaryBand::new(115_000, 170_000)),
        ];

        Catalog::from_tables(profiles, &bands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard_profiles() -> Vec<DepartmentProfile> {
        Catalog::standard().unwrap().profiles().to_vec()
    }

    fn standard_bands() -> Vec<(Position, SalaryBand)> {
        let catalog = Catalog::standard().unwrap();
        Position::ALL
            .into_iter()
            .map(|p| (p, catalog.salary_band(p)))
            .collect()
    }

    #[test]
    fn test_standard_catalog_is_valid() {
        let catalog = Catalog::standard().unwrap();

        for department in Department::ALL {
            assert!(!catalog.positions(department).is_empty());
            assert!(!catalog.skill_pool(department).is_empty());
            for (rank, position) in catalog.positions(department).iter().enumerate() {
                assert_eq!(catalog.department_of(*position), department);
                assert_eq!(catalog.seniority_rank(*position), rank);
            }
        }

        for position in Position::ALL {
            let band = catalog.salary_band(position);
            assert!(band.low <= band.high, "inverted band for {position}");
        }
    }

    #[test]
    fn test_enum_tables_match_discriminants() {
        for (i, d) in Department::ALL.into_iter().enumerate() {
            assert_eq!(d.index(), i);
        }
        for (i, p) in Position::ALL.into_iter().enumerate() {
            assert_eq!(p.index(), i);
        }
    }

    #[test]
    fn test_missing_department_rejected() {
        let profiles: Vec<_> = standard_profiles()
            .into_iter()
            .filter(|p| p.department != Department::Finance)
            .collect();

        // Finance positions become unassigned, but the department check runs first
        let result = Catalog::from_tables(profiles, &standard_bands());
        assert_eq!(
            result.unwrap_err(),
            CatalogError::MissingDepartment(Department::Finance)
        );
    }

    #[test]
    fn test_empty_skill_pool_rejected() {
        let mut profiles = standard_profiles();
        profiles[1].skills.clear();

        let result = Catalog::from_tables(profiles, &standard_bands());
        assert_eq!(
            result.unwrap_err(),
            CatalogError::EmptySkillPool(Department::Sales)
        );
    }

    #[test]
    fn test_position_in_two_departments_rejected() {
        let mut profiles = standard_profiles();
        profiles[1].positions.push(Position::StaffEngineer);

        let result = Catalog::from_tables(profiles, &standard_bands());
        assert!(matches!(
            result,
            Err(CatalogError::PositionInMultipleDepartments {
                position: Position::StaffEngineer,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_band_rejected() {
        let bands: Vec<_> = standard_bands()
            .into_iter()
            .filter(|(p, _)| *p != Position::Controller)
            .collect();

        let result = Catalog::from_tables(standard_profiles(), &bands);
        assert_eq!(
            result.unwrap_err(),
            CatalogError::MissingBand(Position::Controller)
        );
    }

    #[test]
    fn test_inverted_band_rejected() {
        let mut bands = standard_bands();
        bands[0].1 = SalaryBand::new(90_000, 10_000);

        let result = Catalog::from_tables(standard_profiles(), &bands);
        assert!(matches!(result, Err(CatalogError::InvalidBand { .. })));
    }

    #[test]
    fn test_wire_names_round_trip() {
        for position in Position::ALL {
            let json = serde_json::to_string(&position).unwrap();
            assert_eq!(json, format!("\"{}\"", position.as_str()));
            assert_eq!(position.as_str().parse::<Position>().unwrap(), position);
        }
        assert_eq!(
            "human resources".parse::<Department>().unwrap(),
            Department::HumanResources
        );
        assert!("Legal".parse::<Department>().is_err());
    }
}
