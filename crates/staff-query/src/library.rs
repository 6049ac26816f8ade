//! Named collection of query specifications.
//!
//! A library always starts from the four canonical specifications. A YAML
//! file may override their parameters and add custom specifications:
//!
//! ```yaml
//! queries:
//!   - type: high_performers
//!     min_rating: 4.5
//!   - type: custom
//!     name: remote_engineers
//!     filter:
//!       all:
//!         - { field: department, op: eq, value: Engineering }
//!         - { field: remote, op: eq, value: true }
//!     projection: [full_name, position, address.state]
//! ```

use crate::error::QueryError;
use crate::plan::{EvaluationContext, QueryPlan};
use crate::spec::QuerySpec;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LibraryFile {
    #[serde(default)]
    queries: Vec<QuerySpec>,
}

/// Ordered, name-unique set of specifications.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryLibrary {
    specs: Vec<QuerySpec>,
}

impl Default for QueryLibrary {
    fn default() -> Self {
        Self::canonical()
    }
}

impl QueryLibrary {
    /// The four canonical specifications.
    pub fn canonical() -> Self {
        Self {
            specs: QuerySpec::canonical(),
        }
    }

    /// Canonical library extended with the entries of a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, QueryError> {
        let file: LibraryFile = serde_yaml::from_str(yaml)?;
        let mut library = Self::canonical();
        let mut seen = HashSet::new();

        for spec in file.queries {
            if !seen.insert(spec.name().to_string()) {
                return Err(QueryError::DuplicateQuery(spec.name().to_string()));
            }
            if spec.is_custom() {
                library.add(spec)?;
            } else {
                library.replace(spec);
            }
        }

        Ok(library)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, QueryError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let library = Self::from_yaml(&content)?;
        info!(
            "Loaded {} queries from {}",
            library.specs.len(),
            path.display()
        );
        Ok(library)
    }

    /// Add a specification under a new name.
    pub fn add(&mut self, spec: QuerySpec) -> Result<(), QueryError> {
        if self.specs.iter().any(|s| s.name() == spec.name()) {
            return Err(QueryError::DuplicateQuery(spec.name().to_string()));
        }
        self.specs.push(spec);
        Ok(())
    }

    /// Replace the specification with the same name, keeping its position.
    fn replace(&mut self, spec: QuerySpec) {
        match self.specs.iter_mut().find(|s| s.name() == spec.name()) {
            Some(existing) => *existing = spec,
            None => self.specs.push(spec),
        }
    }

    pub fn get(&self, name: &str) -> Result<&QuerySpec, QueryError> {
        self.specs
            .iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| QueryError::UnknownQuery(name.to_string()))
    }

    pub fn specs(&self) -> &[QuerySpec] {
        &self.specs
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(QuerySpec::name)
    }

    /// Compile every specification, reporting the first configuration error.
    pub fn validate(&self, ctx: &EvaluationContext) -> Result<(), QueryError> {
        for spec in &self.specs {
            QueryPlan::compile(spec, ctx)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const LIBRARY: &str = r#"
queries:
  - type: high_performers
    min_rating: 4.5
  - type: custom
    name: remote_engineers
    filter:
      all:
        - { field: department, op: eq, value: Engineering }
        - { field: remote, op: eq, value: true }
    projection: [full_name, position, address.state]
"#;

    #[test]
    fn test_canonical_library() {
        let library = QueryLibrary::canonical();
        assert_eq!(library.specs().len(), 4);
        assert_eq!(
            library.get("salary_outliers").unwrap(),
            &QuerySpec::salary_outliers()
        );
    }

    #[test]
    fn test_override_and_extend() {
        let library = QueryLibrary::from_yaml(LIBRARY).unwrap();

        let names: Vec<&str> = library.names().collect();
        assert_eq!(
            names,
            vec![
                "high_performers",
                "experience_band",
                "salary_outliers",
                "recent_high_performers",
                "remote_engineers"
            ]
        );
        assert_eq!(
            library.get("high_performers").unwrap(),
            &QuerySpec::HighPerformers {
                min_rating: 4.5,
                salary_above: 80_000
            }
        );
        library.validate(&EvaluationContext::current()).unwrap();
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let yaml = r#"
queries:
  - type: custom
    name: dup
    filter: { all: [] }
  - type: custom
    name: dup
    filter: { any: [] }
"#;
        assert!(matches!(
            QueryLibrary::from_yaml(yaml),
            Err(QueryError::DuplicateQuery(name)) if name == "dup"
        ));

        let clash = "queries:\n  - { type: custom, name: salary_outliers, filter: { all: [] } }\n";
        assert!(matches!(
            QueryLibrary::from_yaml(clash),
            Err(QueryError::DuplicateQuery(_))
        ));
    }

    #[test]
    fn test_unknown_query() {
        let library = QueryLibrary::canonical();
        assert!(matches!(
            library.get("top_earners"),
            Err(QueryError::UnknownQuery(name)) if name == "top_earners"
        ));
    }

    #[test]
    fn test_validate_reports_unknown_field() {
        let yaml = r#"
queries:
  - type: custom
    name: broken
    filter: { field: bonus, op: gt, value: 0 }
"#;
        let library = QueryLibrary::from_yaml(yaml).unwrap();
        assert!(matches!(
            library.validate(&EvaluationContext::current()),
            Err(QueryError::UnknownField { query, .. }) if query == "broken"
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(LIBRARY.as_bytes()).unwrap();

        let library = QueryLibrary::from_file(file.path()).unwrap();
        assert!(library.get("remote_engineers").is_ok());
    }
}
