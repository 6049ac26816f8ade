//! `generate` command tests.

use crate::{population_args, reference_date};
use staff_core::{Catalog, Department};
use staff_export::{read_jsonl_records, record_columns, ExportFormat};
use staffgen::commands::{run_generate, GenerateArgs, PopulationArgs};
use std::collections::HashSet;
use tempfile::TempDir;

#[test]
fn test_generate_is_reproducible() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let first = temp_dir.path().join("first.jsonl");
    let second = temp_dir.path().join("nested/second.jsonl");

    for output in [&first, &second] {
        let metrics = run_generate(GenerateArgs {
            population: population_args(1500),
            format: ExportFormat::Jsonl,
            output: output.clone(),
        })?;
        assert_eq!(metrics.rows_written, 1500);
    }

    assert_eq!(std::fs::read(&first)?, std::fs::read(&second)?);

    let records = read_jsonl_records(&first)?;
    let identities: HashSet<_> = records.iter().map(|r| r.employee_id).collect();
    assert_eq!(identities.len(), 1500);
    Ok(())
}

#[test]
fn test_generate_from_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let output = temp_dir.path().join("employees.jsonl");

    run_generate(GenerateArgs {
        population: PopulationArgs {
            config: Some("tests/fixtures/generator.yaml".into()),
            reference_date: Some(reference_date()),
            workers: 1,
            ..Default::default()
        },
        format: ExportFormat::Jsonl,
        output: output.clone(),
    })?;

    let records = read_jsonl_records(&output)?;
    assert_eq!(records.len(), 300);

    let catalog = Catalog::standard()?;
    let weighted = [Department::Engineering, Department::Sales, Department::Finance];
    for record in &records {
        assert!(weighted.contains(&record.department));
        assert!(record.email.ends_with("@corp.test"));
        assert!(catalog.salary_band(record.position).contains(record.salary));
        assert!((2..=4).contains(&record.skills.len()));
        assert!(record.hire_date <= reference_date());
        if let Some(promotion) = record.last_promotion {
            assert!(record.hire_date < promotion && promotion < reference_date());
        }
    }
    Ok(())
}

#[test]
fn test_generate_csv() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let output = temp_dir.path().join("employees.csv");

    run_generate(GenerateArgs {
        population: population_args(20),
        format: ExportFormat::Csv,
        output: output.clone(),
    })?;

    let content = std::fs::read_to_string(&output)?;
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some(record_columns().join(",").as_str()));
    assert_eq!(lines.count(), 20);
    Ok(())
}

#[test]
fn test_zero_count_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("empty.jsonl");

    let result = run_generate(GenerateArgs {
        population: population_args(0),
        format: ExportFormat::Jsonl,
        output: output.clone(),
    });

    assert!(result.is_err());
    assert!(!output.exists());
}
