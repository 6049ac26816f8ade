//! `query` command tests over JSONL populations.

use crate::{population_args, reference_date};
use chrono::{TimeZone, Utc};
use serde_json::Value;
use staff_export::{export_records, read_jsonl_records, record_columns, ExportFormat};
use staff_query::{executor, EvaluationContext, QuerySpec};
use staffgen::commands::{run_generate, run_query, GenerateArgs, QueryArgs};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn generate(dir: &Path, count: u64) -> PathBuf {
    let output = dir.join("employees.jsonl");
    run_generate(GenerateArgs {
        population: population_args(count),
        format: ExportFormat::Jsonl,
        output: output.clone(),
    })
    .unwrap();
    output
}

fn query_args(query: &str, input: &Path, output_dir: &Path) -> QueryArgs {
    QueryArgs {
        query: query.to_string(),
        input: Some(input.to_path_buf()),
        mongodb_connection_string: None,
        mongodb_database: None,
        collection: "employees".to_string(),
        queries: None,
        format: ExportFormat::Jsonl,
        output_dir: output_dir.to_path_buf(),
        workers: 0,
        at: Some(Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()),
    }
}

fn read_rows(path: &Path) -> Vec<Value> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn test_all_canonical_queries() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let input = generate(temp_dir.path(), 2000);
    let output_dir = temp_dir.path().join("results");

    let outcomes = run_query(query_args("all", &input, &output_dir)).await?;
    let names: Vec<&str> = outcomes.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "high_performers",
            "experience_band",
            "salary_outliers",
            "recent_high_performers"
        ]
    );

    // Files hold exactly what the executor returns for the same instant
    let population = read_jsonl_records(&input)?;
    let ctx = EvaluationContext::at(Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap());
    for outcome in &outcomes {
        let spec = QuerySpec::canonical()
            .into_iter()
            .find(|s| s.name() == outcome.name)
            .unwrap();
        let expected: Vec<String> = executor::evaluate_at(&spec, &population, &ctx)?
            .iter()
            .map(|row| serde_json::to_string(row).unwrap())
            .collect();

        assert_eq!(outcome.path, output_dir.join(format!("{}.jsonl", outcome.name)));
        assert_eq!(outcome.rows, expected.len());
        let written = std::fs::read_to_string(&outcome.path)?;
        assert_eq!(written.lines().collect::<Vec<_>>(), expected);
    }
    Ok(())
}

#[tokio::test]
async fn test_canonical_semantics_hold_in_results() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let input = generate(temp_dir.path(), 1000);

    let outcomes = run_query(query_args("all", &input, temp_dir.path())).await?;
    let rows = |name: &str| {
        let outcome = outcomes.iter().find(|o| o.name == name).unwrap();
        read_rows(&outcome.path)
    };

    for row in rows("high_performers") {
        assert!(row["performance_rating"].as_f64().unwrap() >= 4.0);
        assert!(row["salary"].as_i64().unwrap() > 80_000);
    }
    for row in rows("experience_band") {
        assert!((5..=10).contains(&row["years_experience"].as_i64().unwrap()));
        assert!((70_000..=120_000).contains(&row["salary"].as_i64().unwrap()));
    }
    for row in rows("salary_outliers") {
        let salary = row["salary"].as_i64().unwrap();
        assert!(!(60_000..=100_000).contains(&salary));
        let keys: Vec<&String> = row.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["full_name", "salary", "years_experience"]);
    }
    let two_years_ago = reference_date()
        .checked_sub_months(chrono::Months::new(24))
        .unwrap()
        .format("%Y-%m-%d")
        .to_string();
    for row in rows("recent_high_performers") {
        assert!(row["hire_date"].as_str().unwrap() >= two_years_ago.as_str());
        assert!(row["performance_rating"].as_f64().unwrap() > 3.5);
        assert!(row["tenure_months"].as_f64().unwrap() >= 0.0);
    }
    Ok(())
}

#[tokio::test]
async fn test_worker_count_does_not_change_results() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let input = generate(temp_dir.path(), 3000);

    let mut outputs = Vec::new();
    for workers in [1, 5] {
        let output_dir = temp_dir.path().join(format!("workers-{workers}"));
        let mut args = query_args("salary_outliers", &input, &output_dir);
        args.workers = workers;
        let outcomes = run_query(args).await?;
        outputs.push(std::fs::read_to_string(&outcomes[0].path)?);
    }

    assert_eq!(outputs[0], outputs[1]);
    Ok(())
}

#[tokio::test]
async fn test_custom_query_library() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let input = generate(temp_dir.path(), 800);

    let mut args = query_args("all", &input, temp_dir.path());
    args.queries = Some("tests/fixtures/queries.yaml".into());
    args.format = ExportFormat::Csv;
    let outcomes = run_query(args).await?;

    assert_eq!(outcomes.len(), 6);

    let remote = outcomes
        .iter()
        .find(|o| o.name == "remote_engineers")
        .unwrap();
    let content = std::fs::read_to_string(&remote.path)?;
    assert_eq!(content.lines().next(), Some("full_name,position,address.state"));
    assert_eq!(content.lines().count(), remote.rows + 1);

    let strict = outcomes
        .iter()
        .find(|o| o.name == "high_performers")
        .unwrap();
    let content = std::fs::read_to_string(&strict.path)?;
    let mut lines = content.lines();
    let rating_column = lines
        .next()
        .unwrap()
        .split(',')
        .position(|h| h == "performance_rating")
        .unwrap();
    for line in lines {
        let rating: f64 = line.split(',').nth(rating_column).unwrap().parse()?;
        assert!(rating >= 4.5);
    }
    Ok(())
}

#[tokio::test]
async fn test_csv_full_records_keep_promotions() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let generated = generate(temp_dir.path(), 600);

    // Unpromoted records first, so the first matching row has no promotion
    let mut records = read_jsonl_records(&generated)?;
    records.sort_by_key(|r| r.last_promotion.is_some());
    let input = temp_dir.path().join("sorted.jsonl");
    export_records(ExportFormat::Jsonl, &input, &records)?;

    let mut args = query_args("high_performers", &input, temp_dir.path());
    args.format = ExportFormat::Csv;
    let outcomes = run_query(args).await?;

    let ctx = EvaluationContext::at(Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap());
    let expected = executor::evaluate_at(&QuerySpec::high_performers(), &records, &ctx)?;
    let promoted = expected
        .iter()
        .filter(|row| row.get("last_promotion").is_some())
        .count();
    assert!(promoted > 0);

    let content = std::fs::read_to_string(&outcomes[0].path)?;
    let mut lines = content.lines();
    let header = lines.next().unwrap();
    assert_eq!(header, record_columns().join(","));
    let column = header
        .split(',')
        .position(|h| h == "last_promotion")
        .unwrap();
    let written = lines
        .filter(|line| line.split(',').nth(column).is_some_and(|cell| !cell.is_empty()))
        .count();
    assert_eq!(written, promoted);
    Ok(())
}

#[tokio::test]
async fn test_unknown_query_name() {
    let temp_dir = TempDir::new().unwrap();
    let input = generate(temp_dir.path(), 10);

    let err = run_query(query_args("top_earners", &input, temp_dir.path()))
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("top_earners"));
}

#[tokio::test]
async fn test_unknown_field_fails_before_writing() {
    let temp_dir = TempDir::new().unwrap();
    let input = generate(temp_dir.path(), 10);
    let queries = temp_dir.path().join("broken.yaml");
    std::fs::write(
        &queries,
        "queries:\n  - { type: custom, name: broken, filter: { field: bonus, op: gt, value: 0 } }\n",
    )
    .unwrap();
    let output_dir = temp_dir.path().join("out");

    let mut args = query_args("all", &input, &output_dir);
    args.queries = Some(queries);
    let err = run_query(args).await.unwrap_err();

    assert!(format!("{err:#}").contains("bonus"));
    assert!(!output_dir.exists());
}

#[tokio::test]
async fn test_missing_source() {
    let temp_dir = TempDir::new().unwrap();
    let mut args = query_args("all", Path::new("unused"), temp_dir.path());
    args.input = None;

    let err = run_query(args).await.unwrap_err();
    assert!(err.to_string().contains("No data source"));
}
