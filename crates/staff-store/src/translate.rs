//! Translation between compiled queries and MongoDB documents.

use bson::{doc, Bson, Document};
use chrono::{DateTime, Utc};
use serde_json::Value;
use staff_core::Employee;
use staff_query::{
    Column, CompareOp, Condition, Operand, Predicate, QueryPlan, ResultRow, StoreError,
    MILLIS_PER_MONTH,
};

/// Convert a record to its stored document. `_id` is the identity sequence
/// so that sorting on `_id` restores insertion order.
pub fn employee_document(employee: &Employee) -> Result<Document, StoreError> {
    let mut document =
        bson::to_document(employee).map_err(|e| StoreError::serialization("insert_many", e))?;
    let id = i64::try_from(employee.employee_id.sequence())
        .map_err(|e| StoreError::serialization("insert_many", e))?;
    document.insert("_id", id);
    Ok(document)
}

/// Convert a stored document back to a record. `operation` labels the error.
pub fn employee_from_document(
    mut document: Document,
    operation: &'static str,
) -> Result<Employee, StoreError> {
    document.remove("_id");
    bson::from_document(document).map_err(|e| StoreError::serialization(operation, e))
}

fn operator(op: CompareOp) -> &'static str {
    match op {
        CompareOp::Eq => "$eq",
        CompareOp::Ne => "$ne",
        CompareOp::Gt => "$gt",
        CompareOp::Gte => "$gte",
        CompareOp::Lt => "$lt",
        CompareOp::Lte => "$lte",
    }
}

fn operand(value: &Operand) -> Bson {
    match value {
        Operand::Integer(i) => Bson::Int64(*i),
        Operand::Real(x) => Bson::Double(*x),
        // Dates are stored as ISO strings, which order like the dates
        Operand::Date(d) => Bson::String(d.format("%Y-%m-%d").to_string()),
        Operand::Text(s) => Bson::String(s.clone()),
        Operand::Boolean(b) => Bson::Boolean(*b),
    }
}

fn condition_document(condition: &Condition) -> Document {
    let mut ops = Document::new();
    // $ne alone would match documents lacking the field
    if condition.op == CompareOp::Ne {
        ops.insert("$exists", true);
    }
    ops.insert(operator(condition.op), operand(&condition.value));

    let mut document = Document::new();
    document.insert(condition.field.name(), ops);
    document
}

/// Translate a predicate to a `find` filter.
pub fn filter_document(predicate: &Predicate) -> Document {
    match predicate {
        Predicate::All(children) if children.is_empty() => Document::new(),
        Predicate::Any(children) if children.is_empty() => doc! { "$expr": false },
        Predicate::All(children) => doc! {
            "$and": children.iter().map(|c| Bson::Document(filter_document(c))).collect::<Vec<_>>()
        },
        Predicate::Any(children) => doc! {
            "$or": children.iter().map(|c| Bson::Document(filter_document(c))).collect::<Vec<_>>()
        },
        Predicate::Condition(condition) => condition_document(condition),
    }
}

fn tenure_expression(now: DateTime<Utc>) -> Document {
    doc! {
        "$divide": [
            {
                "$subtract": [
                    bson::DateTime::from_chrono(now),
                    {
                        "$dateFromString": {
                            "dateString": "$hire_date",
                            "format": "%Y-%m-%d",
                            "timezone": "UTC"
                        }
                    }
                ]
            },
            MILLIS_PER_MONTH
        ]
    }
}

fn projection_document(plan: &QueryPlan) -> Document {
    let mut project = doc! { "_id": 0 };
    for column in plan.columns() {
        match column {
            Column::FullName => {
                project.insert(
                    column.name(),
                    doc! { "$concat": ["$first_name", " ", "$last_name"] },
                );
            }
            Column::TenureMonths => {
                project.insert(column.name(), tenure_expression(plan.now()));
            }
            Column::Field(field) => {
                project.insert(field.name(), 1);
            }
        }
    }
    project
}

/// Aggregation pipeline: match, restore insertion order, then project.
pub fn pipeline(plan: &QueryPlan) -> Vec<Document> {
    let mut stages = vec![
        doc! { "$match": filter_document(plan.predicate()) },
        doc! { "$sort": { "_id": 1 } },
    ];
    if plan.is_projected() {
        stages.push(doc! { "$project": projection_document(plan) });
    }
    stages
}

fn lookup<'a>(document: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut parts = path.split('.');
    let mut current = document.get(parts.next()?)?;
    for part in parts {
        current = current.as_document()?.get(part)?;
    }
    Some(current)
}

/// Build a flat row from a projected document, in column order.
pub fn row_from_document(plan: &QueryPlan, document: &Document) -> ResultRow {
    let mut row = ResultRow::new();
    for column in plan.columns() {
        let value = lookup(document, column.name())
            .map(|bson| bson.clone().into_relaxed_extjson())
            .unwrap_or(Value::Null);
        row.insert(column.name(), value);
    }
    row
}
