//! Result rows.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use staff_core::{Employee, Field};

/// One output row: an ordered map from column name to JSON value.
///
/// Full-record rows keep the record's wire shape (nested `address` object,
/// absent `last_promotion` omitted); projected rows are flat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultRow(Map<String, Value>);

impl ResultRow {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Build a row in the record's wire shape.
    pub fn from_employee(employee: &Employee) -> Self {
        let mut map = Map::new();
        for field in Field::ALL {
            let Some(value) = field.value(employee) else {
                continue;
            };
            match field.name().split_once('.') {
                Some((parent, child)) => {
                    let nested = map
                        .entry(parent)
                        .or_insert_with(|| Value::Object(Map::new()));
                    if let Value::Object(nested) = nested {
                        nested.insert(child.to_string(), value.to_json());
                    }
                }
                None => {
                    map.insert(field.name().to_string(), value.to_json());
                }
            }
        }
        Self(map)
    }

    pub fn insert(&mut self, column: impl Into<String>, value: Value) {
        self.0.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// Column names in output order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for ResultRow {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::employee;

    #[test]
    fn test_full_row_matches_wire_shape() {
        let record = employee(90_000, 4.1, 7);
        let row = ResultRow::from_employee(&record);

        let wire = serde_json::to_value(&record).unwrap();
        assert_eq!(serde_json::to_value(&row).unwrap(), wire);
    }

    #[test]
    fn test_absent_promotion_omitted() {
        let mut record = employee(90_000, 4.1, 7);
        record.last_promotion = None;

        let row = ResultRow::from_employee(&record);
        assert!(row.get("last_promotion").is_none());
        assert_eq!(row.columns().last(), Some("address"));
    }
}
