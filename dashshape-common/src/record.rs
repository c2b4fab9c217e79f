use crate::error::{DashShapeError, Result};
use serde_json::{Map, Value};

/// Open field map. Field order is preserved so derived output is deterministic.
pub type Record = Map<String, Value>;

/// Reserved field holding the id of the source a record was fetched from
pub const SOURCE_FIELD: &str = "_source";

/// Group key used for records whose grouping field is missing
pub const UNKNOWN_GROUP_KEY: &str = "Unknown";

/// Look up a top-level field, treating an explicit null the same as an absent key
pub fn field_value<'a>(record: &'a Record, field: &str) -> Option<&'a Value> {
    match record.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value),
    }
}

/// Convert a JSON array of objects into records
pub fn records_from_json(value: &Value) -> Result<Vec<Record>> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(record) => Ok(record.clone()),
                other => Err(DashShapeError::internal(format!(
                    "Expected object at index {i}, received {other}"
                ))),
            })
            .collect(),
        other => Err(DashShapeError::internal(format!(
            "Expected an array of records, received {other}"
        ))),
    }
}

pub fn records_to_json(records: &[Record]) -> Value {
    Value::Array(records.iter().cloned().map(Value::Object).collect())
}
