use dashshape_common::coerce::is_blank;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    Equals,
    Contains,
    Greater,
    Less,
}

/// Single filter condition. A list of predicates is combined with logical AND.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterPredicate {
    #[serde(default)]
    pub field: String,

    pub operator: FilterOperator,

    #[serde(default)]
    pub value: Value,
}

impl FilterPredicate {
    pub fn new<F: Into<String>, V: Into<Value>>(field: F, operator: FilterOperator, value: V) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// A predicate with no field or no value never excludes a record
    pub fn is_noop(&self) -> bool {
        self.field.trim().is_empty() || is_blank(&self.value)
    }
}
