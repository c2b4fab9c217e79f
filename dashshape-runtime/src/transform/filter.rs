use dashshape_common::coerce::{to_number, to_text};
use dashshape_common::record::Record;
use dashshape_core::spec::filter::{FilterOperator, FilterPredicate};
use serde_json::Value;

pub trait PredicateEval {
    /// Whether `record` satisfies the predicate
    fn test(&self, record: &Record) -> bool;
}

impl PredicateEval for FilterPredicate {
    fn test(&self, record: &Record) -> bool {
        if self.is_noop() {
            return true;
        }
        let actual = record.get(&self.field).unwrap_or(&Value::Null);

        match self.operator {
            FilterOperator::Equals => to_text(actual) == to_text(&self.value),
            FilterOperator::Contains => to_text(actual)
                .to_lowercase()
                .contains(&to_text(&self.value).to_lowercase()),
            FilterOperator::Greater => compare_numbers(actual, &self.value, |a, b| a > b),
            FilterOperator::Less => compare_numbers(actual, &self.value, |a, b| a < b),
        }
    }
}

// Non-numeric operands fail the predicate
fn compare_numbers(actual: &Value, expected: &Value, op: impl Fn(f64, f64) -> bool) -> bool {
    match (to_number(actual), to_number(expected)) {
        (Some(a), Some(b)) => op(a, b),
        _ => false,
    }
}

/// Keep the records that satisfy every predicate
pub fn filter_records(records: &[Record], filters: &[FilterPredicate]) -> Vec<Record> {
    let active: Vec<&FilterPredicate> = filters.iter().filter(|f| !f.is_noop()).collect();
    records
        .iter()
        .filter(|record| active.iter().all(|predicate| predicate.test(record)))
        .cloned()
        .collect()
}
