use dashshape_common::coerce::{number_or_zero, to_group_key};
use dashshape_common::record::Record;
use dashshape_core::spec::aggregate::{AggregateFieldSpec, AggregateOp};
use indexmap::IndexMap;
use serde_json::Value;

/// Records sharing one group key. `key` is `None` for ungrouped input.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<'a> {
    pub key: Option<String>,
    pub members: Vec<&'a Record>,
}

/// Bucket records by the stringified value of `group_field`.
///
/// Groups are returned in first-seen order. Records whose key is missing land in the
/// `unknown` group rather than being dropped. Without a group field every record
/// forms its own group.
pub fn group_records<'a>(
    records: &'a [Record],
    group_field: Option<&str>,
    unknown: &str,
) -> Vec<Group<'a>> {
    let Some(group_field) = group_field else {
        return records
            .iter()
            .map(|record| Group {
                key: None,
                members: vec![record],
            })
            .collect();
    };

    let mut groups: IndexMap<String, Vec<&'a Record>> = IndexMap::new();
    for record in records {
        let key = to_group_key(record.get(group_field), unknown);
        groups.entry(key).or_default().push(record);
    }
    groups
        .into_iter()
        .map(|(key, members)| Group {
            key: Some(key),
            members,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
enum Accumulator {
    Count(u64),
    Sum(f64),
    Avg { sum: f64, count: u64 },
}

impl Accumulator {
    fn new(op: AggregateOp) -> Self {
        match op {
            AggregateOp::Count => Accumulator::Count(0),
            AggregateOp::Sum => Accumulator::Sum(0.0),
            AggregateOp::Avg => Accumulator::Avg { sum: 0.0, count: 0 },
        }
    }

    fn update(&mut self, record: &Record, field: &str) {
        match self {
            Accumulator::Count(count) => *count += 1,
            Accumulator::Sum(sum) => *sum += number_or_zero(record.get(field)),
            Accumulator::Avg { sum, count } => {
                *sum += number_or_zero(record.get(field));
                *count += 1;
            }
        }
    }

    fn finalize(&self) -> Value {
        match self {
            Accumulator::Count(count) => Value::from(*count),
            Accumulator::Sum(sum) => Value::from(finite_or_clamped(*sum)),
            Accumulator::Avg { count: 0, .. } => Value::from(0.0),
            Accumulator::Avg { sum, count } => {
                Value::from(finite_or_clamped(*sum / *count as f64))
            }
        }
    }
}

/// JSON has no infinity, so overflowed totals saturate at the largest finite f64.
/// Inputs are always finite, so NaN cannot arise here.
fn finite_or_clamped(value: f64) -> f64 {
    value.clamp(f64::MIN, f64::MAX)
}

/// Group `records` and compute every aggregate per group.
///
/// Emits one row per group holding the group key under `group_field` followed by each
/// aggregate's `name`. Averages are finalized only after every member of the group has
/// been accumulated.
pub fn aggregate_records(
    records: &[Record],
    group_field: Option<&str>,
    specs: &[AggregateFieldSpec],
    unknown: &str,
) -> Vec<Record> {
    group_records(records, group_field, unknown)
        .into_iter()
        .map(|group| {
            let mut accumulators: Vec<Accumulator> =
                specs.iter().map(|spec| Accumulator::new(spec.op)).collect();
            for member in &group.members {
                for (acc, spec) in accumulators.iter_mut().zip(specs) {
                    acc.update(member, &spec.field);
                }
            }

            let mut row = Record::new();
            if let (Some(field), Some(key)) = (group_field, group.key) {
                row.insert(field.to_string(), Value::String(key));
            }
            for (acc, spec) in accumulators.iter().zip(specs) {
                row.insert(spec.name.clone(), acc.finalize());
            }
            row
        })
        .collect()
}
