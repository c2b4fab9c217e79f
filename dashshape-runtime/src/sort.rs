//! Type-inferring record comparison and the table helpers built on it.
use dashshape_common::chrono::NaiveDateTime;
use dashshape_common::coerce::{to_datetime, to_number, to_text};
use dashshape_common::error::{DashShapeError, Result};
use dashshape_common::record::Record;
use dashshape_core::spec::sort::{SortDirection, SortState};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

pub const EMPTY_TABLE_MESSAGE: &str = "No records found";

/// Resolve a dot-delimited path such as `"product.name"`.
///
/// Objects are walked by key and arrays by numeric index. Any other intermediate
/// value, or a missing segment, resolves to `None`.
pub fn resolve<'a>(record: &'a Record, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = record.get(first)?;
    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Comparison key inferred from a present value.
///
/// Pairs of the same kind compare by value. Pairs of different kinds order by kind
/// (numbers, then dates, then text) so that mixed columns still sort by a total order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum InferredKey {
    Number(OrderedFloat<f64>),
    Date(NaiveDateTime),
    Text(String),
}

fn infer_key(value: &Value) -> InferredKey {
    if let Some(n) = to_number(value) {
        InferredKey::Number(OrderedFloat(n))
    } else if let Some(dt) = to_datetime(value) {
        InferredKey::Date(dt)
    } else {
        InferredKey::Text(to_text(value).trim().to_lowercase())
    }
}

/// Compare two optional values. Missing values sort last in either direction.
///
/// Values of different inferred kinds are not compared as strings: numbers precede
/// dates, which precede text, so `"9"` sorts before `"1a"`.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>, direction: SortDirection) -> Ordering {
    match (present(a), present(b)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ordering = infer_key(a).cmp(&infer_key(b));
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
    }
}

pub fn compare_records(a: &Record, b: &Record, path: &str, direction: SortDirection) -> Ordering {
    compare_values(resolve(a, path), resolve(b, path), direction)
}

/// Return a sorted copy of `records`. Equal keys keep their input order.
pub fn sort_records(records: &[Record], state: &SortState) -> Vec<Record> {
    let mut sorted = records.to_vec();
    if let Some(key) = state.key.as_deref() {
        sorted.sort_by(|a, b| compare_records(a, b, key, state.direction));
    }
    sorted
}

/// Body of a rendered table. An empty table shows a message row instead of nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TableBody {
    Rows { rows: Vec<Record> },
    Empty { message: String },
}

pub fn table_body(records: &[Record], state: &SortState) -> TableBody {
    if records.is_empty() {
        TableBody::Empty {
            message: EMPTY_TABLE_MESSAGE.to_string(),
        }
    } else {
        TableBody::Rows {
            rows: sort_records(records, state),
        }
    }
}

/// One page of a list along with the totals needed for pager controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub items: Vec<Record>,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub page_count: usize,
}

/// Slice out 1-based `page`. Pages past the end come back empty.
pub fn paginate(records: &[Record], page: usize, page_size: usize) -> Result<Page> {
    if page_size == 0 {
        return Err(DashShapeError::configuration(
            "page_size must be greater than zero",
        ));
    }
    let page = page.max(1);
    let total = records.len();
    let start = ((page - 1).saturating_mul(page_size)).min(total);
    let end = start.saturating_add(page_size).min(total);
    Ok(Page {
        items: records[start..end].to_vec(),
        page,
        page_size,
        total,
        page_count: total.div_ceil(page_size),
    })
}
