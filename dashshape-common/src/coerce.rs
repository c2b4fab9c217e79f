//! Best-effort conversions of loosely typed record values.
//!
//! Every helper returns an `Option` (or an explicit fallback) so a failed parse is a
//! visible branch at the call site instead of a NaN flowing through arithmetic.
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde_json::{Number, Value};

lazy_static! {
    static ref DATE_LIKE: Regex =
        Regex::new(r"^(\d{4}[-/]\d{1,2}[-/]\d{1,2}|\d{1,2}/\d{1,2}/\d{4})").unwrap();
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parse a value as a finite number.
///
/// JSON numbers are accepted directly. Strings must parse completely after trimming,
/// so `"12abc"` is not a number. Booleans, empty strings and non-finite values
/// (`"NaN"`, `"inf"`) are rejected.
pub fn to_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Numeric value of an optional field, degrading to 0 when missing or unparseable
pub fn number_or_zero(value: Option<&Value>) -> f64 {
    value.and_then(to_number).unwrap_or(0.0)
}

/// Parse a string value as a calendar date or date-time.
///
/// RFC 3339 timestamps are normalized to UTC. Dates without a time component
/// resolve to midnight.
pub fn to_datetime(value: &Value) -> Option<NaiveDateTime> {
    let Value::String(s) = value else {
        return None;
    };
    let s = s.trim();
    if !DATE_LIKE.is_match(s) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Stringify a value the way it would be displayed in a table cell.
///
/// Null becomes the empty string. Integral floats drop their trailing `.0`
/// so `20.0` and `"20"` compare equal.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Stringified grouping key. Missing, null and empty values all map to `unknown`.
pub fn to_group_key(value: Option<&Value>, unknown: &str) -> String {
    match value {
        None | Some(Value::Null) => unknown.to_string(),
        Some(Value::String(s)) if s.is_empty() => unknown.to_string(),
        Some(value) => to_text(value),
    }
}

/// True for null and whitespace-only strings
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => format!("{f}"),
        None => n.to_string(),
    }
}
