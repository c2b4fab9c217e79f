use dashshape_common::error::DashShapeError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateOp {
    Sum,
    Count,
    Avg,
}

impl AggregateOp {
    pub fn name(&self) -> &'static str {
        match self {
            AggregateOp::Sum => "sum",
            AggregateOp::Count => "count",
            AggregateOp::Avg => "avg",
        }
    }
}

impl Display for AggregateOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AggregateOp {
    type Err = DashShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sum" => Ok(AggregateOp::Sum),
            "count" => Ok(AggregateOp::Count),
            "avg" => Ok(AggregateOp::Avg),
            other => Err(DashShapeError::configuration(format!(
                "Unsupported aggregate type '{other}', expected one of sum, count, avg"
            ))),
        }
    }
}

/// One named output column computed per group.
///
/// `field` is the input column read per record and is ignored for `count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateFieldSpec {
    pub name: String,

    #[serde(default)]
    pub field: String,

    #[serde(rename = "type")]
    pub op: AggregateOp,
}

impl AggregateFieldSpec {
    pub fn new<N: Into<String>, F: Into<String>>(name: N, field: F, op: AggregateOp) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            op,
        }
    }

    pub fn count<N: Into<String>>(name: N) -> Self {
        Self::new(name, "", AggregateOp::Count)
    }

    pub fn sum<N: Into<String>, F: Into<String>>(name: N, field: F) -> Self {
        Self::new(name, field, AggregateOp::Sum)
    }

    pub fn avg<N: Into<String>, F: Into<String>>(name: N, field: F) -> Self {
        Self::new(name, field, AggregateOp::Avg)
    }
}
