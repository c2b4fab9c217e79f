use crate::spec::aggregate::{AggregateFieldSpec, AggregateOp};
use crate::spec::filter::FilterPredicate;
use dashshape_common::error::{DashShapeError, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Pie,
    Area,
    Table,
}

/// Declarative description of a chart: which sources to merge, how to filter them,
/// what to group by and which aggregates to compute. Plain data so it can be saved
/// and replayed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub chart_type: ChartType,

    /// Source ids to merge. Empty means every available source.
    #[serde(default)]
    pub sources: Vec<String>,

    #[serde(default)]
    pub filters: Vec<FilterPredicate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<String>,

    #[serde(default)]
    pub aggregates: Vec<AggregateFieldSpec>,
}

impl ChartConfig {
    /// Parse and validate a saved configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ChartConfig = serde_json::from_str(json).map_err(|err| {
            DashShapeError::configuration(format!("Invalid chart configuration: {err}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Grouping field, with an empty string treated as unset
    pub fn group_field(&self) -> Option<&str> {
        self.x_axis
            .as_deref()
            .map(str::trim)
            .filter(|field| !field.is_empty())
    }

    /// True when both an x axis and at least one aggregate are selected
    pub fn has_axes(&self) -> bool {
        self.group_field().is_some() && !self.aggregates.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        for spec in &self.aggregates {
            if spec.name.trim().is_empty() {
                return Err(DashShapeError::configuration(format!(
                    "Aggregate over field '{}' has an empty output name",
                    spec.field
                )));
            }
            if spec.op != AggregateOp::Count && spec.field.trim().is_empty() {
                return Err(DashShapeError::configuration(format!(
                    "Aggregate '{}' requires an input field for {} op",
                    spec.name, spec.op
                )));
            }
            if self.group_field() == Some(spec.name.as_str()) {
                return Err(DashShapeError::configuration(format!(
                    "Aggregate name '{}' collides with the x axis field",
                    spec.name
                )));
            }
        }

        let duplicates: Vec<_> = self
            .aggregates
            .iter()
            .map(|spec| spec.name.as_str())
            .duplicates()
            .collect();
        if !duplicates.is_empty() {
            return Err(DashShapeError::configuration(format!(
                "Duplicate aggregate names: {}",
                duplicates.join(", ")
            )));
        }
        Ok(())
    }
}
