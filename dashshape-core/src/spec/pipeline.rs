use dashshape_common::record::{SOURCE_FIELD, UNKNOWN_GROUP_KEY};
use serde::{Deserialize, Serialize};

/// Engine-level settings for the aggregation pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineConfig {
    /// Reserved field each fetched record is tagged with
    pub source_field: String,

    /// Group key used when the grouping field is missing
    pub unknown_key: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_field: SOURCE_FIELD.to_string(),
            unknown_key: UNKNOWN_GROUP_KEY.to_string(),
        }
    }
}
