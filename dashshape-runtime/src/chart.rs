use crate::data::source::RecordSource;
use crate::transform::pipeline::{aggregate, AggregateOutput};
use dashshape_common::error::Result;
use dashshape_core::spec::chart::ChartConfig;
use dashshape_core::spec::pipeline::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const AXIS_GUIDANCE_MESSAGE: &str =
    "Select an X-axis field and at least one Y-axis aggregate to build this chart";

/// What a chart surface should display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ChartView {
    Ready { output: AggregateOutput },
    Guidance { message: String },
}

/// Build the chart for `config`, or a guidance message when no axes are selected.
///
/// Sources are not fetched when the axes are incomplete.
pub async fn chart_view(
    sources: &[Arc<dyn RecordSource>],
    config: &ChartConfig,
    pipeline: &PipelineConfig,
) -> Result<ChartView> {
    if !config.has_axes() {
        return Ok(ChartView::Guidance {
            message: AXIS_GUIDANCE_MESSAGE.to_string(),
        });
    }
    let output = aggregate(sources, config, pipeline).await?;
    Ok(ChartView::Ready { output })
}
