use crate::data::source::{fetch_sources, RecordSource, SourceWarning};
use crate::transform::aggregate::aggregate_records;
use crate::transform::filter::filter_records;
use dashshape_common::error::{Result, ResultWithContext};
use dashshape_common::record::Record;
use dashshape_core::spec::aggregate::AggregateFieldSpec;
use dashshape_core::spec::chart::ChartConfig;
use dashshape_core::spec::pipeline::PipelineConfig;
use dashshape_core::spec::sort::ColumnSpec;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Chart-ready rows plus the column layout and any degraded sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateOutput {
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<Record>,
    pub warnings: Vec<SourceWarning>,
}

/// Column layout of aggregated output: the x axis first, then one column per aggregate
pub fn output_columns(group_field: Option<&str>, specs: &[AggregateFieldSpec]) -> Vec<ColumnSpec> {
    group_field
        .map(|field| ColumnSpec::new(field, field))
        .into_iter()
        .chain(specs.iter().map(|spec| ColumnSpec::new(&spec.name, &spec.name)))
        .collect()
}

/// Filter and aggregate records that have already been merged
pub fn shape_records(
    records: &[Record],
    config: &ChartConfig,
    pipeline: &PipelineConfig,
) -> Result<Vec<Record>> {
    config
        .validate()
        .with_context(|| "Invalid chart configuration")?;

    let filtered = filter_records(records, &config.filters);
    log::debug!(
        "Filtered {} of {} records with {} predicates",
        filtered.len(),
        records.len(),
        config.filters.len()
    );

    let rows = aggregate_records(
        &filtered,
        config.group_field(),
        &config.aggregates,
        &pipeline.unknown_key,
    );
    log::debug!("Aggregated into {} rows", rows.len());
    Ok(rows)
}

/// Run the full pipeline: fetch the configured sources concurrently, merge, filter,
/// group and aggregate.
///
/// Configuration errors are returned before any source is fetched. A failing source
/// is reported in `warnings` and does not fail the call.
pub async fn aggregate(
    sources: &[Arc<dyn RecordSource>],
    config: &ChartConfig,
    pipeline: &PipelineConfig,
) -> Result<AggregateOutput> {
    config
        .validate()
        .with_context(|| "Invalid chart configuration")?;

    let (records, warnings) = fetch_sources(sources, &config.sources, pipeline).await;
    let rows = shape_records(&records, config, pipeline)?;

    Ok(AggregateOutput {
        columns: output_columns(config.group_field(), &config.aggregates),
        rows,
        warnings,
    })
}
