use async_trait::async_trait;
use dashshape_common::error::Result;
use dashshape_common::record::Record;
use dashshape_core::spec::pipeline::PipelineConfig;
use futures::future::join_all;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// A named collection of records the aggregation pipeline can fetch.
///
/// Implementations own the actual I/O (HTTP, storage, auth). The engine only calls
/// `fetch` and tags the result with `id`.
#[async_trait]
pub trait RecordSource: Send + Sync {
    fn id(&self) -> &str;

    async fn fetch(&self) -> Result<Vec<Record>>;
}

/// Source backed by records already in memory
#[derive(Debug, Clone)]
pub struct InlineSource {
    id: String,
    records: Vec<Record>,
}

impl InlineSource {
    pub fn new<S: Into<String>>(id: S, records: Vec<Record>) -> Self {
        Self {
            id: id.into(),
            records,
        }
    }
}

#[async_trait]
impl RecordSource for InlineSource {
    fn id(&self) -> &str {
        &self.id
    }

    async fn fetch(&self) -> Result<Vec<Record>> {
        Ok(self.records.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceWarningKind {
    /// The source's fetch returned an error and contributed no records
    FetchFailed,
    /// The configuration requested a source id that was not supplied
    Missing,
}

/// Non-fatal problem with one source. The pipeline completes without it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceWarning {
    pub source_id: String,
    pub kind: SourceWarningKind,
    pub message: String,
}

impl Display for SourceWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            SourceWarningKind::FetchFailed => {
                write!(f, "Source '{}' failed: {}", self.source_id, self.message)
            }
            SourceWarningKind::Missing => write!(f, "Source '{}' is not available", self.source_id),
        }
    }
}

/// Select the sources named by `requested`, keeping the order of `sources`.
/// An empty request selects every source.
fn select_sources<'a>(
    sources: &'a [Arc<dyn RecordSource>],
    requested: &[String],
) -> (Vec<&'a Arc<dyn RecordSource>>, Vec<SourceWarning>) {
    if requested.is_empty() {
        return (sources.iter().collect(), Vec::new());
    }

    let selected = sources
        .iter()
        .filter(|source| requested.iter().any(|id| id == source.id()))
        .collect::<Vec<_>>();

    let warnings = requested
        .iter()
        .filter(|id| !sources.iter().any(|source| source.id() == id.as_str()))
        .unique()
        .map(|id| SourceWarning {
            source_id: id.clone(),
            kind: SourceWarningKind::Missing,
            message: "no source with this id was supplied".to_string(),
        })
        .collect::<Vec<_>>();
    (selected, warnings)
}

/// Fetch every selected source concurrently and merge the results.
///
/// Each fetch is awaited independently, so one failing source degrades to zero records
/// plus a warning instead of failing the whole merge. Merged records appear grouped by
/// source in the order of `sources`, and each is tagged with its source id under
/// `config.source_field`.
pub async fn fetch_sources(
    sources: &[Arc<dyn RecordSource>],
    requested: &[String],
    config: &PipelineConfig,
) -> (Vec<Record>, Vec<SourceWarning>) {
    let (selected, mut warnings) = select_sources(sources, requested);

    let fetches = selected.iter().map(|source| async move {
        let result = source.fetch().await;
        (source.id().to_string(), result)
    });
    let results = join_all(fetches).await;

    let mut merged: Vec<Record> = Vec::new();
    for (source_id, result) in results {
        match result {
            Ok(records) => {
                log::debug!("Source '{source_id}' returned {} records", records.len());
                merged.extend(records.into_iter().map(|mut record| {
                    record.insert(config.source_field.clone(), Value::String(source_id.clone()));
                    record
                }));
            }
            Err(err) => {
                log::warn!("Source '{source_id}' failed, continuing without it: {err}");
                warnings.push(SourceWarning {
                    source_id,
                    kind: SourceWarningKind::FetchFailed,
                    message: err.to_string(),
                });
            }
        }
    }

    for warning in warnings.iter().filter(|w| w.kind == SourceWarningKind::Missing) {
        log::warn!("{warning}");
    }
    (merged, warnings)
}
