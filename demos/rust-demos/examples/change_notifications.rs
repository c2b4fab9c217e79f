use async_trait::async_trait;
use dashshape_common::error::{DashShapeError, Result};
use dashshape_common::record::{records_from_json, Record};
use dashshape_core::spec::aggregate::AggregateFieldSpec;
use dashshape_core::spec::chart::ChartConfig;
use dashshape_runtime::data::source::RecordSource;
use dashshape_runtime::generation::GenerationCounter;
use dashshape_runtime::notify::{ChangeKind, ChangeNotifier, DataChanged};
use dashshape_runtime::transform::pipeline::aggregate;
use serde_json::json;
use std::sync::Arc;

/// Source that always fails, standing in for an unreachable backend
struct OfflineSource;

#[async_trait]
impl RecordSource for OfflineSource {
    fn id(&self) -> &str {
        "payroll"
    }

    async fn fetch(&self) -> Result<Vec<Record>> {
        Err(DashShapeError::source_fetch("payroll service is offline"))
    }
}

struct Products;

#[async_trait]
impl RecordSource for Products {
    fn id(&self) -> &str {
        "products"
    }

    async fn fetch(&self) -> Result<Vec<Record>> {
        records_from_json(&json!([
            {"name": "Bolt", "category": "Hardware", "qty": 120},
            {"name": "Glue", "category": "Supplies", "qty": "35"},
            {"name": "Nut", "category": "Hardware", "qty": 80},
        ]))
    }
}

/// This example refreshes an inventory chart whenever a "products changed" event is
/// published, discarding any result that a newer refresh has superseded.
#[tokio::main]
async fn main() {
    env_logger::init();

    let notifier = ChangeNotifier::default();
    let mut inventory_page = notifier.subscribe();
    let generations = GenerationCounter::new();

    let sources: Vec<Arc<dyn RecordSource>> = vec![Arc::new(Products), Arc::new(OfflineSource)];
    let config = ChartConfig {
        x_axis: Some("category".to_string()),
        aggregates: vec![AggregateFieldSpec::sum("stock", "qty")],
        ..Default::default()
    };

    notifier.publish(DataChanged::new("products", ChangeKind::Updated));

    let event = inventory_page.recv().await.unwrap();
    println!("{} changed ({:?}), refreshing", event.source_id, event.kind);

    let generation = generations.next();
    let output = aggregate(&sources, &config, &Default::default())
        .await
        .unwrap();
    if generations.is_current(generation) {
        for warning in &output.warnings {
            println!("warning: {}", warning);
        }
        println!("{}", serde_json::to_string_pretty(&output.rows).unwrap());
    }
}
