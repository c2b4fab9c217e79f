use async_trait::async_trait;
use dashshape_common::error::{DashShapeError, Result};
use dashshape_common::record::{records_from_json, Record};
use dashshape_runtime::data::source::{InlineSource, RecordSource};
use serde_json::json;
use std::sync::Arc;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn sales_orders() -> Vec<Record> {
    records_from_json(&json!([
        {"order_number": "SO000001", "status": "Order Created", "customer": {"name": "Acme"}, "grand_total": "120.50", "order_date": "2026-01-03"},
        {"order_number": "SO000002", "status": "Order Shipped", "customer": {"name": "Globex"}, "grand_total": 80, "order_date": "2026-01-05"},
        {"order_number": "SO000003", "status": "Order Created", "customer": {"name": "initech"}, "grand_total": 300, "order_date": "2025-12-28"},
        {"order_number": "SO000004", "status": null, "customer": {"name": "Acme"}, "grand_total": "n/a", "order_date": "2026-01-09"},
        {"order_number": "SO000005", "status": "Order Shipped", "customer": null, "grand_total": 45.25, "order_date": "12/30/2025"},
        {"order_number": "SO000006", "status": "In Production", "customer": {"name": "Umbrella"}, "grand_total": 1000, "order_date": "2026-01-01"}
    ]))
    .unwrap()
}

pub fn expenses() -> Vec<Record> {
    records_from_json(&json!([
        {"category": "Travel", "amount": 200},
        {"category": "Office", "amount": "35.5"},
        {"category": "Travel", "amount": 100}
    ]))
    .unwrap()
}

pub fn inline(id: &str, records: Vec<Record>) -> Arc<dyn RecordSource> {
    Arc::new(InlineSource::new(id, records))
}

/// Source whose fetch always rejects
pub struct FailingSource {
    pub id: String,
}

#[async_trait]
impl RecordSource for FailingSource {
    fn id(&self) -> &str {
        &self.id
    }

    async fn fetch(&self) -> Result<Vec<Record>> {
        Err(DashShapeError::source_fetch("connection reset by peer"))
    }
}

pub fn failing(id: &str) -> Arc<dyn RecordSource> {
    Arc::new(FailingSource { id: id.to_string() })
}
