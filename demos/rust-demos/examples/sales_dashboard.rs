use dashshape_common::record::records_from_json;
use dashshape_core::spec::chart::ChartConfig;
use dashshape_core::spec::sort::{ColumnSpec, SortState};
use dashshape_core::spec::viewport::WindowConfig;
use dashshape_runtime::chart::{chart_view, ChartView};
use dashshape_runtime::data::source::{InlineSource, RecordSource};
use dashshape_runtime::sort::{paginate, sort_records};
use dashshape_runtime::window::{WindowedList, Windower};
use serde_json::json;
use std::sync::Arc;

/// This example merges two order sources into a per-status chart, then sorts the raw
/// orders by clicking a column header and windows the first page for a 300px viewport.
#[tokio::main]
async fn main() {
    env_logger::init();

    let north = records_from_json(&json!([
        {"order_number": "N-1", "status": "Order Created", "grand_total": "120.50"},
        {"order_number": "N-2", "status": "Order Shipped", "grand_total": 80},
        {"order_number": "N-3", "status": null, "grand_total": 15},
    ]))
    .unwrap();
    let south = records_from_json(&json!([
        {"order_number": "S-1", "status": "Order Shipped", "grand_total": 45.25},
        {"order_number": "S-2", "status": "Order Created", "grand_total": "n/a"},
    ]))
    .unwrap();

    let sources: Vec<Arc<dyn RecordSource>> = vec![
        Arc::new(InlineSource::new("north", north.clone())),
        Arc::new(InlineSource::new("south", south.clone())),
    ];

    // Saved chart configuration, as a settings page would store it
    let config = ChartConfig::from_json(
        r#"{
            "title": "Revenue by status",
            "xAxis": "status",
            "aggregates": [
                {"name": "orders", "type": "count"},
                {"name": "revenue", "field": "grand_total", "type": "sum"}
            ]
        }"#,
    )
    .unwrap();

    match chart_view(&sources, &config, &Default::default()).await.unwrap() {
        ChartView::Ready { output } => {
            for warning in &output.warnings {
                println!("warning: {}", warning);
            }
            println!("{}", serde_json::to_string_pretty(&output.rows).unwrap());
        }
        ChartView::Guidance { message } => println!("{}", message),
    }

    // Click "Total" twice for a descending sort
    let total = ColumnSpec::new("grand_total", "Total");
    let state = SortState::default().toggle(&total).toggle(&total);
    let orders: Vec<_> = north.into_iter().chain(south).collect();
    let sorted = sort_records(&orders, &state);
    let page = paginate(&sorted, 1, 50).unwrap();

    let windower = Windower::try_new(WindowConfig::try_new(40.0, 1).unwrap()).unwrap();
    let list = windower.window(&page.items, 0.0, 300.0).unwrap();
    if let WindowedList::Slice { layout, .. } = &list {
        println!("rendering rows {}..{} of {}", layout.range.start, layout.range.end, page.total);
    }
    for (index, order) in list.indexed() {
        println!("{:>3} {} {}", index, order["order_number"], order["grand_total"]);
    }
}
