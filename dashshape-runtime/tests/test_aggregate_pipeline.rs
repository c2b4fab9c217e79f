mod util;

use dashshape_core::spec::aggregate::AggregateFieldSpec;
use dashshape_core::spec::chart::ChartConfig;
use dashshape_core::spec::filter::{FilterOperator, FilterPredicate};
use dashshape_core::spec::pipeline::PipelineConfig;
use dashshape_runtime::chart::{chart_view, ChartView, AXIS_GUIDANCE_MESSAGE};
use dashshape_runtime::data::source::SourceWarningKind;
use dashshape_runtime::transform::aggregate::aggregate_records;
use dashshape_runtime::transform::filter::filter_records;
use dashshape_runtime::transform::pipeline::{aggregate, shape_records};
use rstest::rstest;
use serde_json::json;
use util::datasets::{expenses, failing, inline, init_logging, sales_orders};

fn status_config() -> ChartConfig {
    ChartConfig {
        sources: vec!["orders".to_string()],
        x_axis: Some("status".to_string()),
        aggregates: vec![
            AggregateFieldSpec::count("orders"),
            AggregateFieldSpec::sum("revenue", "grand_total"),
            AggregateFieldSpec::avg("average", "grand_total"),
        ],
        ..Default::default()
    }
}

#[tokio::test]
async fn test_aggregate_by_status() {
    init_logging();
    let sources = vec![inline("orders", sales_orders()), inline("expenses", expenses())];
    let output = aggregate(&sources, &status_config(), &Default::default())
        .await
        .unwrap();

    assert!(output.warnings.is_empty());
    assert_eq!(
        serde_json::to_value(&output.rows).unwrap(),
        json!([
            {"status": "Order Created", "orders": 2, "revenue": 420.5, "average": 210.25},
            {"status": "Order Shipped", "orders": 2, "revenue": 125.25, "average": 62.625},
            {"status": "Unknown", "orders": 1, "revenue": 0.0, "average": 0.0},
            {"status": "In Production", "orders": 1, "revenue": 1000.0, "average": 1000.0},
        ])
    );
    let column_keys: Vec<_> = output.columns.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(column_keys, vec!["status", "orders", "revenue", "average"]);
}

#[tokio::test]
async fn test_partial_source_failure() {
    init_logging();
    let sources = vec![inline("expenses", expenses()), failing("payroll")];
    let config = ChartConfig {
        x_axis: Some("category".to_string()),
        aggregates: vec![AggregateFieldSpec::sum("total", "amount")],
        ..Default::default()
    };
    let output = aggregate(&sources, &config, &Default::default())
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_value(&output.rows).unwrap(),
        json!([
            {"category": "Travel", "total": 300.0},
            {"category": "Office", "total": 35.5},
        ])
    );
    assert_eq!(output.warnings.len(), 1);
    assert_eq!(output.warnings[0].source_id, "payroll");
    assert_eq!(output.warnings[0].kind, SourceWarningKind::FetchFailed);
}

#[tokio::test]
async fn test_every_source_failing_yields_empty_rows() {
    let sources = vec![failing("a"), failing("b")];
    let output = aggregate(&sources, &status_config(), &Default::default())
        .await
        .unwrap();
    assert!(output.rows.is_empty());
}

#[tokio::test]
async fn test_group_by_source_provenance() {
    let sources = vec![inline("orders", sales_orders()), inline("expenses", expenses())];
    let config = ChartConfig {
        x_axis: Some("_source".to_string()),
        aggregates: vec![AggregateFieldSpec::count("records")],
        ..Default::default()
    };
    let output = aggregate(&sources, &config, &Default::default())
        .await
        .unwrap();
    assert_eq!(
        serde_json::to_value(&output.rows).unwrap(),
        json!([
            {"_source": "orders", "records": 6},
            {"_source": "expenses", "records": 3},
        ])
    );
}

#[tokio::test]
async fn test_deterministic_output() {
    let sources = vec![inline("orders", sales_orders())];
    let mut config = status_config();
    config.filters = vec![FilterPredicate::new("grand_total", FilterOperator::Greater, 50)];

    let first = aggregate(&sources, &config, &Default::default()).await.unwrap();
    let second = aggregate(&sources, &config, &Default::default()).await.unwrap();
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn test_configuration_error_fails_fast() {
    let sources = vec![inline("orders", sales_orders())];
    let mut config = status_config();
    config.aggregates.push(AggregateFieldSpec::count("orders"));
    let err = aggregate(&sources, &config, &Default::default())
        .await
        .unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("Invalid chart configuration"));
}

#[tokio::test]
async fn test_chart_guidance_without_axes() {
    let sources = vec![failing("orders")];
    let mut config = status_config();
    config.x_axis = None;
    let view = chart_view(&sources, &config, &Default::default()).await.unwrap();
    assert_eq!(
        view,
        ChartView::Guidance {
            message: AXIS_GUIDANCE_MESSAGE.to_string()
        }
    );

    let sources = vec![inline("orders", sales_orders())];
    let view = chart_view(&sources, &status_config(), &Default::default())
        .await
        .unwrap();
    assert!(matches!(view, ChartView::Ready { output } if output.rows.len() == 4));
}

#[test]
fn test_custom_unknown_key() {
    let pipeline = PipelineConfig {
        unknown_key: "Uncategorized".to_string(),
        ..Default::default()
    };
    let rows = shape_records(&sales_orders(), &status_config(), &pipeline).unwrap();
    assert_eq!(rows[2]["status"], json!("Uncategorized"));
}

#[rstest(
    filters,
    case(vec![]),
    case(vec![FilterPredicate::new("grand_total", FilterOperator::Greater, 100)]),
    case(vec![FilterPredicate::new("status", FilterOperator::Contains, "order")]),
    case(vec![
        FilterPredicate::new("status", FilterOperator::Equals, "Order Shipped"),
        FilterPredicate::new("grand_total", FilterOperator::Less, "60"),
    ])
)]
fn test_group_counts_sum_to_filtered_count(filters: Vec<FilterPredicate>) {
    let records = sales_orders();
    let filtered = filter_records(&records, &filters);
    let rows = aggregate_records(
        &filtered,
        Some("status"),
        &[AggregateFieldSpec::count("n")],
        "Unknown",
    );
    let total: u64 = rows.iter().map(|r| r["n"].as_u64().unwrap()).sum();
    assert_eq!(total as usize, filtered.len());
}

#[rstest(
    blank,
    case(json!("")),
    case(json!(null)),
    case(json!("   "))
)]
fn test_blank_predicate_is_noop(blank: serde_json::Value) {
    let base = vec![FilterPredicate::new("grand_total", FilterOperator::Greater, 100)];
    let mut with_blank = base.clone();
    with_blank.push(FilterPredicate::new("status", FilterOperator::Equals, blank));
    let records = sales_orders();
    assert_eq!(filter_records(&records, &with_blank), filter_records(&records, &base));
}

#[test]
fn test_refilter_is_idempotent() {
    let filters = vec![
        FilterPredicate::new("status", FilterOperator::Contains, "order"),
        FilterPredicate::new("grand_total", FilterOperator::Greater, 50),
    ];
    let records = sales_orders();
    let once = filter_records(&records, &filters);
    let twice = filter_records(&once, &filters);
    assert_eq!(once, twice);
    assert_eq!(once.len(), 3);
}

#[test]
fn test_input_records_untouched() {
    let records = sales_orders();
    let before = records.clone();
    let _ = shape_records(&records, &status_config(), &Default::default()).unwrap();
    assert_eq!(records, before);
}
