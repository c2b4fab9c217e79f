use dashshape_core::spec::aggregate::AggregateOp;
use dashshape_core::spec::chart::{ChartConfig, ChartType};
use dashshape_core::spec::filter::FilterOperator;
use rstest::rstest;

const SAVED_CHART: &str = r#"
{
    "title": "Revenue by status",
    "chartType": "line",
    "sources": ["orders", "invoices"],
    "filters": [
        {"field": "status", "operator": "contains", "value": "order"},
        {"field": "grand_total", "operator": "greater", "value": 50}
    ],
    "xAxis": "status",
    "aggregates": [
        {"name": "orders", "type": "count"},
        {"name": "revenue", "field": "grand_total", "type": "sum"}
    ]
}
"#;

#[test]
fn test_saved_chart_replays() {
    let config = ChartConfig::from_json(SAVED_CHART).unwrap();
    assert_eq!(config.chart_type, ChartType::Line);
    assert_eq!(config.group_field(), Some("status"));
    assert_eq!(config.filters[1].operator, FilterOperator::Greater);
    assert_eq!(config.aggregates[0].op, AggregateOp::Count);
    assert!(config.aggregates[0].field.is_empty());
    assert!(config.has_axes());

    let replayed = ChartConfig::from_json(&config.to_json().unwrap()).unwrap();
    assert_eq!(replayed, config);
}

#[test]
fn test_minimal_chart_uses_defaults() {
    let config = ChartConfig::from_json("{}").unwrap();
    assert_eq!(config, ChartConfig::default());
    assert!(!config.has_axes());
}

#[rstest(
    json,
    message,
    case(
        r#"{"aggregates": [{"name": "n", "type": "median"}]}"#,
        "Invalid chart configuration"
    ),
    case(
        r#"{"aggregates": [{"name": "n", "type": "count"}, {"name": "n", "field": "x", "type": "sum"}]}"#,
        "Duplicate aggregate names: n"
    ),
    case(
        r#"{"aggregates": [{"name": "total", "type": "avg"}]}"#,
        "requires an input field"
    ),
    case(
        r#"{"aggregates": [{"name": " ", "type": "count"}]}"#,
        "empty output name"
    ),
    case(
        r#"{"xAxis": "status", "aggregates": [{"name": "status", "type": "count"}]}"#,
        "collides with the x axis"
    ),
    case(r#"{"chartType": "radar"}"#, "Invalid chart configuration")
)]
fn test_invalid_chart_rejected(json: &str, message: &str) {
    let err = ChartConfig::from_json(json).unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains(message), "{}", err);
}

#[test]
fn test_blank_x_axis_is_unset() {
    let config = ChartConfig::from_json(
        r#"{"xAxis": "  ", "aggregates": [{"name": "n", "type": "count"}]}"#,
    )
    .unwrap();
    assert_eq!(config.group_field(), None);
    assert!(!config.has_axes());
}
