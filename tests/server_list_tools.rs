mod common;

use common::offline_server;
use serde_json::json;

#[test]
fn list_tools_has_the_five_ga4_tools() {
    let (server, _) = offline_server();
    let tools = server.get_tools();
    assert_eq!(tools.len(), 5);
    let names: Vec<_> = tools.iter().map(|t| t.name.as_str()).collect();
    assert!(names.contains(&"list_dimension_categories"));
    assert!(names.contains(&"list_metric_categories"));
    assert!(names.contains(&"get_dimensions_by_category"));
    assert!(names.contains(&"get_metrics_by_category"));
    assert!(names.contains(&"get_ga4_data"));
}

#[test]
fn ga4_data_schema_advertises_defaults() {
    let (server, _) = offline_server();
    let tool = server
        .get_tools()
        .into_iter()
        .find(|t| t.name == "get_ga4_data")
        .unwrap();
    let properties = &tool.input_schema["properties"];
    assert_eq!(properties["dimensions"]["default"], json!(["date"]));
    assert_eq!(properties["metrics"]["default"], json!(["totalUsers", "newUsers"]));
    assert_eq!(properties["date_range_start"]["default"], "7daysAgo");
    assert_eq!(properties["date_range_end"]["default"], "yesterday");
    assert_eq!(tool.input_schema["required"], json!([]));
}
