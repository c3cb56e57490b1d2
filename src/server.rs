use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::analytics::ReportClient;
use crate::config::Ga4Config;
use crate::tools::{Catalog, Ga4DataTools, GA4_DIMENSIONS, GA4_METRICS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// The fixed set of tools this server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    ListDimensionCategories,
    ListMetricCategories,
    GetDimensionsByCategory,
    GetMetricsByCategory,
    GetGa4Data,
}

impl ToolName {
    pub const ALL: [ToolName; 5] = [
        ToolName::ListDimensionCategories,
        ToolName::ListMetricCategories,
        ToolName::GetDimensionsByCategory,
        ToolName::GetMetricsByCategory,
        ToolName::GetGa4Data,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolName::ListDimensionCategories => "list_dimension_categories",
            ToolName::ListMetricCategories => "list_metric_categories",
            ToolName::GetDimensionsByCategory => "get_dimensions_by_category",
            ToolName::GetMetricsByCategory => "get_metrics_by_category",
            ToolName::GetGa4Data => "get_ga4_data",
        }
    }

    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.as_str() == name)
    }

    pub fn descriptor(self) -> Tool {
        let (description, input_schema) = match self {
            ToolName::ListDimensionCategories => (
                "List all available GA4 dimension categories with descriptions",
                no_arguments_schema(),
            ),
            ToolName::ListMetricCategories => (
                "List all available GA4 metric categories with descriptions",
                no_arguments_schema(),
            ),
            ToolName::GetDimensionsByCategory => (
                "Get all dimensions in a specific category with their descriptions",
                category_schema(),
            ),
            ToolName::GetMetricsByCategory => (
                "Get all metrics in a specific category with their descriptions",
                category_schema(),
            ),
            ToolName::GetGa4Data => (
                "Retrieve GA4 metrics data broken down by the specified dimensions",
                json!({
                    "type": "object",
                    "properties": {
                        "dimensions": {
                            "type": "array",
                            "items": { "type": "string" },
                            "default": ["date"]
                        },
                        "metrics": {
                            "type": "array",
                            "items": { "type": "string" },
                            "default": ["totalUsers", "newUsers"]
                        },
                        "date_range_start": { "type": "string", "default": "7daysAgo" },
                        "date_range_end": { "type": "string", "default": "yesterday" }
                    },
                    "required": []
                }),
            ),
        };
        Tool {
            name: self.as_str().to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

fn no_arguments_schema() -> Value {
    json!({ "type": "object", "properties": {}, "required": [] })
}

fn category_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "category": { "type": "string", "description": "Category name" }
        },
        "required": ["category"]
    })
}

/// Shared state behind every transport: the static catalogs and the
/// report client injected at startup.
pub struct Ga4Server {
    ga4_data_tools: Ga4DataTools,
}

impl Ga4Server {
    pub fn new(config: Ga4Config, client: Arc<dyn ReportClient>) -> Self {
        let ga4_data_tools = Ga4DataTools::new(client, config.analytics.property_id);
        Self { ga4_data_tools }
    }

    pub fn get_tools(&self) -> Vec<Tool> {
        ToolName::ALL.into_iter().map(ToolName::descriptor).collect()
    }

    pub fn dimensions(&self) -> &'static Catalog {
        &GA4_DIMENSIONS
    }

    pub fn metrics(&self) -> &'static Catalog {
        &GA4_METRICS
    }

    pub fn ga4_data_tools(&self) -> &Ga4DataTools {
        &self.ga4_data_tools
    }
}
