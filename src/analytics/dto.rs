use serde::{Deserialize, Serialize};

/// Body of `POST /v1beta/{property}:runReport`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportRequest {
    /// `properties/<id>`; travels in the URL path, not the body.
    #[serde(skip)]
    pub property: String,
    pub dimensions: Vec<Dimension>,
    pub metrics: Vec<Metric>,
    pub date_ranges: Vec<DateRange>,
}

impl RunReportRequest {
    pub fn new(
        property_id: &str,
        dimensions: &[String],
        metrics: &[String],
        start_date: &str,
        end_date: &str,
    ) -> Self {
        Self {
            property: format!("properties/{}", property_id),
            dimensions: dimensions
                .iter()
                .map(|name| Dimension { name: name.clone() })
                .collect(),
            metrics: metrics
                .iter()
                .map(|name| Metric { name: name.clone() })
                .collect(),
            date_ranges: vec![DateRange {
                start_date: start_date.to_string(),
                end_date: end_date.to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportResponse {
    #[serde(default)]
    pub dimension_headers: Vec<Header>,
    #[serde(default)]
    pub metric_headers: Vec<Header>,
    // Omitted entirely by the API when the report is empty
    #[serde(default)]
    pub rows: Vec<Row>,
    #[serde(default)]
    pub row_count: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
}

impl Header {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    #[serde(default)]
    pub dimension_values: Vec<CellValue>,
    #[serde(default)]
    pub metric_values: Vec<CellValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CellValue {
    #[serde(default)]
    pub value: String,
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }
}

/// Error body returned by Google APIs on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}
