use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const DEFAULT_DATE_RANGE_START: &str = "7daysAgo";
pub const DEFAULT_DATE_RANGE_END: &str = "yesterday";

/// One report row flattened to `{dimension or metric name: value}`.
pub type Ga4Record = serde_json::Map<String, Value>;

/// Raw `get_ga4_data` arguments.
///
/// `dimensions` and `metrics` stay untyped here: callers send arrays, JSON
/// strings or comma-separated strings, and `normalize_name_list` sorts that out.
/// Date bounds are untyped too; a non-string bound is sent as its JSON text
/// and left for the Data API to accept or reject.
#[derive(Debug, Serialize, Deserialize)]
pub struct GetGa4DataInput {
    #[serde(default = "default_dimensions")]
    pub dimensions: Value,
    #[serde(default = "default_metrics")]
    pub metrics: Value,
    #[serde(default)]
    pub date_range_start: Option<Value>,
    #[serde(default)]
    pub date_range_end: Option<Value>,
    /// Accepted for compatibility; not applied to the query.
    #[serde(default)]
    pub dimension_filter: Option<Value>,
}

impl Default for GetGa4DataInput {
    fn default() -> Self {
        Self {
            dimensions: default_dimensions(),
            metrics: default_metrics(),
            date_range_start: None,
            date_range_end: None,
            dimension_filter: None,
        }
    }
}

impl GetGa4DataInput {
    pub fn start_date(&self) -> String {
        date_bound(self.date_range_start.as_ref(), DEFAULT_DATE_RANGE_START)
    }

    pub fn end_date(&self) -> String {
        date_bound(self.date_range_end.as_ref(), DEFAULT_DATE_RANGE_END)
    }
}

fn date_bound(value: Option<&Value>, default: &str) -> String {
    match value {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(date)) => date.clone(),
        Some(other) => other.to_string(),
    }
}

fn default_dimensions() -> Value {
    json!(["date"])
}

fn default_metrics() -> Value {
    json!(["totalUsers", "newUsers"])
}
