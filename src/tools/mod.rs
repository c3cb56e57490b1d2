pub mod catalog;
pub mod ga4_data;

use serde_json::{json, Value};

pub use catalog::{
    get_by_category, list_categories, Catalog, Category, GetByCategoryInput,
    ListCategoriesInput, GA4_DIMENSIONS, GA4_METRICS,
};
pub use ga4_data::{get_ga4_data, Ga4DataTools, Ga4Record, GetGa4DataInput};

/// What a tool hands back to the dispatcher when it ran to completion.
///
/// A `DomainError` is still a successful call: the request was well formed
/// but could not be satisfied, and the caller sees `{"error": "..."}` as the
/// tool's result. Failures that should become protocol errors travel as
/// `Err(Ga4Error)` instead.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    Success(Value),
    DomainError(String),
}

impl ToolOutput {
    pub fn domain_error(msg: impl Into<String>) -> Self {
        ToolOutput::DomainError(msg.into())
    }

    pub fn into_value(self) -> Value {
        match self {
            ToolOutput::Success(value) => value,
            ToolOutput::DomainError(message) => json!({ "error": message }),
        }
    }
}
