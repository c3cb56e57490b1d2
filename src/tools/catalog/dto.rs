use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct ListCategoriesInput {}

/// `category` stays untyped: a missing, null or non-string value is simply
/// a category the catalog does not have.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct GetByCategoryInput {
    #[serde(default)]
    pub category: Option<Value>,
}

impl GetByCategoryInput {
    pub fn key(&self) -> Option<&str> {
        self.category.as_ref().and_then(Value::as_str)
    }

    /// How the requested category is echoed back in the not-found message.
    pub fn display_name(&self) -> String {
        match &self.category {
            None | Some(Value::Null) => "None".to_string(),
            Some(Value::String(name)) => name.clone(),
            Some(other) => other.to_string(),
        }
    }
}
