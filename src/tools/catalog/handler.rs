use serde_json::{json, Map, Value};

use super::data::Catalog;
use super::dto::{GetByCategoryInput, ListCategoriesInput};
use crate::tools::ToolOutput;

/// Summarizes every category as `{count, <item_label>: [names]}`.
pub fn list_categories(catalog: &Catalog, _input: ListCategoriesInput) -> ToolOutput {
    let mut summary = Map::new();
    for category in catalog.categories {
        let mut entry = Map::new();
        entry.insert("count".to_string(), json!(category.len()));
        entry.insert(
            catalog.item_label.to_string(),
            json!(category.item_names().collect::<Vec<_>>()),
        );
        summary.insert(category.name.to_string(), Value::Object(entry));
    }
    ToolOutput::Success(Value::Object(summary))
}

pub fn get_by_category(catalog: &Catalog, input: GetByCategoryInput) -> ToolOutput {
    match input.key().and_then(|key| catalog.get(key)) {
        Some(category) => {
            let items = category
                .items
                .iter()
                .map(|(name, description)| (name.to_string(), Value::from(*description)))
                .collect::<Map<_, _>>();
            ToolOutput::Success(Value::Object(items))
        }
        None => ToolOutput::domain_error(format!(
            "Category '{}' not found. Available categories: {}",
            input.display_name(),
            quoted_list(catalog.category_names())
        )),
    }
}

// Renders `['a', 'b']`
fn quoted_list<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let quoted = names
        .map(|name| format!("'{}'", name))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", quoted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::catalog::data::{GA4_DIMENSIONS, GA4_METRICS};

    fn lookup(catalog: &Catalog, category: &str) -> ToolOutput {
        get_by_category(
            catalog,
            GetByCategoryInput {
                category: Some(json!(category)),
            },
        )
    }

    #[test]
    fn summary_uses_catalog_item_label() {
        let ToolOutput::Success(dims) = list_categories(&GA4_DIMENSIONS, ListCategoriesInput {})
        else {
            panic!("expected success");
        };
        assert_eq!(
            dims["geography"],
            json!({ "count": 3, "dimensions": ["city", "country", "region"] })
        );

        let ToolOutput::Success(mets) = list_categories(&GA4_METRICS, ListCategoriesInput {})
        else {
            panic!("expected success");
        };
        assert_eq!(mets["event_metrics"]["metrics"], json!(["eventCount", "conversions"]));
    }

    #[test]
    fn summary_keeps_catalog_order() {
        let ToolOutput::Success(Value::Object(dims)) =
            list_categories(&GA4_DIMENSIONS, ListCategoriesInput {})
        else {
            panic!("expected object");
        };
        let keys: Vec<_> = dims.keys().map(String::as_str).collect();
        let expected: Vec<_> = GA4_DIMENSIONS.category_names().collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn known_category_returns_descriptions() {
        let output = lookup(&GA4_DIMENSIONS, "geography");
        assert_eq!(
            output,
            ToolOutput::Success(json!({
                "city": "The city of the user.",
                "country": "The country of the user.",
                "region": "The region of the user."
            }))
        );
    }

    #[test]
    fn unknown_category_is_a_domain_error() {
        let output = lookup(&GA4_METRICS, "bogus");
        assert_eq!(
            output,
            ToolOutput::domain_error(
                "Category 'bogus' not found. Available categories: \
                 ['user_metrics', 'session_metrics', 'pageview_metrics', 'event_metrics', 'ecommerce_metrics']"
            )
        );
    }

    #[test]
    fn missing_category_is_a_domain_error() {
        let output = get_by_category(&GA4_DIMENSIONS, GetByCategoryInput::default());
        let ToolOutput::DomainError(message) = output else {
            panic!("expected domain error");
        };
        assert!(message.starts_with("Category 'None' not found. Available categories: ['time', "));
    }

    #[test]
    fn quoted_list_handles_empty_input() {
        assert_eq!(quoted_list(std::iter::empty()), "[]");
    }
}
