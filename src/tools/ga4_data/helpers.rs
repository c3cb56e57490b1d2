use serde_json::Value;

use super::dto::Ga4Record;
use crate::analytics::RunReportResponse;
use crate::error::{Ga4Error, Result};

/// Coerces a `dimensions`/`metrics` argument into an ordered list of names.
///
/// Tried in order: a JSON array of strings is used as is; a string holding a
/// JSON array of strings is decoded; any other string is split on commas with
/// each token trimmed (empty tokens are dropped). `null` yields an empty list.
pub fn normalize_name_list(raw: &Value) -> Result<Vec<String>> {
    match raw {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => string_items(items),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(items)) => string_items(&items),
            Ok(Value::String(inner)) => Ok(split_delimited(&inner)),
            _ => Ok(split_delimited(text)),
        },
        other => Err(Ga4Error::invalid_arguments(format!(
            "expected a list of names or a comma-separated string, got {}",
            other
        ))),
    }
}

fn string_items(items: &[Value]) -> Result<Vec<String>> {
    items
        .iter()
        .map(|item| match item {
            Value::String(name) => Ok(name.clone()),
            other => Err(Ga4Error::invalid_arguments(format!(
                "expected only string names, got {}",
                other
            ))),
        })
        .collect()
}

fn split_delimited(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Flattens report rows into records, pairing headers with values by position.
/// Extra headers or extra values on either side are ignored.
pub(crate) fn flatten_rows(response: &RunReportResponse) -> Vec<Ga4Record> {
    response
        .rows
        .iter()
        .map(|row| {
            let mut record = Ga4Record::new();
            for (header, cell) in response
                .dimension_headers
                .iter()
                .zip(&row.dimension_values)
            {
                record.insert(header.name.clone(), Value::String(cell.value.clone()));
            }
            for (header, cell) in response.metric_headers.iter().zip(&row.metric_values) {
                record.insert(header.name.clone(), Value::String(cell.value.clone()));
            }
            record
        })
        .collect()
}
