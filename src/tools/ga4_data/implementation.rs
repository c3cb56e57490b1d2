use serde_json::Value;
use std::sync::Arc;

use super::dto::{Ga4Record, GetGa4DataInput};
use super::helpers::{flatten_rows, normalize_name_list};
use crate::analytics::{ReportClient, RunReportRequest};
use crate::error::Result;
use crate::tools::ToolOutput;

#[derive(Clone)]
pub struct Ga4DataTools {
    client: Arc<dyn ReportClient>,
    property_id: String,
}

impl Ga4DataTools {
    pub fn new(client: Arc<dyn ReportClient>, property_id: impl Into<String>) -> Self {
        Self {
            client,
            property_id: property_id.into(),
        }
    }

    /// Every failure here is reported as a domain error in the tool result.
    pub async fn get_ga4_data(&self, input: GetGa4DataInput) -> ToolOutput {
        let dimensions = match normalize_name_list(&input.dimensions) {
            Ok(names) => names,
            Err(e) => return ToolOutput::domain_error(format!("Invalid dimensions: {}", e)),
        };
        let metrics = match normalize_name_list(&input.metrics) {
            Ok(names) => names,
            Err(e) => return ToolOutput::domain_error(format!("Invalid metrics: {}", e)),
        };

        if dimensions.is_empty() || metrics.is_empty() {
            return ToolOutput::domain_error("Both dimensions and metrics are required");
        }

        if let Some(filter) = &input.dimension_filter {
            tracing::debug!("Ignoring dimension_filter: {}", filter);
        }

        match self
            .run_query(&dimensions, &metrics, &input.start_date(), &input.end_date())
            .await
        {
            Ok(records) => ToolOutput::Success(Value::Array(
                records.into_iter().map(Value::Object).collect(),
            )),
            Err(e) => {
                let message = format!("Error fetching GA4 data: {}", e);
                tracing::error!("{}", message);
                ToolOutput::DomainError(message)
            }
        }
    }

    pub async fn run_query(
        &self,
        dimensions: &[String],
        metrics: &[String],
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<Ga4Record>> {
        let request = RunReportRequest::new(
            &self.property_id,
            dimensions,
            metrics,
            start_date,
            end_date,
        );
        let response = self.client.run_report(&request).await?;
        let records = flatten_rows(&response);
        tracing::info!(
            "GA4 report for {} returned {} rows",
            request.property,
            records.len()
        );
        Ok(records)
    }
}
