use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

use super::dto::{ApiErrorEnvelope, RunReportRequest, RunReportResponse};
use super::token::{ServiceAccountKey, TokenProvider};
use crate::config::AnalyticsConfig;
use crate::error::{Ga4Error, Result};

/// Submits report queries to the analytics backend.
///
/// `Ga4Client` talks to the GA4 Data API; tests plug in canned implementations.
#[async_trait]
pub trait ReportClient: Send + Sync {
    async fn run_report(&self, request: &RunReportRequest) -> Result<RunReportResponse>;
}

pub struct Ga4Client {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenProvider,
}

impl Ga4Client {
    pub fn new(config: &AnalyticsConfig, key: ServiceAccountKey) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent("GA4-MCP/1.0.0")
            .build()
            .map_err(Ga4Error::NetworkError)?;
        let tokens = TokenProvider::new(http.clone(), key)?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    /// Loads the key, then performs one token exchange so credential problems
    /// surface before any request is served.
    pub async fn connect(config: &AnalyticsConfig, credentials_path: &Path) -> Result<Self> {
        let key = ServiceAccountKey::from_file(credentials_path)?;
        let client = Self::new(config, key)?;
        client.tokens.access_token().await?;
        tracing::info!(
            "Authorized GA4 client as {}",
            client.tokens.client_email()
        );
        Ok(client)
    }

    fn report_url(&self, property: &str) -> String {
        let encoded = property
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!("{}/v1beta/{}:runReport", self.base_url, encoded)
    }
}

#[async_trait]
impl ReportClient for Ga4Client {
    async fn run_report(&self, request: &RunReportRequest) -> Result<RunReportResponse> {
        let token = self.tokens.access_token().await?;
        let url = self.report_url(&request.property);
        tracing::debug!(
            "runReport {} ({} dimensions, {} metrics)",
            request.property,
            request.dimensions.len(),
            request.metrics.len()
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(request)
            .send()
            .await
            .map_err(Ga4Error::NetworkError)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Ga4Error::api_error(describe_api_error(status, &body)));
        }

        response
            .json::<RunReportResponse>()
            .await
            .map_err(Ga4Error::NetworkError)
    }
}

fn describe_api_error(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => {
            let code = envelope.error.code.unwrap_or(status.as_u16());
            match envelope.error.status {
                Some(kind) => format!("{} {}: {}", code, kind, envelope.error.message),
                None => format!("{}: {}", code, envelope.error.message),
            }
        }
        Err(_) => format!("{}: {}", status, body.trim()),
    }
}
