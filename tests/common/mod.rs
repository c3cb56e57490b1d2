#![allow(dead_code)]

use async_trait::async_trait;
use ga4_mcp::analytics::{ReportClient, RunReportRequest, RunReportResponse};
use ga4_mcp::{Ga4Config, Ga4Error, Ga4Server};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const PROPERTY_ID: &str = "123456789";

/// Canned report client that records every request it receives.
pub struct MockReportClient {
    response: Result<RunReportResponse, String>,
    calls: AtomicUsize,
    requests: Mutex<Vec<RunReportRequest>>,
}

impl MockReportClient {
    pub fn returning(response: RunReportResponse) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(response),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Behaves like an unreachable or rejecting backend.
    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<RunReportRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ReportClient for MockReportClient {
    async fn run_report(&self, request: &RunReportRequest) -> ga4_mcp::Result<RunReportResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        match &self.response {
            Ok(response) => Ok(response.clone()),
            Err(message) => Err(Ga4Error::api_error(message.clone())),
        }
    }
}

pub fn test_server(client: Arc<MockReportClient>) -> Ga4Server {
    Ga4Server::new(Ga4Config::for_property(PROPERTY_ID), client)
}

/// Server whose backend fails every call.
pub fn offline_server() -> (Ga4Server, Arc<MockReportClient>) {
    let client = MockReportClient::failing("service unavailable");
    (test_server(client.clone()), client)
}
