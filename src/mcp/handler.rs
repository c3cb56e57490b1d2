use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::Ga4Error;
use crate::server::{Ga4Server, ToolName};
use crate::tools::{get_by_category, get_ga4_data, list_categories, ToolOutput};

use super::dto::{McpError, McpRequest, McpResponse, ToolCall, UNRECOVERABLE_ID};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "Google Analytics 4";
pub const SERVER_VERSION: &str = "1.0.0";

/// Handles one raw request body and always produces a response.
pub async fn handle_body(server: &Ga4Server, body: &[u8]) -> McpResponse {
    match parse_request(body) {
        Ok(request) => handle_request(server, request).await,
        Err(response) => response,
    }
}

/// Like [`handle_body`], but stays silent for JSON-RPC notifications.
pub async fn handle_message(server: &Ga4Server, body: &[u8]) -> Option<McpResponse> {
    match parse_request(body) {
        Ok(request) if request.is_notification() => {
            tracing::debug!(
                "Ignoring notification {}",
                request.method.as_deref().unwrap_or_default()
            );
            None
        }
        Ok(request) => Some(handle_request(server, request).await),
        Err(response) => Some(response),
    }
}

fn parse_request(body: &[u8]) -> Result<McpRequest, McpResponse> {
    serde_json::from_slice::<Value>(body)
        .map_err(|e| e.to_string())
        .and_then(McpRequest::from_value)
        .map_err(|detail| {
            tracing::error!("JSON decode error: {}", detail);
            McpResponse::failure(json!(UNRECOVERABLE_ID), McpError::parse_error(detail))
        })
}

pub async fn handle_request(server: &Ga4Server, request: McpRequest) -> McpResponse {
    let id = request.response_id();
    let method = request.method.as_deref();
    tracing::info!("MCP Request: {} with ID: {}", method.unwrap_or("null"), id);

    let outcome = match method {
        Some("initialize") => Ok(initialize_result()),
        Some("tools/list") => list_tools(server),
        Some("tools/call") => call_tool(server, ToolCall::from_params(&request.params)).await,
        other => {
            tracing::warn!("Unknown method: {}", other.unwrap_or("null"));
            Err(McpError::unknown_method(other))
        }
    };

    McpResponse::from_outcome(id, outcome)
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": true },
            "resources": { "subscribe": false, "listChanged": true }
        },
        "serverInfo": { "name": SERVER_NAME, "version": SERVER_VERSION }
    })
}

fn list_tools(server: &Ga4Server) -> Result<Value, McpError> {
    let tools = serde_json::to_value(server.get_tools()).map_err(McpError::internal)?;
    Ok(json!({ "tools": tools }))
}

async fn call_tool(server: &Ga4Server, tool_call: ToolCall) -> Result<Value, McpError> {
    let tool = tool_call
        .name
        .as_deref()
        .and_then(ToolName::lookup)
        .ok_or_else(|| McpError::unknown_tool(tool_call.name.as_deref()))?;

    let output = handle_tool_call(server, tool, tool_call.arguments)
        .await
        .map_err(|e| {
            tracing::error!("Tool execution error: {}", e);
            McpError::tool_execution(e)
        })?;

    if let ToolOutput::DomainError(message) = &output {
        tracing::warn!("{} returned an error result: {}", tool.as_str(), message);
    }

    let text = serde_json::to_string_pretty(&output.into_value()).map_err(McpError::internal)?;
    Ok(json!({
        "content": [
            { "type": "text", "text": text }
        ]
    }))
}

pub(crate) async fn handle_tool_call(
    server: &Ga4Server,
    tool: ToolName,
    arguments: Value,
) -> Result<ToolOutput, Ga4Error> {
    tracing::info!("Handling tool call: {}", tool.as_str());
    match tool {
        ToolName::ListDimensionCategories => {
            Ok(list_categories(server.dimensions(), parse_arguments(arguments)?))
        }
        ToolName::ListMetricCategories => {
            Ok(list_categories(server.metrics(), parse_arguments(arguments)?))
        }
        ToolName::GetDimensionsByCategory => {
            Ok(get_by_category(server.dimensions(), parse_arguments(arguments)?))
        }
        ToolName::GetMetricsByCategory => {
            Ok(get_by_category(server.metrics(), parse_arguments(arguments)?))
        }
        ToolName::GetGa4Data => {
            get_ga4_data(server.ga4_data_tools(), parse_arguments(arguments)?).await
        }
    }
}

fn parse_arguments<T: DeserializeOwned>(arguments: Value) -> Result<T, Ga4Error> {
    serde_json::from_value(arguments).map_err(|e| Ga4Error::invalid_arguments(e.to_string()))
}
