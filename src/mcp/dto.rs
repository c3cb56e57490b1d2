use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub const JSONRPC_VERSION: &str = "2.0";

/// Substituted when the request carries no `id`.
pub const MISSING_ID: &str = "unknown";
/// Substituted when the body could not be read as an envelope at all.
pub const UNRECOVERABLE_ID: &str = "error";

pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const SERVER_ERROR: i32 = -32000;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpRequest {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default = "empty_object")]
    pub params: Value,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

impl McpRequest {
    pub fn new(method: impl Into<String>, params: Value, id: Value) -> Self {
        Self {
            jsonrpc: Some(JSONRPC_VERSION.to_string()),
            id: Some(id),
            method: Some(method.into()),
            params,
        }
    }

    /// Reads an envelope out of any JSON object. Fields of the wrong type
    /// are treated as absent; only a non-object body is rejected.
    pub fn from_value(value: Value) -> Result<Self, String> {
        let mut fields = match value {
            Value::Object(fields) => fields,
            other => return Err(format!("expected a JSON object, got {}", kind_of(&other))),
        };
        let jsonrpc = match fields.remove("jsonrpc") {
            Some(Value::String(version)) => Some(version),
            _ => None,
        };
        let method = match fields.remove("method") {
            Some(Value::String(method)) => Some(method),
            _ => None,
        };
        let params = match fields.remove("params") {
            Some(params @ Value::Object(_)) => params,
            _ => empty_object(),
        };
        Ok(Self {
            jsonrpc,
            id: fields.remove("id"),
            method,
            params,
        })
    }

    /// JSON-RPC notifications carry no id and expect no reply.
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
            && self
                .method
                .as_deref()
                .is_some_and(|method| method.starts_with("notifications/"))
    }

    pub fn response_id(&self) -> Value {
        self.id.clone().unwrap_or_else(|| json!(MISSING_ID))
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "empty_object")]
    pub arguments: Value,
}

impl ToolCall {
    pub fn from_params(params: &Value) -> Self {
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string);
        let arguments = match params.get("arguments") {
            None | Some(Value::Null) => empty_object(),
            Some(arguments) => arguments.clone(),
        };
        Self { name, arguments }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
    pub id: Value,
}

impl McpResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn failure(id: Value, error: McpError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }

    pub fn from_outcome(id: Value, outcome: Result<Value, McpError>) -> Self {
        match outcome {
            Ok(result) => Self::success(id, result),
            Err(error) => Self::failure(id, error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
}

impl McpError {
    pub fn parse_error(detail: impl std::fmt::Display) -> Self {
        Self {
            code: error_codes::PARSE_ERROR,
            message: format!("Parse error: {}", detail),
        }
    }

    pub fn unknown_method(method: Option<&str>) -> Self {
        Self {
            code: error_codes::METHOD_NOT_FOUND,
            message: format!("Unknown method: {}", method.unwrap_or("null")),
        }
    }

    pub fn unknown_tool(name: Option<&str>) -> Self {
        Self {
            code: error_codes::METHOD_NOT_FOUND,
            message: format!("Unknown tool: {}", name.unwrap_or("null")),
        }
    }

    pub fn tool_execution(detail: impl std::fmt::Display) -> Self {
        Self {
            code: error_codes::SERVER_ERROR,
            message: format!("Tool execution error: {}", detail),
        }
    }

    pub fn internal(detail: impl std::fmt::Display) -> Self {
        Self {
            code: error_codes::SERVER_ERROR,
            message: format!("Internal error: {}", detail),
        }
    }
}
