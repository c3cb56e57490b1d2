pub mod dto;
pub mod handler;

pub use dto::{error_codes, McpError, McpRequest, McpResponse, ToolCall};
pub use handler::{handle_body, handle_message, handle_request};
