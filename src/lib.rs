pub mod analytics;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http;
pub mod mcp;
pub mod server;
pub mod stdio;
pub mod tools;

pub use analytics::{Ga4Client, ReportClient};
pub use config::Ga4Config;
pub use error::{Ga4Error, Result};
pub use server::{Ga4Server, Tool, ToolName};
