use crate::error::{Ga4Error, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "https://analyticsdata.googleapis.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ga4Config {
    pub server: ServerConfig,
    pub analytics: AnalyticsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub transport: String, // "stdio", "http"
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Numeric GA4 property id, without the `properties/` prefix.
    pub property_id: String,
    pub api_base_url: String,
    pub connect_timeout_secs: u64,
}

impl Default for Ga4Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                log_level: "info".to_string(),
                transport: "http".to_string(),
            },
            analytics: AnalyticsConfig {
                property_id: String::new(),
                api_base_url: DEFAULT_API_BASE_URL.to_string(),
                connect_timeout_secs: 10,
            },
        }
    }
}

impl Ga4Config {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Ga4Error::config_error(format!("Failed to read config file: {}", e)))?;

        let mut config: Ga4Config = toml::from_str(&content)
            .map_err(|e| Ga4Error::config_error(format!("Failed to parse config file: {}", e)))?;

        // Environment still wins over the file
        config.apply_env()?;
        Ok(config)
    }

    /// Property id used in tests and examples that never reach the real API.
    pub fn for_property(property_id: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.analytics.property_id = property_id.into();
        config
    }

    /// Fails when a value required to serve requests is missing.
    pub fn validate(&self) -> Result<()> {
        if self.analytics.property_id.trim().is_empty() {
            return Err(Ga4Error::config_error(
                "GA4_PROPERTY_ID environment variable not set (e.g. 123456789)",
            ));
        }
        match self.server.transport.to_lowercase().as_str() {
            "stdio" | "http" => Ok(()),
            other => Err(Ga4Error::config_error(format!(
                "Unsupported transport: {}",
                other
            ))),
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(port) = std::env::var("GA4_MCP_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| Ga4Error::config_error("Invalid GA4_MCP_PORT"))?;
        }

        if let Ok(host) = std::env::var("GA4_MCP_HOST") {
            if !host.trim().is_empty() {
                self.server.host = host;
            }
        }

        if let Ok(log_level) = std::env::var("GA4_MCP_LOG_LEVEL") {
            self.server.log_level = log_level;
        }

        if let Ok(transport) = std::env::var("GA4_MCP_TRANSPORT") {
            self.server.transport = transport;
        }

        if let Ok(property_id) = std::env::var("GA4_PROPERTY_ID") {
            self.analytics.property_id = property_id.trim().to_string();
        }

        if let Ok(base_url) = std::env::var("GA4_API_BASE_URL") {
            if !base_url.trim().is_empty() {
                self.analytics.api_base_url = base_url;
            }
        }

        Ok(())
    }
}
