use thiserror::Error;

pub type Result<T> = std::result::Result<T, Ga4Error>;

#[derive(Error, Debug)]
pub enum Ga4Error {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Credentials error: {0}")]
    CredentialsError(String),

    #[error("Token signing error: {0}")]
    TokenError(#[from] jsonwebtoken::errors::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

impl Ga4Error {
    pub fn api_error(msg: impl Into<String>) -> Self {
        Ga4Error::ApiError(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Ga4Error::ConfigError(msg.into())
    }

    pub fn credentials_error(msg: impl Into<String>) -> Self {
        Ga4Error::CredentialsError(msg.into())
    }

    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Ga4Error::InvalidArguments(msg.into())
    }
}
