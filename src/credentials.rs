//! Locates the service-account key the GA4 client signs its token requests with.
//!
//! Two environment variables are consulted, in order:
//! `GOOGLE_APPLICATION_CREDENTIALS` (a file path, or a base64 blob when the
//! value neither starts with `/` nor ends with `.json`) and
//! `GOOGLE_CREDENTIALS_JSON` (always a base64 blob). Decoded blobs are written
//! to a temporary `.json` file that lives as long as the returned value.

use base64::{engine::general_purpose::STANDARD, Engine};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::{Ga4Error, Result};

pub const APPLICATION_CREDENTIALS_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";
pub const CREDENTIALS_JSON_VAR: &str = "GOOGLE_CREDENTIALS_JSON";

#[derive(Debug)]
pub struct ResolvedCredentials {
    path: PathBuf,
    // Removed from disk on drop
    temp_file: Option<NamedTempFile>,
}

impl ResolvedCredentials {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_temporary(&self) -> bool {
        self.temp_file.is_some()
    }
}

pub fn resolve_from_env() -> Result<ResolvedCredentials> {
    let application = std::env::var(APPLICATION_CREDENTIALS_VAR).ok();
    let json = std::env::var(CREDENTIALS_JSON_VAR).ok();
    resolve(application.as_deref(), json.as_deref())
}

pub fn resolve(application: Option<&str>, json: Option<&str>) -> Result<ResolvedCredentials> {
    if let Some(value) = application {
        if looks_like_path(value) {
            let path = PathBuf::from(value);
            if !path.exists() {
                return Err(Ga4Error::credentials_error(format!(
                    "Credentials file not found: {}",
                    value
                )));
            }
            tracing::info!("Using existing credentials file: {}", value);
            return Ok(ResolvedCredentials {
                path,
                temp_file: None,
            });
        }
        tracing::info!("Decoding base64 credentials from {}", APPLICATION_CREDENTIALS_VAR);
        return decode_to_temp_file(value);
    }

    if let Some(value) = json {
        tracing::info!("Decoding base64 credentials from {}", CREDENTIALS_JSON_VAR);
        return decode_to_temp_file(value);
    }

    Err(Ga4Error::credentials_error(format!(
        "No Google credentials found. Set {} or {}",
        APPLICATION_CREDENTIALS_VAR, CREDENTIALS_JSON_VAR
    )))
}

fn looks_like_path(value: &str) -> bool {
    value.starts_with('/') || value.ends_with(".json")
}

fn decode_to_temp_file(encoded: &str) -> Result<ResolvedCredentials> {
    let bytes = STANDARD.decode(encoded.trim()).map_err(|e| {
        Ga4Error::credentials_error(format!("Failed to decode base64 credentials: {}", e))
    })?;
    let text = String::from_utf8(bytes).map_err(|e| {
        Ga4Error::credentials_error(format!("Decoded credentials are not UTF-8: {}", e))
    })?;

    let mut file = tempfile::Builder::new()
        .prefix("ga4-credentials-")
        .suffix(".json")
        .tempfile()?;
    file.write_all(text.as_bytes())?;
    file.flush()?;

    let path = file.path().to_path_buf();
    tracing::info!("Loaded base64 credentials to {}", path.display());
    Ok(ResolvedCredentials {
        path,
        temp_file: Some(file),
    })
}
