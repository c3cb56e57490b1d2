use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::sync::Mutex;

use crate::error::{Ga4Error, Result};

pub const ANALYTICS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/analytics.readonly";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Ga4Error::credentials_error(format!(
                "Failed to read credentials file {}: {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            Ga4Error::credentials_error(format!("Invalid service account key: {}", e))
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Claims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(REFRESH_MARGIN_SECS) > now
    }
}

/// Exchanges signed service-account assertions for OAuth access tokens and
/// caches the current token until shortly before it expires.
pub struct TokenProvider {
    http: reqwest::Client,
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    cached: Mutex<Option<AccessToken>>,
}

impl TokenProvider {
    pub fn new(http: reqwest::Client, key: ServiceAccountKey) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| {
            Ga4Error::credentials_error(format!("Invalid service account private key: {}", e))
        })?;
        Ok(Self {
            http,
            key,
            encoding_key,
            cached: Mutex::new(None),
        })
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    pub async fn access_token(&self) -> Result<String> {
        let mut guard = self.cached.lock().await;
        if let Some(token) = guard.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.value.clone());
            }
        }

        let token = self.fetch_token().await?;
        let value = token.value.clone();
        *guard = Some(token);
        Ok(value)
    }

    pub(crate) fn assertion(&self, now: DateTime<Utc>) -> Result<String> {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();
        let iat = now.timestamp();
        let claims = Claims {
            iss: self.key.client_email.clone(),
            scope: ANALYTICS_READONLY_SCOPE.to_string(),
            aud: self.key.token_uri.clone(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };
        Ok(encode(&header, &claims, &self.encoding_key)?)
    }

    async fn fetch_token(&self) -> Result<AccessToken> {
        let now = Utc::now();
        let assertion = self.assertion(now)?;
        tracing::debug!("Requesting access token for {}", self.key.client_email);

        let response = self
            .http
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(Ga4Error::NetworkError)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Ga4Error::api_error(format!(
                "Token request failed ({}): {}",
                status,
                body.trim()
            )));
        }

        let token: TokenResponse = response.json().await.map_err(Ga4Error::NetworkError)?;
        Ok(AccessToken {
            value: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    const PRIVATE_KEY: &str = include_str!("../../tests/fixtures/test_key.pem");
    const PUBLIC_KEY: &str = include_str!("../../tests/fixtures/test_key.pub.pem");

    fn test_key() -> ServiceAccountKey {
        ServiceAccountKey {
            client_email: "reporter@example.iam.gserviceaccount.com".to_string(),
            private_key: PRIVATE_KEY.to_string(),
            token_uri: DEFAULT_TOKEN_URI.to_string(),
            private_key_id: Some("key-1".to_string()),
        }
    }

    #[test]
    fn token_uri_defaults_when_missing() {
        let key: ServiceAccountKey = serde_json::from_str(
            r#"{ "client_email": "a@b.c", "private_key": "pem" }"#,
        )
        .unwrap();
        assert_eq!(key.token_uri, DEFAULT_TOKEN_URI);
        assert!(key.private_key_id.is_none());
    }

    #[test]
    fn rejects_invalid_private_key() {
        let mut key = test_key();
        key.private_key = "not a pem".to_string();
        let err = TokenProvider::new(reqwest::Client::new(), key)
            .err()
            .expect("invalid key must be rejected");
        assert!(err.to_string().contains("Invalid service account private key"));
    }

    #[test]
    fn assertion_is_signed_with_expected_claims() {
        let provider = TokenProvider::new(reqwest::Client::new(), test_key()).unwrap();
        let now = Utc::now();
        let jwt = provider.assertion(now).unwrap();

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[DEFAULT_TOKEN_URI]);
        let decoded = decode::<Claims>(
            &jwt,
            &DecodingKey::from_rsa_pem(PUBLIC_KEY.as_bytes()).unwrap(),
            &validation,
        )
        .unwrap();

        assert_eq!(decoded.header.kid.as_deref(), Some("key-1"));
        assert_eq!(decoded.claims.iss, "reporter@example.iam.gserviceaccount.com");
        assert_eq!(decoded.claims.scope, ANALYTICS_READONLY_SCOPE);
        assert_eq!(decoded.claims.iat, now.timestamp());
        assert_eq!(decoded.claims.exp - decoded.claims.iat, ASSERTION_LIFETIME_SECS);
    }

    #[test]
    fn token_freshness_honours_margin() {
        let now = Utc::now();
        let fresh = AccessToken {
            value: "a".into(),
            expires_at: now + Duration::seconds(REFRESH_MARGIN_SECS + 5),
        };
        let stale = AccessToken {
            value: "b".into(),
            expires_at: now + Duration::seconds(REFRESH_MARGIN_SECS - 5),
        };
        assert!(fresh.is_fresh(now));
        assert!(!stale.is_fresh(now));
    }
}
