//! Vendor authentication and bearer-token caching

use std::fmt;
use std::time::{Duration, Instant};

use agentlink_http::{HttpRequest, Method, RequestBody, StatusCode, TRACE_ID_HEADER};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::client::{decode, AgentLinkClient};
use crate::error::{ClientError, Result};

/// How long before the declared expiry a token stops being reused
pub const TOKEN_EXPIRY_BUFFER: Duration = Duration::from_secs(60);

/// Upper bound on a server-declared `expiresIn`
const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(365 * 24 * 60 * 60);

pub(crate) const AUTH_PATH: &str = "/auth/vendor";

/// Vendor API credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthRequest<'a> {
    client_id: &'a str,
    secret: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

impl CachedToken {
    fn new(value: String, expires_in: i64, now: Instant) -> Self {
        let lifetime = Duration::from_secs(expires_in.max(0) as u64)
            .min(MAX_TOKEN_LIFETIME)
            .saturating_sub(TOKEN_EXPIRY_BUFFER);
        Self {
            value,
            expires_at: now.checked_add(lifetime).unwrap_or(now),
        }
    }

    fn is_usable(&self, now: Instant) -> bool {
        !self.value.is_empty() && now < self.expires_at
    }
}

/// Single cached bearer token guarded by a read/write lock
#[derive(Debug, Default)]
pub(crate) struct TokenCache {
    inner: RwLock<Option<CachedToken>>,
}

impl TokenCache {
    async fn usable(&self) -> Option<String> {
        let guard = self.inner.read().await;
        guard
            .as_ref()
            .filter(|token| token.is_usable(Instant::now()))
            .map(|token| token.value.clone())
    }

    async fn store(&self, value: String, expires_in: i64) {
        *self.inner.write().await = Some(CachedToken::new(value, expires_in, Instant::now()));
    }
}

impl AgentLinkClient {
    /// Exchange the vendor credentials for a fresh bearer token
    ///
    /// Always hits the network, replacing any cached token on success.
    pub async fn authenticate(&self) -> Result<()> {
        self.fetch_token().await.map(|_| ())
    }

    /// Return a usable bearer token, re-authenticating if it is absent or expired
    ///
    /// Concurrent callers that all observe an expired token each
    /// re-authenticate; the last response written wins.
    pub async fn access_token(&self) -> Result<String> {
        if let Some(token) = self.token.usable().await {
            return Ok(token);
        }
        self.fetch_token().await
    }

    /// Whether a cached token is present and not yet expired
    pub async fn has_valid_token(&self) -> bool {
        self.token.usable().await.is_some()
    }

    async fn fetch_token(&self) -> Result<String> {
        let url = self.url(AUTH_PATH);
        info!(url = %url, client_id = %self.credentials.client_id, "Authenticating with Frontegg API");

        let body = RequestBody::json(&AuthRequest {
            client_id: &self.credentials.client_id,
            secret: &self.credentials.secret,
        })?;
        let response = self
            .http
            .send(HttpRequest::new(Method::POST, url).body(body))
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to execute authentication request");
                e
            })?;

        if response.status != StatusCode::OK {
            let body = response.text();
            error!(
                status_code = response.status.as_u16(),
                response = %body,
                frontegg_trace_id = response.header(TRACE_ID_HEADER).unwrap_or_default(),
                "Authentication failed"
            );
            return Err(ClientError::Authentication {
                status: response.status.as_u16(),
                body,
            });
        }

        let auth: AuthResponse = decode(&response, "auth")?;
        self.token.store(auth.token.clone(), auth.expires_in).await;

        info!(
            token_expires_in_seconds = auth.expires_in,
            "Successfully authenticated with Frontegg API"
        );
        Ok(auth.token)
    }
}
