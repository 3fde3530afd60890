//! Authenticated client core shared by every endpoint module

use std::sync::Arc;

use agentlink_http::{
    shared_client, HttpClientTrait, HttpConfig, HttpRequest, HttpResponse, Method, RequestBody,
    StatusCode, TRACE_ID_HEADER,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::error;

use crate::auth::{Credentials, TokenCache};
use crate::error::{ClientError, Result};

/// Frontegg AgentLink API client
///
/// Cheap to share behind an `Arc`; the only mutable state is the cached
/// bearer token.
pub struct AgentLinkClient {
    base_url: String,
    pub(crate) credentials: Credentials,
    pub(crate) http: Arc<dyn HttpClientTrait>,
    pub(crate) token: TokenCache,
}

impl AgentLinkClient {
    /// Create a client with the default HTTP configuration (30 s timeout)
    pub fn new(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<Self> {
        Self::with_config(
            base_url,
            Credentials::new(client_id, secret),
            HttpConfig::default(),
        )
    }

    /// Create a client with a custom HTTP configuration
    pub fn with_config(
        base_url: impl Into<String>,
        credentials: Credentials,
        config: HttpConfig,
    ) -> Result<Self> {
        Ok(Self::with_http_client(
            base_url,
            credentials,
            shared_client(config)?,
        ))
    }

    /// Create a client over an existing transport
    pub fn with_http_client(
        base_url: impl Into<String>,
        credentials: Credentials,
        http: Arc<dyn HttpClientTrait>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            credentials,
            http,
            token: TokenCache::default(),
        }
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Client id used for vendor authentication
    pub fn client_id(&self) -> &str {
        &self.credentials.client_id
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send an authenticated request
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: RequestBody,
    ) -> Result<HttpResponse> {
        let token = self.access_token().await?;

        let mut request = HttpRequest::new(method, self.url(path))
            .bearer(token)
            .body(body);
        for (name, value) in query {
            request = request.query(*name, *value);
        }

        Ok(self.http.send(request).await?)
    }

    /// Send an authenticated request with a JSON body
    pub(crate) async fn send_json<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: &T,
    ) -> Result<HttpResponse> {
        self.send(method, path, query, RequestBody::json(body)?)
            .await
    }
}

/// Fail with [`ClientError::Api`] unless the status is one of `accepted`
pub(crate) fn expect_status(
    response: HttpResponse,
    accepted: &[StatusCode],
    operation: &'static str,
) -> Result<HttpResponse> {
    if response.is_status(accepted) {
        return Ok(response);
    }

    let body = response.text();
    error!(
        operation,
        status_code = response.status.as_u16(),
        response = %body,
        frontegg_trace_id = response.header(TRACE_ID_HEADER).unwrap_or_default(),
        "Frontegg API request failed"
    );
    Err(ClientError::Api {
        operation,
        status: response.status.as_u16(),
        body,
    })
}

pub(crate) fn decode<T: DeserializeOwned>(response: &HttpResponse, what: &'static str) -> Result<T> {
    response
        .json()
        .map_err(|source| ClientError::Decode { what, source })
}

pub(crate) const OK: &[StatusCode] = &[StatusCode::OK];
pub(crate) const OK_OR_CREATED: &[StatusCode] = &[StatusCode::OK, StatusCode::CREATED];
pub(crate) const OK_OR_NO_CONTENT: &[StatusCode] = &[StatusCode::OK, StatusCode::NO_CONTENT];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = AgentLinkClient::new("https://api.frontegg.com/", "id", "secret").unwrap();
        assert_eq!(client.base_url(), "https://api.frontegg.com");
        assert_eq!(client.url("/vendors"), "https://api.frontegg.com/vendors");
        assert_eq!(client.client_id(), "id");
    }

    #[test]
    fn test_expect_status_passes_accepted() {
        let response = HttpResponse::new(StatusCode::NO_CONTENT, Vec::new());
        assert!(expect_status(response, OK_OR_NO_CONTENT, "delete tool").is_ok());
    }

    #[test]
    fn test_expect_status_rejects_other_codes() {
        let response = HttpResponse::new(StatusCode::CONFLICT, "duplicate name");
        let err = expect_status(response, OK_OR_CREATED, "create application").unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to create application with status 409: duplicate name"
        );
    }

    #[test]
    fn test_decode_reports_shape_errors() {
        let response = HttpResponse::new(StatusCode::OK, "not json");
        let err = decode::<Vec<String>>(&response, "sources").unwrap_err();
        assert!(matches!(err, ClientError::Decode { what: "sources", .. }));
    }
}
