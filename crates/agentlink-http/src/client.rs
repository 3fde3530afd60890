//! reqwest-backed transport

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, info};

use crate::{
    config::HttpConfig,
    error::{HttpError, Result},
    request::{HttpRequest, HttpResponse, RequestBody},
};

/// Header Frontegg uses to correlate requests with its support tooling
pub const TRACE_ID_HEADER: &str = "frontegg-trace-id";

/// Transport used by the API client
#[async_trait]
pub trait HttpClientTrait: Send + Sync {
    /// Execute a request and buffer the full response
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// [`HttpClientTrait`] over a pooled `reqwest::Client`
pub struct HttpClient {
    inner: reqwest::Client,
    config: HttpConfig,
}

impl HttpClient {
    /// Build a client from transport settings
    pub fn new(config: HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(&config.user_agent);

        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| HttpError::InvalidProxy(e.to_string()))?;
            builder = builder.proxy(proxy);
        }

        let inner = builder
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;

        Ok(Self { inner, config })
    }

    /// Client with default timeouts and no proxy
    pub fn with_defaults() -> Result<Self> {
        Self::new(HttpConfig::default())
    }

    /// Settings the client was built with
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = request
            .url
            .parse::<url::Url>()
            .map_err(|e| HttpError::InvalidUrl(e.to_string()))?;
        let operation = format!("{} {}", request.method, url.path());
        debug!("HTTP {}", operation);

        let mut builder = self
            .inner
            .request(request.method, url)
            .header(ACCEPT, "application/json");

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(token) = &request.bearer_token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(value.to_string()),
            // reqwest sets the boundary-bearing content type itself
            RequestBody::Multipart(payload) => builder.multipart(payload.into_form()?),
        };

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        let response = HttpResponse {
            status,
            headers,
            body,
        };
        log_trace_id(&operation, &response);

        Ok(response)
    }
}

fn log_trace_id(operation: &str, response: &HttpResponse) {
    if let Some(trace_id) = response.header(TRACE_ID_HEADER) {
        info!(
            operation,
            status_code = response.status.as_u16(),
            frontegg_trace_id = trace_id,
            "Frontegg API response"
        );
    }
}

/// Build a client behind `Arc<dyn HttpClientTrait>` for sharing across API clients
pub fn shared_client(config: HttpConfig) -> Result<Arc<dyn HttpClientTrait>> {
    Ok(Arc::new(HttpClient::new(config)?))
}
