//! HTTP transport for the AgentLink provider
//!
//! Sends JSON, multipart or empty requests through `reqwest` and hands back a
//! fully buffered [`HttpResponse`]. Status handling is left to the API layer,
//! which knows which codes each endpoint answers with.
//!
//! [`HttpClientTrait`] is the seam for substituting the transport; tests run
//! the real client against a local mock server instead.

pub mod client;
pub mod config;
pub mod error;
pub mod request;

pub use client::{shared_client, HttpClient, HttpClientTrait, TRACE_ID_HEADER};
pub use config::HttpConfig;
pub use error::{HttpError, Result};
pub use request::{FilePart, HttpRequest, HttpResponse, MultipartPayload, RequestBody};

pub use reqwest::{header, Method, StatusCode};
