//! Frontegg AgentLink API client
//!
//! Wraps the vendor-authenticated Frontegg REST API used to manage
//! AgentLink applications, MCP configuration, sources, imported tools and
//! policies.
//!
//! ## Authentication
//!
//! The client exchanges a vendor client id and secret for a bearer token at
//! `POST /auth/vendor`. The token is cached behind a read/write lock and
//! refreshed lazily: whichever caller first observes an absent or expired
//! token re-authenticates. Tokens are treated as expired 60 seconds before
//! the server-declared lifetime ends.
//!
//! ## Errors
//!
//! No endpoint is retried. Unexpected status codes become
//! [`ClientError::Api`] carrying the status and response body; endpoints
//! that look a single resource up return `Ok(None)` on 404.

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;

pub use auth::{Credentials, TOKEN_EXPIRY_BUFFER};
pub use client::AgentLinkClient;
pub use error::{ClientError, Result};
pub use models::*;
