//! API client error types

use agentlink_http::HttpError;
use thiserror::Error;

/// Result type for API client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors surfaced by the AgentLink API client
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connect, timeout, encoding)
    #[error(transparent)]
    Http(#[from] HttpError),

    /// `/auth/vendor` rejected the credentials
    #[error("authentication failed with status {status}: {body}")]
    Authentication { status: u16, body: String },

    /// An endpoint answered with a status it does not use for success
    #[error("failed to {operation} with status {status}: {body}")]
    Api {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// Response body did not match the expected shape
    #[error("failed to decode {what} response: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A resource vanished between a write and the follow-up read
    #[error("{0} not found after write")]
    MissingAfterWrite(&'static str),

    /// Only REST and GRAPHQL sources carry importable schemas
    #[error("schema import not supported for source type: {0}")]
    UnsupportedSchemaSource(String),
}

impl ClientError {
    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Authentication { status, .. } | ClientError::Api { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_shape() {
        let err = ClientError::Api {
            operation: "create source",
            status: 400,
            body: "{\"message\":\"bad url\"}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to create source with status 400: {\"message\":\"bad url\"}"
        );
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_status_absent_for_non_http_errors() {
        let err = ClientError::UnsupportedSchemaSource("MOCK".to_string());
        assert_eq!(err.status(), None);
        assert_eq!(
            err.to_string(),
            "schema import not supported for source type: MOCK"
        );
    }
}
