//! Provider error types

use std::path::PathBuf;

use agentlink_client::ClientError;
use thiserror::Error;

use crate::diagnostics::Diagnostic;

/// Result type for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// An API call failed; `action` reads like "create application"
    #[error("Unable to {action}: {source}")]
    Client {
        action: &'static str,
        #[source]
        source: ClientError,
    },

    #[error("{summary}: {detail}")]
    Validation { summary: &'static str, detail: String },

    #[error("Unable to read schema file {}: {source}", path.display())]
    SchemaFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Import ID must be in the format '{expected}', got '{id}'")]
    InvalidImportId { expected: &'static str, id: String },

    #[error("invalid {resource} state: {source}")]
    InvalidState {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown resource type: {0}")]
    UnknownResource(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

impl ProviderError {
    pub fn client(action: &'static str, source: ClientError) -> Self {
        ProviderError::Client { action, source }
    }

    pub fn validation(summary: &'static str, detail: impl Into<String>) -> Self {
        ProviderError::Validation {
            summary,
            detail: detail.into(),
        }
    }

    /// Render the error the way it is reported to the user
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ProviderError::Client { .. } => Diagnostic::error("Client Error", self.to_string()),
            ProviderError::Validation { summary, detail } => Diagnostic::error(*summary, detail),
            ProviderError::SchemaFile { .. } => Diagnostic::error("File Error", self.to_string()),
            ProviderError::InvalidImportId { .. } => {
                Diagnostic::error("Invalid Import ID", self.to_string())
            }
            ProviderError::InvalidState { .. } => {
                Diagnostic::error("Invalid Resource State", self.to_string())
            }
            ProviderError::UnknownResource(_) => {
                Diagnostic::error("Unknown Resource Type", self.to_string())
            }
            ProviderError::Config(_) => {
                Diagnostic::error("Invalid Provider Configuration", self.to_string())
            }
            ProviderError::Logging(_) => Diagnostic::error("Logging Error", self.to_string()),
        }
    }
}
