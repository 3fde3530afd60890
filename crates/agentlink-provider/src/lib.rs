//! Frontegg AgentLink provider
//!
//! Resolves provider settings, authenticates, reconciles the configured
//! application and sources, and implements the create / read / update /
//! delete / import lifecycle of every AgentLink resource.
//!
//! ```ignore
//! use agentlink_provider::{AgentLinkProvider, ProviderRegistry, ProviderSettings};
//!
//! let response = AgentLinkProvider::new()
//!     .configure(&ProviderSettings {
//!         application_name: Some("Orders".to_string()),
//!         ..Default::default()
//!     })
//!     .await;
//!
//! if let Some(data) = response.data {
//!     let registry = ProviderRegistry::new(data);
//!     let created = registry
//!         .create("agentlink_allowed_origins", serde_json::json!({
//!             "allowed_origins": ["https://app.example.com"]
//!         }))
//!         .await;
//! }
//! ```

pub mod config;
pub mod data_sources;
pub mod diagnostics;
pub mod error;
pub mod logging;
pub mod provider;
pub mod resources;

pub use config::{ProviderSettings, ResolvedSettings, SettingsLoader, SourceSettings};
pub use data_sources::{ApplicationDataSource, ApplicationDataSourceState};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{ProviderError, Result};
pub use logging::init_logging;
pub use provider::{AgentLinkProvider, ApplicationRef, ConfigureResponse, ProviderData};
pub use resources::{DynResource, ProviderRegistry, Resource, ResourceResponse};
