//! Managed resources and their lifecycles
//!
//! Each resource implements [`Resource`] over a typed state model. The
//! [`ProviderRegistry`] erases those types so a host can drive any resource
//! by type name with JSON state, receiving failures as diagnostics.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::data_sources::ApplicationDataSource;
use crate::diagnostics::Diagnostics;
use crate::error::{ProviderError, Result};
use crate::provider::ProviderData;

pub mod allowed_origins;
pub mod application;
pub mod conditional_policy;
pub mod identity_configuration;
pub mod masking_policy;
pub mod mcp_configuration;
pub mod policy;
pub mod rbac_policy;
pub mod source;
pub mod tools_import;

pub use allowed_origins::{AllowedOriginsResource, AllowedOriginsState};
pub use application::{ApplicationResource, ApplicationState};
pub use conditional_policy::{ConditionalPolicyResource, ConditionalPolicyState};
pub use identity_configuration::{IdentityConfigurationResource, IdentityConfigurationState};
pub use masking_policy::{MaskingPolicyResource, MaskingPolicyState};
pub use mcp_configuration::{McpConfigurationResource, McpConfigurationState};
pub use rbac_policy::{RbacPolicyResource, RbacPolicyState};
pub use source::{SourceResource, SourceState};
pub use tools_import::{ToolsImportResource, ToolsImportState};

/// Lifecycle of one managed resource type
///
/// `read` and `import` return `Ok(None)` when the remote object no longer
/// exists, which removes the resource from state.
#[async_trait]
pub trait Resource: Send + Sync {
    type State: Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Full type name, e.g. `agentlink_application`
    fn type_name(&self) -> &'static str;

    async fn create(&self, planned: Self::State) -> Result<Self::State>;

    async fn read(&self, current: Self::State) -> Result<Option<Self::State>>;

    async fn update(&self, prior: Self::State, planned: Self::State) -> Result<Self::State>;

    /// Warnings in the returned diagnostics do not fail the delete
    async fn delete(&self, current: Self::State) -> Result<Diagnostics>;

    async fn import(&self, id: &str) -> Result<Option<Self::State>>;
}

/// [`Resource`] with its state type erased to JSON
#[async_trait]
pub trait DynResource: Send + Sync {
    fn type_name(&self) -> &'static str;
    async fn create_json(&self, planned: Value) -> Result<Value>;
    async fn read_json(&self, current: Value) -> Result<Option<Value>>;
    async fn update_json(&self, prior: Value, planned: Value) -> Result<Value>;
    async fn delete_json(&self, current: Value) -> Result<Diagnostics>;
    async fn import_json(&self, id: &str) -> Result<Option<Value>>;
}

#[async_trait]
impl<R: Resource> DynResource for R {
    fn type_name(&self) -> &'static str {
        Resource::type_name(self)
    }

    async fn create_json(&self, planned: Value) -> Result<Value> {
        let planned = decode_state(Resource::type_name(self), planned)?;
        encode_state(Resource::type_name(self), &self.create(planned).await?)
    }

    async fn read_json(&self, current: Value) -> Result<Option<Value>> {
        let current = decode_state(Resource::type_name(self), current)?;
        self.read(current)
            .await?
            .map(|state| encode_state(Resource::type_name(self), &state))
            .transpose()
    }

    async fn update_json(&self, prior: Value, planned: Value) -> Result<Value> {
        let prior = decode_state(Resource::type_name(self), prior)?;
        let planned = decode_state(Resource::type_name(self), planned)?;
        encode_state(Resource::type_name(self), &self.update(prior, planned).await?)
    }

    async fn delete_json(&self, current: Value) -> Result<Diagnostics> {
        let current = decode_state(Resource::type_name(self), current)?;
        self.delete(current).await
    }

    async fn import_json(&self, id: &str) -> Result<Option<Value>> {
        self.import(id)
            .await?
            .map(|state| encode_state(Resource::type_name(self), &state))
            .transpose()
    }
}

fn decode_state<T: DeserializeOwned>(resource: &'static str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|source| ProviderError::InvalidState { resource, source })
}

fn encode_state<T: Serialize>(resource: &'static str, state: &T) -> Result<Value> {
    serde_json::to_value(state).map_err(|source| ProviderError::InvalidState { resource, source })
}

/// New state (absent when the resource is gone) plus diagnostics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceResponse {
    pub state: Option<Value>,
    pub diagnostics: Diagnostics,
}

impl ResourceResponse {
    fn from_result(result: Result<Option<Value>>) -> Self {
        match result {
            Ok(state) => Self {
                state,
                diagnostics: Diagnostics::new(),
            },
            Err(err) => Self {
                state: None,
                diagnostics: err.to_diagnostic().into(),
            },
        }
    }
}

/// All resources and data sources of a configured provider
pub struct ProviderRegistry {
    resources: BTreeMap<&'static str, Box<dyn DynResource>>,
    application: ApplicationDataSource,
}

impl ProviderRegistry {
    pub fn new(data: Arc<ProviderData>) -> Self {
        let client = &data.client;
        let resources: Vec<Box<dyn DynResource>> = vec![
            Box::new(ApplicationResource::new(client.clone())),
            Box::new(SourceResource::new(client.clone())),
            Box::new(McpConfigurationResource::new(client.clone())),
            Box::new(ToolsImportResource::new(client.clone())),
            Box::new(ConditionalPolicyResource::new(client.clone())),
            Box::new(RbacPolicyResource::new(client.clone())),
            Box::new(MaskingPolicyResource::new(client.clone())),
            Box::new(AllowedOriginsResource::new(client.clone())),
            Box::new(IdentityConfigurationResource::new(client.clone())),
        ];

        Self {
            resources: resources
                .into_iter()
                .map(|resource| (resource.type_name(), resource))
                .collect(),
            application: ApplicationDataSource::new(data.application.clone()),
        }
    }

    /// Registered resource type names, sorted
    pub fn resource_types(&self) -> Vec<&'static str> {
        self.resources.keys().copied().collect()
    }

    pub fn data_source_types(&self) -> Vec<&'static str> {
        vec![ApplicationDataSource::TYPE_NAME]
    }

    fn resource(&self, type_name: &str) -> Result<&dyn DynResource> {
        self.resources
            .get(type_name)
            .map(|resource| resource.as_ref())
            .ok_or_else(|| ProviderError::UnknownResource(type_name.to_string()))
    }

    pub async fn create(&self, type_name: &str, planned: Value) -> ResourceResponse {
        let result = match self.resource(type_name) {
            Ok(resource) => resource.create_json(planned).await.map(Some),
            Err(err) => Err(err),
        };
        ResourceResponse::from_result(result)
    }

    pub async fn read(&self, type_name: &str, current: Value) -> ResourceResponse {
        let result = match self.resource(type_name) {
            Ok(resource) => resource.read_json(current).await,
            Err(err) => Err(err),
        };
        ResourceResponse::from_result(result)
    }

    pub async fn update(&self, type_name: &str, prior: Value, planned: Value) -> ResourceResponse {
        let result = match self.resource(type_name) {
            Ok(resource) => resource.update_json(prior, planned).await.map(Some),
            Err(err) => Err(err),
        };
        ResourceResponse::from_result(result)
    }

    /// On success the state is `None` and only warnings may be reported
    pub async fn delete(&self, type_name: &str, current: Value) -> ResourceResponse {
        let result = match self.resource(type_name) {
            Ok(resource) => resource.delete_json(current).await,
            Err(err) => Err(err),
        };
        match result {
            Ok(diagnostics) => ResourceResponse {
                state: None,
                diagnostics,
            },
            Err(err) => ResourceResponse::from_result(Err(err)),
        }
    }

    pub async fn import(&self, type_name: &str, id: &str) -> ResourceResponse {
        let result = match self.resource(type_name) {
            Ok(resource) => resource.import_json(id).await,
            Err(err) => Err(err),
        };
        ResourceResponse::from_result(result)
    }

    pub fn read_data_source(&self, type_name: &str) -> ResourceResponse {
        let result = if type_name == ApplicationDataSource::TYPE_NAME {
            serde_json::to_value(self.application.read())
                .map(Some)
                .map_err(|source| ProviderError::InvalidState {
                    resource: ApplicationDataSource::TYPE_NAME,
                    source,
                })
        } else {
            Err(ProviderError::UnknownResource(type_name.to_string()))
        };
        ResourceResponse::from_result(result)
    }
}

/// `None` for empty strings, matching how the API omits unset fields
pub(crate) fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
