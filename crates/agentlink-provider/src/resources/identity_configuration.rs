use std::sync::Arc;

use agentlink_client::{AgentLinkClient, IdentityConfiguration, UpdateIdentityConfigurationRequest};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::Resource;
use crate::diagnostics::Diagnostics;
use crate::error::{ProviderError, Result};

/// State of `agentlink_identity_configuration`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfigurationState {
    pub id: Option<String>,
    /// Seconds
    pub default_token_expiration: i64,
}

impl From<IdentityConfiguration> for IdentityConfigurationState {
    fn from(config: IdentityConfiguration) -> Self {
        Self {
            id: Some(config.id),
            default_token_expiration: config.default_token_expiration,
        }
    }
}

/// Singleton identity settings of the vendor
pub struct IdentityConfigurationResource {
    client: Arc<AgentLinkClient>,
}

impl IdentityConfigurationResource {
    pub fn new(client: Arc<AgentLinkClient>) -> Self {
        Self { client }
    }

    async fn write(
        &self,
        planned: IdentityConfigurationState,
        action: &'static str,
    ) -> Result<IdentityConfigurationState> {
        let config = self
            .client
            .update_identity_configuration(&UpdateIdentityConfigurationRequest {
                default_token_expiration: Some(planned.default_token_expiration),
            })
            .await
            .map_err(|e| ProviderError::client(action, e))?;
        Ok(config.into())
    }

    async fn fetch(&self) -> Result<IdentityConfigurationState> {
        let config = self
            .client
            .get_identity_configuration()
            .await
            .map_err(|e| ProviderError::client("read identity configuration", e))?;
        Ok(config.into())
    }
}

#[async_trait]
impl Resource for IdentityConfigurationResource {
    type State = IdentityConfigurationState;

    fn type_name(&self) -> &'static str {
        "agentlink_identity_configuration"
    }

    async fn create(&self, planned: IdentityConfigurationState) -> Result<IdentityConfigurationState> {
        self.write(planned, "create identity configuration").await
    }

    async fn read(
        &self,
        _current: IdentityConfigurationState,
    ) -> Result<Option<IdentityConfigurationState>> {
        self.fetch().await.map(Some)
    }

    async fn update(
        &self,
        _prior: IdentityConfigurationState,
        planned: IdentityConfigurationState,
    ) -> Result<IdentityConfigurationState> {
        self.write(planned, "update identity configuration").await
    }

    /// Cannot be deleted; the server keeps its current values
    async fn delete(&self, _current: IdentityConfigurationState) -> Result<Diagnostics> {
        Ok(Diagnostics::new())
    }

    async fn import(&self, _id: &str) -> Result<Option<IdentityConfigurationState>> {
        self.fetch().await.map(Some)
    }
}
