use std::sync::Arc;

use agentlink_client::{AgentLinkClient, McpConfiguration, McpConfigurationRequest};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::Resource;
use crate::diagnostics::Diagnostics;
use crate::error::{ProviderError, Result};

pub const DEFAULT_MCP_API_TIMEOUT: i64 = 5000;

/// State of `agentlink_mcp_configuration`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct McpConfigurationState {
    pub id: Option<String>,
    pub application_id: String,
    pub base_url: String,
    pub api_timeout: i64,
}

impl Default for McpConfigurationState {
    fn default() -> Self {
        Self {
            id: None,
            application_id: String::new(),
            base_url: String::new(),
            api_timeout: DEFAULT_MCP_API_TIMEOUT,
        }
    }
}

impl From<McpConfiguration> for McpConfigurationState {
    fn from(config: McpConfiguration) -> Self {
        Self {
            id: Some(config.id),
            application_id: config.app_id,
            base_url: config.base_url,
            api_timeout: config.api_timeout,
        }
    }
}

/// One MCP configuration per application; create and update both upsert
pub struct McpConfigurationResource {
    client: Arc<AgentLinkClient>,
}

impl McpConfigurationResource {
    pub fn new(client: Arc<AgentLinkClient>) -> Self {
        Self { client }
    }

    async fn upsert(
        &self,
        planned: McpConfigurationState,
        action: &'static str,
    ) -> Result<McpConfigurationState> {
        let config = self
            .client
            .upsert_mcp_configuration(&McpConfigurationRequest {
                app_id: planned.application_id,
                base_url: planned.base_url,
                api_timeout: planned.api_timeout,
            })
            .await
            .map_err(|e| ProviderError::client(action, e))?;
        Ok(config.into())
    }

    async fn fetch(&self, app_id: &str) -> Result<Option<McpConfigurationState>> {
        let config = self
            .client
            .get_mcp_configuration(app_id)
            .await
            .map_err(|e| ProviderError::client("read MCP configuration", e))?;
        Ok(config.map(McpConfigurationState::from))
    }
}

#[async_trait]
impl Resource for McpConfigurationResource {
    type State = McpConfigurationState;

    fn type_name(&self) -> &'static str {
        "agentlink_mcp_configuration"
    }

    async fn create(&self, planned: McpConfigurationState) -> Result<McpConfigurationState> {
        self.upsert(planned, "create MCP configuration").await
    }

    async fn read(&self, current: McpConfigurationState) -> Result<Option<McpConfigurationState>> {
        self.fetch(&current.application_id).await
    }

    async fn update(
        &self,
        _prior: McpConfigurationState,
        planned: McpConfigurationState,
    ) -> Result<McpConfigurationState> {
        self.upsert(planned, "update MCP configuration").await
    }

    /// The API has no delete; the configuration stays on the server
    async fn delete(&self, _current: McpConfigurationState) -> Result<Diagnostics> {
        Ok(Diagnostics::new())
    }

    async fn import(&self, application_id: &str) -> Result<Option<McpConfigurationState>> {
        self.fetch(application_id).await
    }
}
