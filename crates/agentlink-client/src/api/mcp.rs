use agentlink_http::{Method, RequestBody, StatusCode};
use tracing::info;

use super::MCP_CONFIGURATIONS_PATH;
use crate::client::{decode, expect_status, AgentLinkClient, OK, OK_OR_CREATED};
use crate::error::Result;
use crate::models::{McpConfiguration, McpConfigurationRequest};

impl AgentLinkClient {
    /// Create or replace the MCP configuration of an application
    pub async fn upsert_mcp_configuration(
        &self,
        request: &McpConfigurationRequest,
    ) -> Result<McpConfiguration> {
        info!(
            app_id = %request.app_id,
            base_url = %request.base_url,
            "Creating/updating MCP configuration"
        );

        let response = self
            .send_json(Method::POST, MCP_CONFIGURATIONS_PATH, &[], request)
            .await?;
        let response = expect_status(response, OK_OR_CREATED, "create/update MCP configuration")?;
        decode(&response, "MCP configuration")
    }

    /// MCP configuration of an application; `None` on 404
    pub async fn get_mcp_configuration(&self, app_id: &str) -> Result<Option<McpConfiguration>> {
        info!(app_id, "Fetching MCP configuration");

        let response = self
            .send(
                Method::GET,
                MCP_CONFIGURATIONS_PATH,
                &[("appId", app_id)],
                RequestBody::Empty,
            )
            .await?;
        if response.status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = expect_status(response, OK, "get MCP configuration")?;
        decode(&response, "MCP configuration").map(Some)
    }
}
