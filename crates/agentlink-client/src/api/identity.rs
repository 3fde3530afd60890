use agentlink_http::Method;
use serde_json::json;
use tracing::info;

use super::IDENTITY_CONFIGURATION_PATH;
use crate::client::{decode, expect_status, AgentLinkClient, OK_OR_CREATED};
use crate::error::Result;
use crate::models::{IdentityConfiguration, UpdateIdentityConfigurationRequest};

impl AgentLinkClient {
    /// Read the identity configuration
    ///
    /// The endpoint is add-or-update; posting an empty object changes nothing
    /// and returns the current state.
    pub async fn get_identity_configuration(&self) -> Result<IdentityConfiguration> {
        info!("Fetching identity configuration");

        let response = self
            .send_json(Method::POST, IDENTITY_CONFIGURATION_PATH, &[], &json!({}))
            .await?;
        let response = expect_status(response, OK_OR_CREATED, "get identity configuration")?;
        let config: IdentityConfiguration = decode(&response, "identity configuration")?;

        info!(
            id = %config.id,
            default_token_expiration = config.default_token_expiration,
            "Successfully fetched identity configuration"
        );
        Ok(config)
    }

    /// Patch the vendor identity configuration
    pub async fn update_identity_configuration(
        &self,
        request: &UpdateIdentityConfigurationRequest,
    ) -> Result<IdentityConfiguration> {
        info!(
            default_token_expiration = ?request.default_token_expiration,
            "Updating identity configuration"
        );

        let response = self
            .send_json(Method::POST, IDENTITY_CONFIGURATION_PATH, &[], request)
            .await?;
        let response = expect_status(response, OK_OR_CREATED, "update identity configuration")?;
        decode(&response, "identity configuration")
    }
}
