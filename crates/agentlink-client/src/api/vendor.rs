use agentlink_http::{Method, RequestBody};
use tracing::info;

use super::VENDORS_PATH;
use crate::client::{decode, expect_status, AgentLinkClient, OK};
use crate::error::Result;
use crate::models::{UpdateAllowedOriginsRequest, VendorConfig};

impl AgentLinkClient {
    /// Vendor settings, including allowed origins
    pub async fn get_vendor_config(&self) -> Result<VendorConfig> {
        info!("Fetching vendor configuration");

        let response = self
            .send(Method::GET, VENDORS_PATH, &[], RequestBody::Empty)
            .await?;
        let response = expect_status(response, OK, "get vendor config")?;
        let config: VendorConfig = decode(&response, "vendor config")?;

        info!(
            vendor_id = %config.id,
            allowed_origins = ?config.allowed_origins,
            "Successfully fetched vendor configuration"
        );
        Ok(config)
    }

    /// Replace the vendor's allowed origins with `origins`
    pub async fn update_allowed_origins(&self, origins: &[String]) -> Result<VendorConfig> {
        info!(origins = ?origins, "Updating allowed origins");

        let request = UpdateAllowedOriginsRequest {
            allowed_origins: origins.to_vec(),
        };
        let response = self
            .send_json(Method::PUT, VENDORS_PATH, &[], &request)
            .await?;
        let response = expect_status(response, OK, "update allowed origins")?;
        let config: VendorConfig = decode(&response, "vendor config")?;

        info!(
            vendor_id = %config.id,
            allowed_origins = ?config.allowed_origins,
            "Successfully updated allowed origins"
        );
        Ok(config)
    }
}
