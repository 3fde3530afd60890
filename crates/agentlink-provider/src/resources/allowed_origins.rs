use std::sync::Arc;

use agentlink_client::{AgentLinkClient, VendorConfig};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::Resource;
use crate::diagnostics::Diagnostics;
use crate::error::{ProviderError, Result};

/// State of `agentlink_allowed_origins`; `id` is the vendor id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowedOriginsState {
    pub id: Option<String>,
    pub allowed_origins: Vec<String>,
}

/// The server stores origins with a trailing slash
pub(crate) fn normalize_origin(origin: &str) -> String {
    origin.strip_suffix('/').unwrap_or(origin).to_string()
}

impl From<VendorConfig> for AllowedOriginsState {
    fn from(config: VendorConfig) -> Self {
        Self {
            id: Some(config.id),
            allowed_origins: config
                .allowed_origins
                .iter()
                .map(|origin| normalize_origin(origin))
                .collect(),
        }
    }
}

/// Vendor-wide CORS origins
///
/// Writes keep the planned origins in state rather than the server's
/// normalized echo.
pub struct AllowedOriginsResource {
    client: Arc<AgentLinkClient>,
}

impl AllowedOriginsResource {
    pub fn new(client: Arc<AgentLinkClient>) -> Self {
        Self { client }
    }

    async fn write(&self, mut planned: AllowedOriginsState) -> Result<AllowedOriginsState> {
        let config = self
            .client
            .update_allowed_origins(&planned.allowed_origins)
            .await
            .map_err(|e| ProviderError::client("update allowed origins", e))?;
        planned.id = Some(config.id);
        Ok(planned)
    }

    async fn fetch(&self) -> Result<AllowedOriginsState> {
        let config = self
            .client
            .get_vendor_config()
            .await
            .map_err(|e| ProviderError::client("read vendor config", e))?;
        Ok(config.into())
    }
}

#[async_trait]
impl Resource for AllowedOriginsResource {
    type State = AllowedOriginsState;

    fn type_name(&self) -> &'static str {
        "agentlink_allowed_origins"
    }

    async fn create(&self, planned: AllowedOriginsState) -> Result<AllowedOriginsState> {
        self.write(planned).await
    }

    async fn read(&self, _current: AllowedOriginsState) -> Result<Option<AllowedOriginsState>> {
        self.fetch().await.map(Some)
    }

    async fn update(
        &self,
        _prior: AllowedOriginsState,
        planned: AllowedOriginsState,
    ) -> Result<AllowedOriginsState> {
        self.write(planned).await
    }

    /// Clears every origin
    async fn delete(&self, _current: AllowedOriginsState) -> Result<Diagnostics> {
        self.client
            .update_allowed_origins(&[])
            .await
            .map_err(|e| ProviderError::client("clear allowed origins", e))?;
        Ok(Diagnostics::new())
    }

    async fn import(&self, _id: &str) -> Result<Option<AllowedOriginsState>> {
        self.fetch().await.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_origin() {
        assert_eq!(normalize_origin("https://app.example.com/"), "https://app.example.com");
        assert_eq!(normalize_origin("https://app.example.com"), "https://app.example.com");
        assert_eq!(normalize_origin("http://localhost:3000//"), "http://localhost:3000/");
    }
}
