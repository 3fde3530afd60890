use serde::{Deserialize, Serialize};

/// Per-application MCP gateway settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct McpConfiguration {
    pub id: String,
    pub vendor_id: String,
    pub app_id: String,
    pub base_url: String,
    pub api_timeout: i64,
}

/// Body for the create-or-update endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpConfigurationRequest {
    pub app_id: String,
    pub base_url: String,
    pub api_timeout: i64,
}
