use serde::{Deserialize, Serialize};

/// Vendor-wide settings returned by `/vendors`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VendorConfig {
    pub id: String,
    pub name: String,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAllowedOriginsRequest {
    pub allowed_origins: Vec<String>,
}

/// Identity settings; a singleton per vendor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdentityConfiguration {
    pub id: String,
    pub default_token_expiration: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIdentityConfigurationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_token_expiration: Option<i64>,
}
