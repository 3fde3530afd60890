use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of upstream integration a source points at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    #[default]
    Rest,
    Graphql,
    Mock,
    McpProxy,
    Frontegg,
    CustomIntegration,
}

impl SourceType {
    pub const ALL: [SourceType; 6] = [
        SourceType::Rest,
        SourceType::Graphql,
        SourceType::Mock,
        SourceType::McpProxy,
        SourceType::Frontegg,
        SourceType::CustomIntegration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Rest => "REST",
            SourceType::Graphql => "GRAPHQL",
            SourceType::Mock => "MOCK",
            SourceType::McpProxy => "MCP_PROXY",
            SourceType::Frontegg => "FRONTEGG",
            SourceType::CustomIntegration => "CUSTOM_INTEGRATION",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "invalid source type '{}', expected one of: {}",
                    s,
                    SourceType::ALL.map(|t| t.as_str()).join(", ")
                )
            })
    }
}

/// An MCP configuration source belonging to an application
///
/// `source_type` is kept as the server sent it so a source of a kind this
/// crate does not know still decodes; see [`Source::kind`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Source {
    pub id: String,
    pub vendor_id: String,
    pub app_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub source_type: String,
    pub source_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    pub api_timeout: i64,
    pub enabled: bool,
}

impl Source {
    /// Parsed source type, `None` for kinds not listed in [`SourceType`]
    pub fn kind(&self) -> Option<SourceType> {
        self.source_type.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSourceRequest {
    pub app_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub source_type: SourceType,
    pub source_url: String,
    pub api_timeout: i64,
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSourceRequest {
    pub app_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub source_type: Option<SourceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_timeout: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_type_wire_names() {
        for source_type in SourceType::ALL {
            let wire = serde_json::to_value(source_type).unwrap();
            assert_eq!(wire, serde_json::Value::String(source_type.to_string()));
            assert_eq!(source_type.as_str().parse::<SourceType>(), Ok(source_type));
        }
    }

    #[test]
    fn test_source_type_rejects_unknown() {
        let err = "SOAP".parse::<SourceType>().unwrap_err();
        assert!(err.contains("SOAP"));
        assert!(err.contains("MCP_PROXY"));
    }

    #[test]
    fn test_unknown_source_type_still_decodes() {
        let sources: Vec<Source> = serde_json::from_value(serde_json::json!([
            {"id": "src-1", "name": "orders", "type": "REST"},
            {"id": "src-2", "name": "legacy", "type": "OPENAPI_V2"}
        ]))
        .unwrap();

        assert_eq!(sources[0].kind(), Some(SourceType::Rest));
        assert_eq!(sources[1].source_type, "OPENAPI_V2");
        assert_eq!(sources[1].kind(), None);
    }

    #[test]
    fn test_update_request_keeps_app_id() {
        let request = UpdateSourceRequest {
            app_id: "app-1".to_string(),
            enabled: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"appId": "app-1", "enabled": false})
        );
    }
}
