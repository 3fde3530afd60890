use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{JsonObject, SourceType};

/// Schema flavours the import endpoints understand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    #[serde(rename = "openapi")]
    OpenApi,
    Graphql,
}

impl SchemaKind {
    /// Multipart field name and path segment of the import endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::OpenApi => "openapi",
            SchemaKind::Graphql => "graphql",
        }
    }

    /// Source type the imported tools are registered under
    pub fn source_type(&self) -> SourceType {
        match self {
            SchemaKind::OpenApi => SourceType::Rest,
            SchemaKind::Graphql => SourceType::Graphql,
        }
    }

    /// Schema kind for a source type, if that type supports imports
    pub fn for_source(source_type: SourceType) -> Option<Self> {
        match source_type {
            SourceType::Rest => Some(SchemaKind::OpenApi),
            SourceType::Graphql => Some(SchemaKind::Graphql),
            _ => None,
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openapi" => Ok(SchemaKind::OpenApi),
            "graphql" => Ok(SchemaKind::Graphql),
            other => Err(format!(
                "schema_type must be 'openapi' or 'graphql', got '{other}'"
            )),
        }
    }
}

/// A tool produced by a schema import, or sent to the upsert endpoint
///
/// Fields the import returns but this type does not name are kept in
/// `extra` so an import can be fed back into an upsert unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalTool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_path: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertToolsRequest {
    pub app_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_type: Option<SourceType>,
    pub tools: Vec<InternalTool>,
}
