use std::path::{Path, PathBuf};
use std::sync::Arc;

use agentlink_client::{AgentLinkClient, SchemaKind};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::source::split_import_id;
use super::Resource;
use crate::diagnostics::Diagnostics;
use crate::error::{ProviderError, Result};
use crate::provider::upload_filename;

/// State of `agentlink_tools_import`
///
/// `schema_hash` is the hex SHA-256 of the schema file, so editing the file
/// shows up as drift on the next read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsImportState {
    pub id: Option<String>,
    pub application_id: String,
    pub source_id: String,
    pub schema_file: PathBuf,
    pub schema_type: String,
    pub schema_hash: Option<String>,
    pub tools_count: Option<i64>,
}

/// Imports a schema file into tools registered under a source
pub struct ToolsImportResource {
    client: Arc<AgentLinkClient>,
}

pub(crate) fn schema_hash(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

/// Saturates instead of wrapping
fn tools_count(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

async fn read_schema(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .map_err(|source| ProviderError::SchemaFile {
            path: path.to_path_buf(),
            source,
        })
}

impl ToolsImportResource {
    pub fn new(client: Arc<AgentLinkClient>) -> Self {
        Self { client }
    }

    async fn import_schema(&self, mut planned: ToolsImportState) -> Result<ToolsImportState> {
        let content = read_schema(&planned.schema_file).await?;
        let hash = schema_hash(&content);

        let kind: SchemaKind = planned
            .schema_type
            .parse()
            .map_err(|detail: String| ProviderError::validation("Invalid Schema Type", detail))?;

        let tools = self
            .client
            .import_and_upsert_schema(
                &planned.application_id,
                &planned.source_id,
                kind.source_type(),
                content,
                &upload_filename(&planned.schema_file),
            )
            .await
            .map_err(|e| ProviderError::client("import schema", e))?;

        planned.id = Some(format!("{}:{}", planned.application_id, planned.source_id));
        planned.schema_hash = Some(hash);
        planned.tools_count = Some(tools_count(tools.len()));
        Ok(planned)
    }
}

#[async_trait]
impl Resource for ToolsImportResource {
    type State = ToolsImportState;

    fn type_name(&self) -> &'static str {
        "agentlink_tools_import"
    }

    async fn create(&self, planned: ToolsImportState) -> Result<ToolsImportState> {
        self.import_schema(planned).await
    }

    /// Refresh the hash from disk; a missing file keeps the recorded state
    async fn read(&self, mut current: ToolsImportState) -> Result<Option<ToolsImportState>> {
        match tokio::fs::read(&current.schema_file).await {
            Ok(content) => current.schema_hash = Some(schema_hash(&content)),
            Err(err) => {
                debug!(path = %current.schema_file.display(), error = %err, "Schema file unreadable, keeping state");
            }
        }
        Ok(Some(current))
    }

    async fn update(
        &self,
        _prior: ToolsImportState,
        planned: ToolsImportState,
    ) -> Result<ToolsImportState> {
        self.import_schema(planned).await
    }

    /// Tool removal failures are downgraded to a warning
    async fn delete(&self, current: ToolsImportState) -> Result<Diagnostics> {
        let mut diags = Diagnostics::new();
        if let Err(err) = self
            .client
            .delete_tools_by_source(&current.application_id, &current.source_id)
            .await
        {
            warn!(error = %err, "Failed to delete imported tools");
            diags.add_warning("Cleanup Warning", format!("Unable to delete tools: {err}"));
        }
        Ok(diags)
    }

    /// Import by `application_id:source_id`; the schema file is not known
    /// until the next apply
    async fn import(&self, id: &str) -> Result<Option<ToolsImportState>> {
        let (application_id, source_id) = split_import_id(id, "application_id:source_id")?;
        Ok(Some(ToolsImportState {
            id: Some(id.to_string()),
            application_id: application_id.to_string(),
            source_id: source_id.to_string(),
            ..Default::default()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_tools_count_saturates() {
        assert_eq!(tools_count(0), 0);
        assert_eq!(tools_count(42), 42);
        assert_eq!(tools_count(usize::MAX), i64::MAX);
    }

    #[test]
    fn test_schema_hash_is_hex_sha256() {
        assert_eq!(
            schema_hash(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            schema_hash(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[tokio::test]
    async fn test_read_keeps_state_when_file_missing() {
        let client = Arc::new(AgentLinkClient::new("http://127.0.0.1:9", "id", "secret").unwrap());
        let resource = ToolsImportResource::new(client);
        let state = ToolsImportState {
            id: Some("app-1:src-1".to_string()),
            application_id: "app-1".to_string(),
            source_id: "src-1".to_string(),
            schema_file: PathBuf::from("/nonexistent/schema.graphql"),
            schema_type: "graphql".to_string(),
            schema_hash: Some("old".to_string()),
            tools_count: Some(3),
        };

        let read = resource.read(state.clone()).await.unwrap();
        assert_eq!(read, Some(state));
    }

    #[tokio::test]
    async fn test_read_refreshes_hash() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.graphql");
        std::fs::write(&path, "abc").unwrap();

        let client = Arc::new(AgentLinkClient::new("http://127.0.0.1:9", "id", "secret").unwrap());
        let resource = ToolsImportResource::new(client);
        let state = ToolsImportState {
            schema_file: path,
            schema_hash: Some("old".to_string()),
            ..Default::default()
        };

        let read = resource.read(state).await.unwrap().unwrap();
        assert_eq!(
            read.schema_hash.as_deref(),
            Some("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
    }

    #[tokio::test]
    async fn test_invalid_schema_type_rejected_before_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.wsdl");
        std::fs::write(&path, "<definitions/>").unwrap();

        let client = Arc::new(AgentLinkClient::new("http://127.0.0.1:9", "id", "secret").unwrap());
        let resource = ToolsImportResource::new(client);
        let err = resource
            .create(ToolsImportState {
                application_id: "app-1".to_string(),
                source_id: "src-1".to_string(),
                schema_file: path,
                schema_type: "wsdl".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();

        let diag = err.to_diagnostic();
        assert_eq!(diag.summary, "Invalid Schema Type");
        assert_eq!(diag.detail, "schema_type must be 'openapi' or 'graphql', got 'wsdl'");
    }

    #[tokio::test]
    async fn test_missing_schema_file_is_file_error() {
        let client = Arc::new(AgentLinkClient::new("http://127.0.0.1:9", "id", "secret").unwrap());
        let resource = ToolsImportResource::new(client);
        let err = resource
            .create(ToolsImportState {
                schema_file: PathBuf::from("/nonexistent/openapi.json"),
                schema_type: "openapi".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_diagnostic().summary, "File Error");
    }
}
