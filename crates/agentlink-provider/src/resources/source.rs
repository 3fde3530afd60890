use std::sync::Arc;

use agentlink_client::{AgentLinkClient, CreateSourceRequest, Source, SourceType, UpdateSourceRequest};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::Resource;
use crate::config::DEFAULT_SOURCE_API_TIMEOUT;
use crate::diagnostics::Diagnostics;
use crate::error::{ProviderError, Result};

/// State of `agentlink_source`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceState {
    pub id: Option<String>,
    pub application_id: String,
    pub name: String,
    /// Written as one of the [`SourceType`] names; read back verbatim
    #[serde(rename = "type")]
    pub source_type: String,
    pub source_url: String,
    pub api_timeout: i64,
    pub enabled: bool,
    pub vendor_id: Option<String>,
}

impl Default for SourceState {
    fn default() -> Self {
        Self {
            id: None,
            application_id: String::new(),
            name: String::new(),
            source_type: SourceType::default().to_string(),
            source_url: String::new(),
            api_timeout: DEFAULT_SOURCE_API_TIMEOUT,
            enabled: true,
            vendor_id: None,
        }
    }
}

impl From<Source> for SourceState {
    fn from(source: Source) -> Self {
        Self {
            id: Some(source.id),
            application_id: source.app_id,
            name: source.name,
            source_type: source.source_type,
            source_url: source.source_url,
            api_timeout: source.api_timeout,
            enabled: source.enabled,
            vendor_id: Some(source.vendor_id),
        }
    }
}

pub struct SourceResource {
    client: Arc<AgentLinkClient>,
}

impl SourceResource {
    pub fn new(client: Arc<AgentLinkClient>) -> Self {
        Self { client }
    }

    async fn fetch(&self, app_id: &str, source_id: &str) -> Result<Option<SourceState>> {
        let source = self
            .client
            .get_source(app_id, source_id)
            .await
            .map_err(|e| ProviderError::client("read source", e))?;
        Ok(source.map(SourceState::from))
    }
}

impl SourceState {
    fn kind(&self) -> Result<SourceType> {
        self.source_type
            .parse()
            .map_err(|detail: String| ProviderError::validation("Invalid Source Type", detail))
    }
}

/// Split an `application_id:source_id` import id
pub(crate) fn split_import_id<'a>(id: &'a str, expected: &'static str) -> Result<(&'a str, &'a str)> {
    let parts: Vec<&str> = id.split(':').collect();
    match parts.as_slice() {
        [first, second] if !first.is_empty() && !second.is_empty() => Ok((*first, *second)),
        _ => Err(ProviderError::InvalidImportId {
            expected,
            id: id.to_string(),
        }),
    }
}

#[async_trait]
impl Resource for SourceResource {
    type State = SourceState;

    fn type_name(&self) -> &'static str {
        "agentlink_source"
    }

    async fn create(&self, planned: SourceState) -> Result<SourceState> {
        let source_type = planned.kind()?;
        let source = self
            .client
            .create_source(&CreateSourceRequest {
                app_id: planned.application_id,
                name: planned.name,
                source_type,
                source_url: planned.source_url,
                api_timeout: planned.api_timeout,
                enabled: planned.enabled,
            })
            .await
            .map_err(|e| ProviderError::client("create source", e))?;
        Ok(source.into())
    }

    async fn read(&self, current: SourceState) -> Result<Option<SourceState>> {
        match current.id.as_deref() {
            Some(id) => self.fetch(&current.application_id, id).await,
            None => Ok(None),
        }
    }

    async fn update(&self, prior: SourceState, planned: SourceState) -> Result<SourceState> {
        let source_type = planned.kind()?;
        let id = prior.id.or(planned.id).unwrap_or_default();
        let source = self
            .client
            .update_source(
                &id,
                &UpdateSourceRequest {
                    app_id: planned.application_id,
                    name: Some(planned.name),
                    source_type: Some(source_type),
                    source_url: Some(planned.source_url),
                    api_timeout: Some(planned.api_timeout),
                    enabled: Some(planned.enabled),
                },
            )
            .await
            .map_err(|e| ProviderError::client("update source", e))?;
        Ok(source.into())
    }

    async fn delete(&self, current: SourceState) -> Result<Diagnostics> {
        let id = current.id.unwrap_or_default();
        self.client
            .delete_source(&current.application_id, &id)
            .await
            .map_err(|e| ProviderError::client("delete source", e))?;
        Ok(Diagnostics::new())
    }

    async fn import(&self, id: &str) -> Result<Option<SourceState>> {
        let (app_id, source_id) = split_import_id(id, "application_id:source_id")?;
        self.fetch(app_id, source_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_import_id() {
        assert_eq!(
            split_import_id("app-1:src-1", "application_id:source_id").unwrap(),
            ("app-1", "src-1")
        );
        for bad in ["app-1", "app-1:src-1:extra", ":src-1", "app-1:"] {
            let err = split_import_id(bad, "application_id:source_id").unwrap_err();
            assert!(matches!(err, ProviderError::InvalidImportId { .. }), "{bad}");
        }
    }

    #[test]
    fn test_unknown_type_rejected_on_write() {
        let state = SourceState {
            source_type: "SOAP".to_string(),
            ..Default::default()
        };
        let diag = state.kind().unwrap_err().to_diagnostic();
        assert_eq!(diag.summary, "Invalid Source Type");
        assert!(diag.detail.contains("SOAP"));
    }

    #[test]
    fn test_state_defaults() {
        let state: SourceState = serde_json::from_value(serde_json::json!({
            "application_id": "app-1",
            "name": "orders",
            "type": "GRAPHQL",
            "source_url": "https://orders.example.com/graphql"
        }))
        .unwrap();
        assert_eq!(state.api_timeout, 3000);
        assert!(state.enabled);
        assert_eq!(state.kind().unwrap(), SourceType::Graphql);
    }
}
