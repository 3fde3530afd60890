use agentlink_http::{Method, RequestBody};
use tracing::info;

use super::SOURCES_PATH;
use crate::client::{decode, expect_status, AgentLinkClient, OK, OK_OR_CREATED, OK_OR_NO_CONTENT};
use crate::error::Result;
use crate::models::{CreateSourceRequest, Source, UpdateSourceRequest};

impl AgentLinkClient {
    /// List the MCP configuration sources of an application
    pub async fn list_sources(&self, app_id: &str) -> Result<Vec<Source>> {
        info!(app_id, "Fetching sources from Frontegg API");

        let response = self
            .send(Method::GET, SOURCES_PATH, &[("appId", app_id)], RequestBody::Empty)
            .await?;
        let response = expect_status(response, OK, "get sources")?;
        let sources: Vec<Source> = decode(&response, "sources")?;

        let names: Vec<&str> = sources.iter().map(|s| s.name.as_str()).collect();
        info!(count = sources.len(), names = ?names, "Successfully fetched sources");

        Ok(sources)
    }

    /// First source of the application with this exact name
    pub async fn find_source_by_name(&self, app_id: &str, name: &str) -> Result<Option<Source>> {
        let found = self
            .list_sources(app_id)
            .await?
            .into_iter()
            .find(|source| source.name == name);

        match &found {
            Some(source) => info!(name, id = %source.id, "Found source by name"),
            None => info!(name, "Source not found by name"),
        }
        Ok(found)
    }

    /// There is no single-source GET; this scans the application's list
    pub async fn get_source(&self, app_id: &str, source_id: &str) -> Result<Option<Source>> {
        Ok(self
            .list_sources(app_id)
            .await?
            .into_iter()
            .find(|source| source.id == source_id))
    }

    /// Create a source under `request.app_id`
    pub async fn create_source(&self, request: &CreateSourceRequest) -> Result<Source> {
        info!(
            name = %request.name,
            source_type = %request.source_type,
            source_url = %request.source_url,
            "Creating source"
        );

        let response = self
            .send_json(Method::POST, SOURCES_PATH, &[], request)
            .await?;
        let response = expect_status(response, OK_OR_CREATED, "create source")?;
        let source: Source = decode(&response, "source")?;

        info!(name = %source.name, id = %source.id, "Successfully created source");
        Ok(source)
    }

    /// Patch a source; the body always names its application
    pub async fn update_source(
        &self,
        source_id: &str,
        request: &UpdateSourceRequest,
    ) -> Result<Source> {
        info!(id = source_id, "Updating source");

        let path = format!("{SOURCES_PATH}/{source_id}");
        let response = self.send_json(Method::PATCH, &path, &[], request).await?;
        let response = expect_status(response, OK, "update source")?;
        decode(&response, "source")
    }

    /// Delete a source of an application
    pub async fn delete_source(&self, app_id: &str, source_id: &str) -> Result<()> {
        info!(id = source_id, "Deleting source");

        let path = format!("{SOURCES_PATH}/{source_id}");
        let response = self
            .send(Method::DELETE, &path, &[("appId", app_id)], RequestBody::Empty)
            .await?;
        expect_status(response, OK_OR_NO_CONTENT, "delete source")?;
        Ok(())
    }

    /// Return the source with the requested name, creating it if absent
    ///
    /// An existing source is returned as-is; its other fields are not
    /// reconciled against the request.
    pub async fn find_or_create_source(&self, request: &CreateSourceRequest) -> Result<Source> {
        if let Some(source) = self
            .find_source_by_name(&request.app_id, &request.name)
            .await?
        {
            return Ok(source);
        }

        info!(name = %request.name, "Source not found, creating new source");
        self.create_source(request).await
    }
}
