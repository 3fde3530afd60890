use agentlink_http::{Method, MultipartPayload, RequestBody};
use serde::Deserialize;
use tracing::{info, warn};

use super::INTERNAL_TOOLS_PATH;
use crate::client::{decode, expect_status, AgentLinkClient, OK, OK_OR_CREATED, OK_OR_NO_CONTENT};
use crate::error::{ClientError, Result};
use crate::models::{InternalTool, SchemaKind, SourceType, UpsertToolsRequest};

#[derive(Debug, Deserialize)]
struct ToolPage {
    #[serde(default)]
    items: Vec<InternalTool>,
}

impl AgentLinkClient {
    /// Upload a schema file and return the tools the server derived from it
    ///
    /// The body is `multipart/form-data` with an `appId` text field and the
    /// file under a field named after the schema kind.
    pub async fn import_schema(
        &self,
        kind: SchemaKind,
        app_id: &str,
        content: Vec<u8>,
        filename: &str,
    ) -> Result<Vec<InternalTool>> {
        info!(app_id, filename, schema_type = %kind, "Importing schema");

        let path = format!("{INTERNAL_TOOLS_PATH}/{kind}/import");
        let payload = MultipartPayload::new()
            .text("appId", app_id)
            .file(kind.as_str(), filename, content);

        let response = self
            .send(Method::POST, &path, &[], RequestBody::Multipart(payload))
            .await?;
        let response = expect_status(response, OK_OR_CREATED, "import schema")?;
        let tools: Vec<InternalTool> = decode(&response, "import")?;

        info!(tools_count = tools.len(), "Successfully imported schema");
        Ok(tools)
    }

    /// Upload an OpenAPI document as multipart form data
    pub async fn import_openapi_schema(
        &self,
        app_id: &str,
        content: Vec<u8>,
        filename: &str,
    ) -> Result<Vec<InternalTool>> {
        self.import_schema(SchemaKind::OpenApi, app_id, content, filename)
            .await
    }

    /// Upload a GraphQL SDL document as multipart form data
    pub async fn import_graphql_schema(
        &self,
        app_id: &str,
        content: Vec<u8>,
        filename: &str,
    ) -> Result<Vec<InternalTool>> {
        self.import_schema(SchemaKind::Graphql, app_id, content, filename)
            .await
    }

    /// Create or update tools in bulk
    pub async fn upsert_tools(&self, request: &UpsertToolsRequest) -> Result<Vec<InternalTool>> {
        info!(
            app_id = %request.app_id,
            tool_type = ?request.tool_type,
            tools_count = request.tools.len(),
            "Upserting tools"
        );

        let path = format!("{INTERNAL_TOOLS_PATH}/upsert");
        let response = self.send_json(Method::POST, &path, &[], request).await?;
        let response = expect_status(response, OK, "upsert tools")?;
        let tools: Vec<InternalTool> = decode(&response, "upsert")?;

        info!(tools_count = tools.len(), "Successfully upserted tools");
        Ok(tools)
    }

    /// Tools generated from one source
    pub async fn list_tools_by_source(
        &self,
        app_id: &str,
        source_id: &str,
    ) -> Result<Vec<InternalTool>> {
        let response = self
            .send(
                Method::GET,
                INTERNAL_TOOLS_PATH,
                &[("appId", app_id), ("sourceId", source_id)],
                RequestBody::Empty,
            )
            .await?;
        let response = expect_status(response, OK, "get tools")?;
        let page: ToolPage = decode(&response, "tools")?;
        Ok(page.items)
    }

    /// Delete one tool
    pub async fn delete_tool(&self, app_id: &str, tool_id: &str) -> Result<()> {
        let path = format!("{INTERNAL_TOOLS_PATH}/{tool_id}");
        let response = self
            .send(Method::DELETE, &path, &[("appId", app_id)], RequestBody::Empty)
            .await?;
        expect_status(response, OK_OR_NO_CONTENT, "delete tool")?;
        Ok(())
    }

    /// Delete every tool registered under a source
    ///
    /// Listing failures are returned. A tool that fails to delete is logged
    /// and skipped so the rest are still attempted.
    pub async fn delete_tools_by_source(&self, app_id: &str, source_id: &str) -> Result<()> {
        info!(app_id, source_id, "Deleting tools by source");

        for tool in self.list_tools_by_source(app_id, source_id).await? {
            let Some(tool_id) = tool.id.as_deref() else {
                continue;
            };
            if let Err(err) = self.delete_tool(app_id, tool_id).await {
                warn!(tool_id, error = %err, "Failed to delete tool");
            }
        }

        Ok(())
    }

    /// Import a schema for a source and register the resulting tools under it
    ///
    /// REST sources take OpenAPI documents and GRAPHQL sources take GraphQL
    /// SDL; any other source type is rejected before a request is made.
    /// Returns the imported tools, which is empty when the schema defined none.
    pub async fn import_and_upsert_schema(
        &self,
        app_id: &str,
        source_id: &str,
        source_type: SourceType,
        content: Vec<u8>,
        filename: &str,
    ) -> Result<Vec<InternalTool>> {
        let kind = SchemaKind::for_source(source_type)
            .ok_or_else(|| ClientError::UnsupportedSchemaSource(source_type.to_string()))?;

        let mut tools = self.import_schema(kind, app_id, content, filename).await?;
        if tools.is_empty() {
            info!("No tools found in schema, skipping upsert");
            return Ok(tools);
        }

        for tool in &mut tools {
            tool.source_id = Some(source_id.to_string());
        }

        self.upsert_tools(&UpsertToolsRequest {
            app_id: app_id.to_string(),
            tool_type: Some(source_type),
            tools: tools.clone(),
        })
        .await?;

        Ok(tools)
    }
}
