//! Provider bootstrap: settings, authentication, application and sources

use std::path::Path;
use std::sync::Arc;

use agentlink_client::{AgentLinkClient, CreateSourceRequest, Credentials, SourceType};
use agentlink_http::HttpConfig;
use tracing::info;

use crate::config::{ProviderSettings, ResolvedSettings, SettingsLoader, SourceSettings};
use crate::diagnostics::{Diagnostic, Diagnostics};

/// Application and login URL used when the configured application is created
pub const PLACEHOLDER_APP_URL: &str = "https://localhost";

/// Application resolved from `application_name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationRef {
    pub id: String,
    pub name: String,
}

/// Shared by every resource and data source after configuration
pub struct ProviderData {
    pub client: Arc<AgentLinkClient>,
    pub application: Option<ApplicationRef>,
}

impl ProviderData {
    pub fn new(client: Arc<AgentLinkClient>) -> Self {
        Self {
            client,
            application: None,
        }
    }

    pub fn with_application(mut self, application: ApplicationRef) -> Self {
        self.application = Some(application);
        self
    }
}

pub struct ConfigureResponse {
    pub data: Option<Arc<ProviderData>>,
    pub diagnostics: Diagnostics,
}

impl ConfigureResponse {
    fn failed(diagnostics: impl Into<Diagnostics>) -> Self {
        Self {
            data: None,
            diagnostics: diagnostics.into(),
        }
    }
}

/// Frontegg AgentLink provider
#[derive(Debug, Clone, Default)]
pub struct AgentLinkProvider {
    loader: SettingsLoader,
    http: HttpConfig,
}

impl AgentLinkProvider {
    pub const TYPE_NAME: &'static str = "agentlink";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_loader(mut self, loader: SettingsLoader) -> Self {
        self.loader = loader;
        self
    }

    pub fn with_http_config(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Resolve settings, authenticate and reconcile the configured
    /// application and sources
    ///
    /// Stops at the first failing step; nothing is rolled back.
    pub async fn configure(&self, explicit: &ProviderSettings) -> ConfigureResponse {
        let settings = match self.loader.load(explicit) {
            Ok(settings) => settings,
            Err(err) => return ConfigureResponse::failed(err.to_diagnostic()),
        };
        let resolved = match settings.resolve() {
            Ok(resolved) => resolved,
            Err(diags) => return ConfigureResponse::failed(diags),
        };

        match self.bootstrap(&resolved).await {
            Ok(data) => ConfigureResponse {
                data: Some(Arc::new(data)),
                diagnostics: Diagnostics::new(),
            },
            Err(diag) => ConfigureResponse::failed(diag),
        }
    }

    async fn bootstrap(&self, settings: &ResolvedSettings) -> Result<ProviderData, Diagnostic> {
        let client = AgentLinkClient::with_config(
            settings.base_url.as_str(),
            Credentials::new(settings.client_id.as_str(), settings.secret.as_str()),
            self.http.clone(),
        )
        .map_err(|e| Diagnostic::error("Unable to Create Frontegg API Client", e.to_string()))?;

        client.authenticate().await.map_err(|e| {
            Diagnostic::error(
                "Unable to Authenticate with Frontegg API",
                format!(
                    "An unexpected error occurred when authenticating with the Frontegg API. Error: {e}"
                ),
            )
        })?;

        let mut data = ProviderData::new(Arc::new(client));

        if let Some(name) = &settings.application_name {
            let app = data
                .client
                .find_or_create_application(name, PLACEHOLDER_APP_URL, PLACEHOLDER_APP_URL)
                .await
                .map_err(|e| {
                    Diagnostic::error(
                        "Unable to Find or Create Application",
                        format!("Failed to find or create application '{name}': {e}"),
                    )
                })?;
            info!(id = %app.id, name = %app.name, "Using application");
            data = data.with_application(ApplicationRef {
                id: app.id,
                name: app.name,
            });
        }

        if settings.sources.is_empty() {
            return Ok(data);
        }

        let Some(application) = data.application.clone() else {
            return Err(Diagnostic::error(
                "Application Required for Sources",
                "An application_name must be configured to create sources.",
            ));
        };

        for source in &settings.sources {
            reconcile_source(&data.client, &application.id, source).await?;
        }

        Ok(data)
    }
}

async fn reconcile_source(
    client: &AgentLinkClient,
    app_id: &str,
    settings: &SourceSettings,
) -> Result<(), Diagnostic> {
    let source_type: SourceType = settings.source_type.parse().map_err(|e: String| {
        Diagnostic::error("Invalid Source Type", e).with_attribute("sources.type")
    })?;

    let source = client
        .find_or_create_source(&CreateSourceRequest {
            app_id: app_id.to_string(),
            name: settings.name.clone(),
            source_type,
            source_url: settings.source_url.clone(),
            api_timeout: settings.api_timeout,
            enabled: true,
        })
        .await
        .map_err(|e| {
            Diagnostic::error(
                "Unable to Find or Create Source",
                format!("Failed to find or create source '{}': {e}", settings.name),
            )
        })?;

    let Some(schema_file) = settings
        .schema_file
        .as_deref()
        .filter(|path| !path.as_os_str().is_empty())
    else {
        return Ok(());
    };

    if !matches!(source_type, SourceType::Rest | SourceType::Graphql) {
        return Err(Diagnostic::error(
            "Invalid Source Type for Schema Import",
            format!(
                "Schema import is only supported for REST and GRAPHQL sources, got '{source_type}'"
            ),
        ));
    }

    let content = tokio::fs::read(schema_file).await.map_err(|e| {
        Diagnostic::error(
            "Unable to Read Schema File",
            format!("Failed to read schema file '{}': {e}", schema_file.display()),
        )
    })?;

    let tools = client
        .import_and_upsert_schema(
            app_id,
            &source.id,
            source_type,
            content,
            &upload_filename(schema_file),
        )
        .await
        .map_err(|e| {
            Diagnostic::error(
                "Unable to Import Schema",
                format!("Failed to import schema for source '{}': {e}", settings.name),
            )
        })?;

    info!(source = %settings.name, tools_count = tools.len(), "Imported schema for source");
    Ok(())
}

/// Basename of the schema path, sent as the multipart filename
pub(crate) fn upload_filename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
