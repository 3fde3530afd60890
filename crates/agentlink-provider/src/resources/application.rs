use std::sync::Arc;

use agentlink_client::{
    AgentLinkClient, Application, ClientError, CreateApplicationRequest, UpdateApplicationRequest,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{non_empty, Resource};
use crate::diagnostics::Diagnostics;
use crate::error::{ProviderError, Result};

/// State of `agentlink_application`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationState {
    pub id: Option<String>,
    pub vendor_id: Option<String>,
    pub name: String,
    pub app_url: String,
    pub login_url: String,
    pub logo_url: String,
    pub access_type: String,
    pub is_default: bool,
    pub is_active: bool,
    #[serde(rename = "type")]
    pub app_type: String,
    pub frontend_stack: String,
    pub description: String,
    pub allow_dcr: bool,
    pub app_host: Option<String>,
}

impl Default for ApplicationState {
    fn default() -> Self {
        Self {
            id: None,
            vendor_id: None,
            name: String::new(),
            app_url: String::new(),
            login_url: String::new(),
            logo_url: String::new(),
            access_type: "FREE_ACCESS".to_string(),
            is_default: false,
            is_active: true,
            app_type: "agent".to_string(),
            frontend_stack: "react".to_string(),
            description: String::new(),
            allow_dcr: false,
            app_host: None,
        }
    }
}

impl From<Application> for ApplicationState {
    fn from(app: Application) -> Self {
        Self {
            id: Some(app.id),
            vendor_id: Some(app.vendor_id),
            name: app.name,
            app_url: app.app_url,
            login_url: app.login_url,
            logo_url: app.logo_url,
            access_type: app.access_type,
            is_default: app.is_default,
            is_active: app.is_active,
            app_type: app.app_type,
            frontend_stack: app.frontend_stack,
            description: app.description,
            allow_dcr: app.allow_dcr,
            app_host: Some(app.app_host.unwrap_or_default()),
        }
    }
}

pub struct ApplicationResource {
    client: Arc<AgentLinkClient>,
}

impl ApplicationResource {
    pub fn new(client: Arc<AgentLinkClient>) -> Self {
        Self { client }
    }

    async fn fetch(&self, id: &str) -> Result<Option<ApplicationState>> {
        let app = self
            .client
            .get_application(id)
            .await
            .map_err(|e| ProviderError::client("read application", e))?;
        Ok(app.map(ApplicationState::from))
    }
}

#[async_trait]
impl Resource for ApplicationResource {
    type State = ApplicationState;

    fn type_name(&self) -> &'static str {
        "agentlink_application"
    }

    async fn create(&self, planned: ApplicationState) -> Result<ApplicationState> {
        let request = CreateApplicationRequest {
            name: planned.name,
            app_url: planned.app_url,
            login_url: planned.login_url,
            logo_url: non_empty(&planned.logo_url),
            access_type: non_empty(&planned.access_type),
            is_default: Some(planned.is_default),
            is_active: Some(planned.is_active),
            app_type: non_empty(&planned.app_type),
            frontend_stack: non_empty(&planned.frontend_stack),
            description: non_empty(&planned.description),
            metadata: None,
            allow_dcr: Some(planned.allow_dcr),
        };

        let app = self
            .client
            .create_application(&request)
            .await
            .map_err(|e| ProviderError::client("create application", e))?;
        Ok(app.into())
    }

    async fn read(&self, current: ApplicationState) -> Result<Option<ApplicationState>> {
        match current.id.as_deref() {
            Some(id) => self.fetch(id).await,
            None => Ok(None),
        }
    }

    async fn update(
        &self,
        prior: ApplicationState,
        planned: ApplicationState,
    ) -> Result<ApplicationState> {
        let id = prior.id.or(planned.id).unwrap_or_default();
        let request = UpdateApplicationRequest {
            name: non_empty(&planned.name),
            app_url: non_empty(&planned.app_url),
            login_url: non_empty(&planned.login_url),
            logo_url: non_empty(&planned.logo_url),
            access_type: non_empty(&planned.access_type),
            is_default: Some(planned.is_default),
            is_active: Some(planned.is_active),
            app_type: non_empty(&planned.app_type),
            description: non_empty(&planned.description),
            allow_dcr: Some(planned.allow_dcr),
        };

        self.client
            .update_application(&id, &request)
            .await
            .and_then(|app| app.ok_or(ClientError::MissingAfterWrite("application")))
            .map(ApplicationState::from)
            .map_err(|e| ProviderError::client("update application", e))
    }

    async fn delete(&self, current: ApplicationState) -> Result<Diagnostics> {
        let id = current.id.unwrap_or_default();
        self.client
            .delete_application(&id)
            .await
            .map_err(|e| ProviderError::client("delete application", e))?;
        Ok(Diagnostics::new())
    }

    async fn import(&self, id: &str) -> Result<Option<ApplicationState>> {
        self.fetch(id).await
    }
}
