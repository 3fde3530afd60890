use agentlink_http::{Method, RequestBody, StatusCode};
use tracing::info;

use super::APPLICATIONS_PATH;
use crate::client::{decode, expect_status, AgentLinkClient, OK, OK_OR_CREATED, OK_OR_NO_CONTENT};
use crate::error::Result;
use crate::models::{Application, CreateApplicationRequest, UpdateApplicationRequest};

impl AgentLinkClient {
    /// List every application of the vendor
    pub async fn list_applications(&self) -> Result<Vec<Application>> {
        info!("Fetching applications from Frontegg API");

        let response = self
            .send(Method::GET, APPLICATIONS_PATH, &[], RequestBody::Empty)
            .await?;
        let response = expect_status(response, OK, "get applications")?;
        let applications: Vec<Application> = decode(&response, "applications")?;

        let names: Vec<&str> = applications.iter().map(|a| a.name.as_str()).collect();
        info!(count = applications.len(), names = ?names, "Successfully fetched applications");

        Ok(applications)
    }

    /// Exact-name lookup over the application list
    pub async fn find_application_by_name(&self, name: &str) -> Result<Option<Application>> {
        let found = self
            .list_applications()
            .await?
            .into_iter()
            .find(|app| app.name == name);

        match &found {
            Some(app) => info!(name, id = %app.id, "Found application by name"),
            None => info!(name, "Application not found by name"),
        }
        Ok(found)
    }

    /// Fetch one application; `None` when the server answers 404
    pub async fn get_application(&self, id: &str) -> Result<Option<Application>> {
        info!(id, "Fetching application by ID");

        let path = format!("{APPLICATIONS_PATH}/{id}");
        let response = self
            .send(Method::GET, &path, &[], RequestBody::Empty)
            .await?;
        if response.status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = expect_status(response, OK, "get application")?;
        decode(&response, "application").map(Some)
    }

    /// Create an application
    pub async fn create_application(
        &self,
        request: &CreateApplicationRequest,
    ) -> Result<Application> {
        info!(name = %request.name, "Creating application");

        let response = self
            .send_json(Method::POST, APPLICATIONS_PATH, &[], request)
            .await?;
        let response = expect_status(response, &[StatusCode::CREATED], "create application")?;
        let application: Application = decode(&response, "application")?;

        info!(name = %application.name, id = %application.id, "Successfully created application");
        Ok(application)
    }

    /// PATCH the application, then read it back
    pub async fn update_application(
        &self,
        id: &str,
        request: &UpdateApplicationRequest,
    ) -> Result<Option<Application>> {
        info!(id, "Updating application");

        let path = format!("{APPLICATIONS_PATH}/{id}");
        let response = self.send_json(Method::PATCH, &path, &[], request).await?;
        expect_status(response, OK_OR_CREATED, "update application")?;

        self.get_application(id).await
    }

    /// Delete an application by id
    pub async fn delete_application(&self, id: &str) -> Result<()> {
        info!(id, "Deleting application");

        let path = format!("{APPLICATIONS_PATH}/{id}");
        let response = self
            .send(Method::DELETE, &path, &[], RequestBody::Empty)
            .await?;
        expect_status(response, OK_OR_NO_CONTENT, "delete application")?;
        Ok(())
    }

    /// Return the application named `name`, creating a `web` application if none exists
    pub async fn find_or_create_application(
        &self,
        name: &str,
        app_url: &str,
        login_url: &str,
    ) -> Result<Application> {
        if let Some(app) = self.find_application_by_name(name).await? {
            return Ok(app);
        }

        info!(name, "Application not found, creating new application");
        self.create_application(&CreateApplicationRequest {
            name: name.to_string(),
            app_url: app_url.to_string(),
            login_url: login_url.to_string(),
            app_type: Some("web".to_string()),
            ..Default::default()
        })
        .await
    }
}
