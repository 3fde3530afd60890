//! Read-only data sources

use serde::{Deserialize, Serialize};

use crate::provider::ApplicationRef;

/// State of `agentlink_application`; both fields are null when the provider
/// has no `application_name`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDataSourceState {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Exposes the application resolved while configuring the provider
#[derive(Debug, Clone)]
pub struct ApplicationDataSource {
    application: Option<ApplicationRef>,
}

impl ApplicationDataSource {
    pub const TYPE_NAME: &'static str = "agentlink_application";

    pub fn new(application: Option<ApplicationRef>) -> Self {
        Self { application }
    }

    pub fn read(&self) -> ApplicationDataSourceState {
        match &self.application {
            Some(app) => ApplicationDataSourceState {
                id: Some(app.id.clone()),
                name: Some(app.name.clone()),
            },
            None => ApplicationDataSourceState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_application_reads_null() {
        let state = ApplicationDataSource::new(None).read();
        assert_eq!(
            serde_json::to_value(state).unwrap(),
            serde_json::json!({"id": null, "name": null})
        );
    }

    #[test]
    fn test_configured_application() {
        let state = ApplicationDataSource::new(Some(ApplicationRef {
            id: "app-1".to_string(),
            name: "Orders".to_string(),
        }))
        .read();
        assert_eq!(state.id.as_deref(), Some("app-1"));
        assert_eq!(state.name.as_deref(), Some("Orders"));
    }
}
