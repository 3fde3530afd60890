use std::sync::Arc;

use agentlink_client::{
    AgentLinkClient, CreateRbacPolicyRequest, Policy, RbacPolicyType, UpdateRbacPolicyRequest,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::policy::PolicyFields;
use super::Resource;
use crate::diagnostics::Diagnostics;
use crate::error::{ProviderError, Result};

/// State of `agentlink_rbac_policy`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RbacPolicyState {
    #[serde(flatten)]
    pub policy: PolicyFields,
    #[serde(rename = "type")]
    pub policy_type: RbacPolicyType,
    pub keys: Vec<String>,
}

impl RbacPolicyState {
    fn refresh(&mut self, policy: Policy) {
        self.policy.refresh(&policy);
        if let Ok(policy_type) = policy.policy_type.parse::<RbacPolicyType>() {
            self.policy_type = policy_type;
        }
        self.keys = policy.keys;
    }

    fn validate(&self) -> Result<()> {
        if self.policy.internal_tool_ids.is_empty() {
            return Err(ProviderError::validation(
                "Validation Error",
                "At least one internal_tool_id is required for RBAC policies",
            ));
        }
        Ok(())
    }
}

/// Restricts tools to callers holding the listed roles or permissions
pub struct RbacPolicyResource {
    client: Arc<AgentLinkClient>,
}

impl RbacPolicyResource {
    pub fn new(client: Arc<AgentLinkClient>) -> Self {
        Self { client }
    }

    async fn fetch(&self, id: &str) -> Result<Option<Policy>> {
        self.client
            .get_rbac_policy(id)
            .await
            .map_err(|e| ProviderError::client("read RBAC policy", e))
    }
}

#[async_trait]
impl Resource for RbacPolicyResource {
    type State = RbacPolicyState;

    fn type_name(&self) -> &'static str {
        "agentlink_rbac_policy"
    }

    async fn create(&self, mut planned: RbacPolicyState) -> Result<RbacPolicyState> {
        planned.validate()?;

        let request = CreateRbacPolicyRequest {
            name: planned.policy.name.clone(),
            description: planned.policy.description(),
            enabled: planned.policy.enabled,
            app_ids: planned.policy.app_ids.clone(),
            tenant_id: planned.policy.tenant_id(),
            internal_tool_ids: planned.policy.internal_tool_ids.clone(),
            policy_type: planned.policy_type,
            keys: planned.keys.clone(),
        };

        let policy = self
            .client
            .create_rbac_policy(&request)
            .await
            .map_err(|e| ProviderError::client("create RBAC policy", e))?;

        planned.policy.id = Some(policy.id);
        Ok(planned)
    }

    async fn read(&self, mut current: RbacPolicyState) -> Result<Option<RbacPolicyState>> {
        let Some(policy) = self.fetch(current.policy.id()).await? else {
            return Ok(None);
        };
        current.refresh(policy);
        Ok(Some(current))
    }

    async fn update(
        &self,
        prior: RbacPolicyState,
        mut planned: RbacPolicyState,
    ) -> Result<RbacPolicyState> {
        planned.validate()?;

        let id = prior.policy.id.or(planned.policy.id.take()).unwrap_or_default();
        let request = UpdateRbacPolicyRequest {
            name: Some(planned.policy.name.clone()),
            description: planned.policy.description(),
            enabled: Some(planned.policy.enabled),
            app_ids: planned.policy.app_ids.clone(),
            tenant_id: planned.policy.tenant_id(),
            internal_tool_ids: planned.policy.internal_tool_ids.clone(),
            keys: planned.keys.clone(),
        };

        self.client
            .update_rbac_policy(&id, &request)
            .await
            .map_err(|e| ProviderError::client("update RBAC policy", e))?;

        planned.policy.id = Some(id);
        Ok(planned)
    }

    async fn delete(&self, current: RbacPolicyState) -> Result<Diagnostics> {
        self.client
            .delete_policy(current.policy.id())
            .await
            .map_err(|e| ProviderError::client("delete RBAC policy", e))?;
        Ok(Diagnostics::new())
    }

    async fn import(&self, id: &str) -> Result<Option<RbacPolicyState>> {
        Ok(self.fetch(id).await?.map(|policy| {
            let mut state = RbacPolicyState::default();
            state.refresh(policy);
            state
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_requires_tool_ids() {
        let client = Arc::new(AgentLinkClient::new("http://127.0.0.1:9", "id", "secret").unwrap());
        let resource = RbacPolicyResource::new(client);

        let err = resource
            .create(RbacPolicyState {
                policy: PolicyFields {
                    name: "admins-only".to_string(),
                    enabled: true,
                    ..Default::default()
                },
                policy_type: RbacPolicyType::RbacRoles,
                keys: vec!["admin".to_string()],
            })
            .await
            .unwrap_err();

        let diag = err.to_diagnostic();
        assert_eq!(diag.summary, "Validation Error");
        assert_eq!(
            diag.detail,
            "At least one internal_tool_id is required for RBAC policies"
        );
    }

    #[test]
    fn test_refresh_parses_type() {
        let mut state = RbacPolicyState::default();
        state.refresh(Policy {
            id: "pol-1".to_string(),
            policy_type: "RBAC_PERMISSIONS".to_string(),
            keys: vec!["orders.read".to_string()],
            ..Default::default()
        });
        assert_eq!(state.policy_type, RbacPolicyType::RbacPermissions);
        assert_eq!(state.keys, vec!["orders.read"]);
    }
}
