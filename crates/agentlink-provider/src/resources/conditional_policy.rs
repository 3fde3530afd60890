use std::collections::BTreeMap;
use std::sync::Arc;

use agentlink_client::{
    AgentLinkClient, CreateConditionalPolicyRequest, Policy, PolicyTargeting,
    UpdateConditionalPolicyRequest,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::policy::{json_to_string_map, string_map_to_json, PolicyFields, TargetingState};
use super::Resource;
use crate::diagnostics::Diagnostics;
use crate::error::{ProviderError, Result};

/// State of `agentlink_conditional_policy`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionalPolicyState {
    #[serde(flatten)]
    pub policy: PolicyFields,
    pub targeting: Option<TargetingState>,
    pub metadata: Option<BTreeMap<String, String>>,
}

impl ConditionalPolicyState {
    fn refresh(&mut self, policy: Policy) {
        self.policy.refresh(&policy);
        if let Some(targeting) = policy.targeting {
            self.targeting = Some(targeting.into());
        }
        if let Some(metadata) = policy.metadata {
            self.metadata = Some(json_to_string_map(&metadata));
        }
    }
}

/// Allows, denies or gates tool calls behind an approval flow when the
/// targeting conditions match
pub struct ConditionalPolicyResource {
    client: Arc<AgentLinkClient>,
}

impl ConditionalPolicyResource {
    pub fn new(client: Arc<AgentLinkClient>) -> Self {
        Self { client }
    }

    async fn fetch(&self, id: &str) -> Result<Option<Policy>> {
        self.client
            .get_conditional_policy(id)
            .await
            .map_err(|e| ProviderError::client("read conditional policy", e))
    }
}

#[async_trait]
impl Resource for ConditionalPolicyResource {
    type State = ConditionalPolicyState;

    fn type_name(&self) -> &'static str {
        "agentlink_conditional_policy"
    }

    async fn create(&self, mut planned: ConditionalPolicyState) -> Result<ConditionalPolicyState> {
        let request = CreateConditionalPolicyRequest {
            name: planned.policy.name.clone(),
            description: planned.policy.description(),
            enabled: planned.policy.enabled,
            app_ids: planned.policy.app_ids.clone(),
            tenant_id: planned.policy.tenant_id(),
            internal_tool_ids: planned.policy.internal_tool_ids.clone(),
            targeting: planned.targeting.as_ref().map(PolicyTargeting::from),
            metadata: planned.metadata.as_ref().map(string_map_to_json),
        };

        let policy = self
            .client
            .create_conditional_policy(&request)
            .await
            .map_err(|e| ProviderError::client("create conditional policy", e))?;

        planned.policy.id = Some(policy.id);
        Ok(planned)
    }

    async fn read(&self, mut current: ConditionalPolicyState) -> Result<Option<ConditionalPolicyState>> {
        let Some(policy) = self.fetch(current.policy.id()).await? else {
            return Ok(None);
        };
        current.refresh(policy);
        Ok(Some(current))
    }

    async fn update(
        &self,
        prior: ConditionalPolicyState,
        mut planned: ConditionalPolicyState,
    ) -> Result<ConditionalPolicyState> {
        let id = prior.policy.id.or(planned.policy.id.take()).unwrap_or_default();
        let request = UpdateConditionalPolicyRequest {
            name: Some(planned.policy.name.clone()),
            description: planned.policy.description(),
            enabled: Some(planned.policy.enabled),
            app_ids: planned.policy.app_ids.clone(),
            tenant_id: planned.policy.tenant_id(),
            internal_tool_ids: planned.policy.internal_tool_ids.clone(),
            targeting: planned.targeting.as_ref().map(PolicyTargeting::from),
            metadata: planned.metadata.as_ref().map(string_map_to_json),
        };

        self.client
            .update_conditional_policy(&id, &request)
            .await
            .map_err(|e| ProviderError::client("update conditional policy", e))?;

        planned.policy.id = Some(id);
        Ok(planned)
    }

    async fn delete(&self, current: ConditionalPolicyState) -> Result<Diagnostics> {
        self.client
            .delete_policy(current.policy.id())
            .await
            .map_err(|e| ProviderError::client("delete conditional policy", e))?;
        Ok(Diagnostics::new())
    }

    async fn import(&self, id: &str) -> Result<Option<ConditionalPolicyState>> {
        Ok(self.fetch(id).await?.map(|policy| {
            let mut state = ConditionalPolicyState::default();
            state.refresh(policy);
            state
        }))
    }
}
