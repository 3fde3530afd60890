use std::sync::Arc;

use agentlink_client::{
    AgentLinkClient, CreateMaskingPolicyRequest, MaskingPolicyConfiguration, Policy,
    UpdateMaskingPolicyRequest,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::policy::PolicyFields;
use super::Resource;
use crate::diagnostics::Diagnostics;
use crate::error::{ProviderError, Result};

/// Detectors whose matches are masked in tool responses; all default off
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskingConfigurationState {
    pub credit_card: bool,
    pub email_address: bool,
    pub phone_number: bool,
    pub ip_address: bool,
    pub us_ssn: bool,
    pub us_driver_license: bool,
    pub us_passport: bool,
    pub us_itin: bool,
    pub us_bank_number: bool,
    pub iban_code: bool,
    pub swift_code: bool,
    pub bitcoin_address: bool,
    pub ethereum_address: bool,
    pub cvv_cvc: bool,
    pub url: bool,
}

impl From<&MaskingConfigurationState> for MaskingPolicyConfiguration {
    fn from(state: &MaskingConfigurationState) -> Self {
        MaskingPolicyConfiguration {
            credit_card: state.credit_card,
            email_address: state.email_address,
            phone_number: state.phone_number,
            ip_address: state.ip_address,
            us_ssn: state.us_ssn,
            us_driver_license: state.us_driver_license,
            us_passport: state.us_passport,
            us_itin: state.us_itin,
            us_bank_number: state.us_bank_number,
            iban_code: state.iban_code,
            swift_code: state.swift_code,
            bitcoin_address: state.bitcoin_address,
            ethereum_address: state.ethereum_address,
            cvv_cvc: state.cvv_cvc,
            url: state.url,
        }
    }
}

impl From<MaskingPolicyConfiguration> for MaskingConfigurationState {
    fn from(config: MaskingPolicyConfiguration) -> Self {
        MaskingConfigurationState {
            credit_card: config.credit_card,
            email_address: config.email_address,
            phone_number: config.phone_number,
            ip_address: config.ip_address,
            us_ssn: config.us_ssn,
            us_driver_license: config.us_driver_license,
            us_passport: config.us_passport,
            us_itin: config.us_itin,
            us_bank_number: config.us_bank_number,
            iban_code: config.iban_code,
            swift_code: config.swift_code,
            bitcoin_address: config.bitcoin_address,
            ethereum_address: config.ethereum_address,
            cvv_cvc: config.cvv_cvc,
            url: config.url,
        }
    }
}

/// State of `agentlink_masking_policy`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskingPolicyState {
    #[serde(flatten)]
    pub policy: PolicyFields,
    pub policy_configuration: MaskingConfigurationState,
}

impl MaskingPolicyState {
    fn refresh(&mut self, policy: Policy) {
        self.policy.refresh(&policy);
        if let Some(config) = policy.policy_configuration {
            self.policy_configuration = config.into();
        }
    }
}

pub struct MaskingPolicyResource {
    client: Arc<AgentLinkClient>,
}

impl MaskingPolicyResource {
    pub fn new(client: Arc<AgentLinkClient>) -> Self {
        Self { client }
    }

    async fn fetch(&self, id: &str) -> Result<Option<Policy>> {
        self.client
            .get_masking_policy(id)
            .await
            .map_err(|e| ProviderError::client("read masking policy", e))
    }
}

#[async_trait]
impl Resource for MaskingPolicyResource {
    type State = MaskingPolicyState;

    fn type_name(&self) -> &'static str {
        "agentlink_masking_policy"
    }

    async fn create(&self, mut planned: MaskingPolicyState) -> Result<MaskingPolicyState> {
        let request = CreateMaskingPolicyRequest {
            name: planned.policy.name.clone(),
            description: planned.policy.description(),
            enabled: planned.policy.enabled,
            app_ids: planned.policy.app_ids.clone(),
            tenant_id: planned.policy.tenant_id(),
            internal_tool_ids: planned.policy.internal_tool_ids.clone(),
            targeting: None,
            policy_configuration: (&planned.policy_configuration).into(),
            metadata: None,
        };

        let policy = self
            .client
            .create_masking_policy(&request)
            .await
            .map_err(|e| ProviderError::client("create masking policy", e))?;

        planned.policy.id = Some(policy.id);
        Ok(planned)
    }

    async fn read(&self, mut current: MaskingPolicyState) -> Result<Option<MaskingPolicyState>> {
        let Some(policy) = self.fetch(current.policy.id()).await? else {
            return Ok(None);
        };
        current.refresh(policy);
        Ok(Some(current))
    }

    async fn update(
        &self,
        prior: MaskingPolicyState,
        mut planned: MaskingPolicyState,
    ) -> Result<MaskingPolicyState> {
        let id = prior.policy.id.or(planned.policy.id.take()).unwrap_or_default();
        let request = UpdateMaskingPolicyRequest {
            name: Some(planned.policy.name.clone()),
            description: planned.policy.description(),
            enabled: Some(planned.policy.enabled),
            app_ids: planned.policy.app_ids.clone(),
            tenant_id: planned.policy.tenant_id(),
            internal_tool_ids: planned.policy.internal_tool_ids.clone(),
            targeting: None,
            policy_configuration: Some((&planned.policy_configuration).into()),
            metadata: None,
        };

        self.client
            .update_masking_policy(&id, &request)
            .await
            .map_err(|e| ProviderError::client("update masking policy", e))?;

        planned.policy.id = Some(id);
        Ok(planned)
    }

    async fn delete(&self, current: MaskingPolicyState) -> Result<Diagnostics> {
        self.client
            .delete_policy(current.policy.id())
            .await
            .map_err(|e| ProviderError::client("delete masking policy", e))?;
        Ok(Diagnostics::new())
    }

    async fn import(&self, id: &str) -> Result<Option<MaskingPolicyState>> {
        Ok(self.fetch(id).await?.map(|policy| {
            let mut state = MaskingPolicyState::default();
            state.refresh(policy);
            state
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_only_enabled_detectors_sent() {
        let state: MaskingConfigurationState =
            serde_json::from_value(json!({"credit_card": true, "us_ssn": true})).unwrap();
        let config = MaskingPolicyConfiguration::from(&state);
        assert_eq!(
            serde_json::to_value(config).unwrap(),
            json!({"creditCard": true, "usSsn": true})
        );
    }
}
