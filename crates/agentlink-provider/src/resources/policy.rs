//! State pieces shared by the policy resources

use std::collections::BTreeMap;

use agentlink_client::{
    JsonObject, Policy, PolicyCondition, PolicyConditions, PolicyOutcome, PolicyResult,
    PolicyTargeting,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Attributes every policy kind carries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyFields {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub enabled: bool,
    pub app_ids: Vec<String>,
    pub tenant_id: Option<String>,
    pub internal_tool_ids: Vec<String>,
}

impl PolicyFields {
    /// Overwrite with what the server reports
    pub(crate) fn refresh(&mut self, policy: &Policy) {
        self.id = Some(policy.id.clone());
        self.name = policy.name.clone();
        self.description = Some(policy.description.clone());
        self.enabled = policy.enabled;
        self.app_ids = policy.app_ids.clone();
        if let Some(tenant_id) = policy.tenant_id.as_deref().filter(|t| !t.is_empty()) {
            self.tenant_id = Some(tenant_id.to_string());
        }
        self.internal_tool_ids = policy.internal_tool_ids.clone();
    }

    pub(crate) fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    pub(crate) fn description(&self) -> Option<String> {
        self.description.clone().filter(|d| !d.is_empty())
    }

    pub(crate) fn tenant_id(&self) -> Option<String> {
        self.tenant_id.clone().filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionState {
    pub attribute: String,
    #[serde(default)]
    pub negate: bool,
    pub op: String,
    #[serde(default)]
    pub value: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionsState {
    #[serde(default)]
    pub conditions: Vec<ConditionState>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutcomeState {
    pub result: PolicyResult,
    #[serde(default)]
    pub approval_flow_id: Option<String>,
}

/// `targeting { if { conditions = [...] } then { result = ... } }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetingState {
    #[serde(rename = "if")]
    pub when: ConditionsState,
    pub then: OutcomeState,
}

impl From<&TargetingState> for PolicyTargeting {
    fn from(state: &TargetingState) -> Self {
        PolicyTargeting {
            when: PolicyConditions {
                conditions: state
                    .when
                    .conditions
                    .iter()
                    .map(|c| PolicyCondition {
                        attribute: c.attribute.clone(),
                        negate: c.negate,
                        op: c.op.clone(),
                        value: string_map_to_json(&c.value),
                    })
                    .collect(),
            },
            then: PolicyOutcome {
                result: state.then.result,
                approval_flow_id: state
                    .then
                    .approval_flow_id
                    .clone()
                    .filter(|id| !id.is_empty()),
            },
        }
    }
}

impl From<PolicyTargeting> for TargetingState {
    fn from(targeting: PolicyTargeting) -> Self {
        TargetingState {
            when: ConditionsState {
                conditions: targeting
                    .when
                    .conditions
                    .into_iter()
                    .map(|c| ConditionState {
                        attribute: c.attribute,
                        negate: c.negate,
                        op: c.op,
                        value: json_to_string_map(&c.value),
                    })
                    .collect(),
            },
            then: OutcomeState {
                result: targeting.then.result,
                approval_flow_id: targeting.then.approval_flow_id,
            },
        }
    }
}

pub(crate) fn string_map_to_json(map: &BTreeMap<String, String>) -> JsonObject {
    map.iter()
        .map(|(k, v)| (k.clone(), Value::String(v.clone())))
        .collect()
}

/// Non-string values are kept as their JSON text
pub(crate) fn json_to_string_map(object: &JsonObject) -> BTreeMap<String, String> {
    object
        .iter()
        .map(|(k, v)| {
            let text = match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k.clone(), text)
        })
        .collect()
}
