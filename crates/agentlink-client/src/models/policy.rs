use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{is_false, JsonObject};

/// Policy families; each lives under its own path prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    Conditional,
    Rbac,
    Masking,
}

impl PolicyKind {
    /// Human-readable label used in logs and error messages
    pub fn label(&self) -> &'static str {
        match self {
            PolicyKind::Conditional => "conditional policy",
            PolicyKind::Rbac => "RBAC policy",
            PolicyKind::Masking => "masking policy",
        }
    }
}

/// One predicate of a targeting rule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyCondition {
    pub attribute: String,
    #[serde(default)]
    pub negate: bool,
    pub op: String,
    #[serde(default)]
    pub value: JsonObject,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyConditions {
    #[serde(default)]
    pub conditions: Vec<PolicyCondition>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyResult {
    #[default]
    Allow,
    Deny,
    ApprovalRequired,
}

impl PolicyResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyResult::Allow => "ALLOW",
            PolicyResult::Deny => "DENY",
            PolicyResult::ApprovalRequired => "APPROVAL_REQUIRED",
        }
    }
}

impl fmt::Display for PolicyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyOutcome {
    pub result: PolicyResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_flow_id: Option<String>,
}

/// `if` conditions hold `then` the outcome applies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyTargeting {
    #[serde(rename = "if")]
    pub when: PolicyConditions,
    pub then: PolicyOutcome,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RbacPolicyType {
    #[default]
    RbacRoles,
    RbacPermissions,
}

impl RbacPolicyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RbacPolicyType::RbacRoles => "RBAC_ROLES",
            RbacPolicyType::RbacPermissions => "RBAC_PERMISSIONS",
        }
    }
}

impl fmt::Display for RbacPolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RbacPolicyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RBAC_ROLES" => Ok(RbacPolicyType::RbacRoles),
            "RBAC_PERMISSIONS" => Ok(RbacPolicyType::RbacPermissions),
            other => Err(format!(
                "invalid RBAC policy type '{other}', expected RBAC_ROLES or RBAC_PERMISSIONS"
            )),
        }
    }
}

/// Detectors a masking policy turns on; unset detectors are omitted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaskingPolicyConfiguration {
    #[serde(skip_serializing_if = "is_false")]
    pub credit_card: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub email_address: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub phone_number: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub ip_address: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub us_ssn: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub us_driver_license: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub us_passport: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub us_itin: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub us_bank_number: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub iban_code: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub swift_code: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub bitcoin_address: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub ethereum_address: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub cvv_cvc: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub url: bool,
}

/// Policy as returned by any of the policy GET endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Policy {
    pub id: String,
    pub vendor_id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub policy_type: String,
    pub enabled: bool,
    pub app_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    pub internal_tool_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targeting: Option<PolicyTargeting>,
    pub keys: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_configuration: Option<MaskingPolicyConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConditionalPolicyRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub app_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    pub internal_tool_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targeting: Option<PolicyTargeting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonObject>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRbacPolicyRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub app_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    pub internal_tool_ids: Vec<String>,
    #[serde(rename = "type")]
    pub policy_type: RbacPolicyType,
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaskingPolicyRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub app_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    pub internal_tool_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targeting: Option<PolicyTargeting>,
    pub policy_configuration: MaskingPolicyConfiguration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonObject>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConditionalPolicyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub app_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub internal_tool_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targeting: Option<PolicyTargeting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonObject>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRbacPolicyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub app_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub internal_tool_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaskingPolicyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub app_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub internal_tool_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targeting: Option<PolicyTargeting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_configuration: Option<MaskingPolicyConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<JsonObject>,
}
