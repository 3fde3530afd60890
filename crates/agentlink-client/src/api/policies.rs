use agentlink_http::{Method, RequestBody, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::POLICIES_PATH;
use crate::client::{decode, expect_status, AgentLinkClient, OK, OK_OR_CREATED, OK_OR_NO_CONTENT};
use crate::error::{ClientError, Result};
use crate::models::{
    CreateConditionalPolicyRequest, CreateMaskingPolicyRequest, CreateRbacPolicyRequest, Policy,
    PolicyKind, UpdateConditionalPolicyRequest, UpdateMaskingPolicyRequest,
    UpdateRbacPolicyRequest,
};

/// Create endpoints answer with the new id only
#[derive(Debug, Deserialize)]
struct CreatedPolicy {
    id: String,
}

impl PolicyKind {
    fn collection_path(&self) -> String {
        match self {
            PolicyKind::Conditional => POLICIES_PATH.to_string(),
            PolicyKind::Rbac => format!("{POLICIES_PATH}/rbac"),
            PolicyKind::Masking => format!("{POLICIES_PATH}/masking"),
        }
    }

    fn create_operation(&self) -> &'static str {
        match self {
            PolicyKind::Conditional => "create conditional policy",
            PolicyKind::Rbac => "create RBAC policy",
            PolicyKind::Masking => "create masking policy",
        }
    }

    fn get_operation(&self) -> &'static str {
        match self {
            PolicyKind::Conditional => "get conditional policy",
            PolicyKind::Rbac => "get RBAC policy",
            PolicyKind::Masking => "get masking policy",
        }
    }

    fn update_operation(&self) -> &'static str {
        match self {
            PolicyKind::Conditional => "update conditional policy",
            PolicyKind::Rbac => "update RBAC policy",
            PolicyKind::Masking => "update masking policy",
        }
    }
}

impl AgentLinkClient {
    async fn create_policy<T: Serialize>(
        &self,
        kind: PolicyKind,
        name: &str,
        request: &T,
    ) -> Result<Policy> {
        info!(name, kind = kind.label(), "Creating policy");

        let response = self
            .send_json(Method::POST, &kind.collection_path(), &[], request)
            .await?;
        let response = expect_status(response, OK_OR_CREATED, kind.create_operation())?;
        let created: CreatedPolicy = decode(&response, "policy")?;

        self.get_policy(kind, &created.id)
            .await?
            .ok_or(ClientError::MissingAfterWrite("policy"))
    }

    /// Fetch a policy of the given kind; `None` on 404
    pub async fn get_policy(&self, kind: PolicyKind, id: &str) -> Result<Option<Policy>> {
        info!(id, kind = kind.label(), "Fetching policy");

        let path = format!("{}/{id}", kind.collection_path());
        let response = self
            .send(Method::GET, &path, &[], RequestBody::Empty)
            .await?;
        if response.status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = expect_status(response, OK, kind.get_operation())?;
        decode(&response, "policy").map(Some)
    }

    async fn update_policy<T: Serialize>(
        &self,
        kind: PolicyKind,
        id: &str,
        request: &T,
    ) -> Result<Policy> {
        info!(id, kind = kind.label(), "Updating policy");

        let path = format!("{}/{id}", kind.collection_path());
        let response = self.send_json(Method::PATCH, &path, &[], request).await?;
        expect_status(response, OK, kind.update_operation())?;

        self.get_policy(kind, id)
            .await?
            .ok_or(ClientError::MissingAfterWrite("policy"))
    }

    /// Delete a policy of any kind
    pub async fn delete_policy(&self, id: &str) -> Result<()> {
        info!(id, "Deleting policy");

        let path = format!("{POLICIES_PATH}/{id}");
        let response = self
            .send(Method::DELETE, &path, &[], RequestBody::Empty)
            .await?;
        expect_status(response, OK_OR_NO_CONTENT, "delete policy")?;
        Ok(())
    }

    /// Create a conditional policy and read it back
    pub async fn create_conditional_policy(
        &self,
        request: &CreateConditionalPolicyRequest,
    ) -> Result<Policy> {
        self.create_policy(PolicyKind::Conditional, &request.name, request)
            .await
    }

    /// `None` on 404
    pub async fn get_conditional_policy(&self, id: &str) -> Result<Option<Policy>> {
        self.get_policy(PolicyKind::Conditional, id).await
    }

    /// Patch a conditional policy and read it back
    pub async fn update_conditional_policy(
        &self,
        id: &str,
        request: &UpdateConditionalPolicyRequest,
    ) -> Result<Policy> {
        self.update_policy(PolicyKind::Conditional, id, request)
            .await
    }

    /// Create an RBAC policy and read it back
    pub async fn create_rbac_policy(&self, request: &CreateRbacPolicyRequest) -> Result<Policy> {
        self.create_policy(PolicyKind::Rbac, &request.name, request)
            .await
    }

    /// `None` on 404
    pub async fn get_rbac_policy(&self, id: &str) -> Result<Option<Policy>> {
        self.get_policy(PolicyKind::Rbac, id).await
    }

    /// Patch an RBAC policy and read it back
    pub async fn update_rbac_policy(
        &self,
        id: &str,
        request: &UpdateRbacPolicyRequest,
    ) -> Result<Policy> {
        self.update_policy(PolicyKind::Rbac, id, request).await
    }

    /// Create a masking policy and read it back
    pub async fn create_masking_policy(
        &self,
        request: &CreateMaskingPolicyRequest,
    ) -> Result<Policy> {
        self.create_policy(PolicyKind::Masking, &request.name, request)
            .await
    }

    /// `None` on 404
    pub async fn get_masking_policy(&self, id: &str) -> Result<Option<Policy>> {
        self.get_policy(PolicyKind::Masking, id).await
    }

    /// Patch a masking policy and read it back
    pub async fn update_masking_policy(
        &self,
        id: &str,
        request: &UpdateMaskingPolicyRequest,
    ) -> Result<Policy> {
        self.update_policy(PolicyKind::Masking, id, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_paths_per_kind() {
        assert_eq!(
            PolicyKind::Conditional.collection_path(),
            "/app-integrations/resources/policies/v1"
        );
        assert_eq!(
            PolicyKind::Rbac.collection_path(),
            "/app-integrations/resources/policies/v1/rbac"
        );
        assert_eq!(
            PolicyKind::Masking.collection_path(),
            "/app-integrations/resources/policies/v1/masking"
        );
    }
}
