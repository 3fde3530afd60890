//! DTOs mirroring the Frontegg REST payloads

pub mod application;
pub mod mcp;
pub mod policy;
pub mod source;
pub mod tool;
pub mod vendor;

pub use application::{Application, CreateApplicationRequest, UpdateApplicationRequest};
pub use mcp::{McpConfiguration, McpConfigurationRequest};
pub use policy::{
    CreateConditionalPolicyRequest, CreateMaskingPolicyRequest, CreateRbacPolicyRequest,
    MaskingPolicyConfiguration, Policy, PolicyCondition, PolicyConditions, PolicyKind,
    PolicyOutcome, PolicyResult, PolicyTargeting, RbacPolicyType,
    UpdateConditionalPolicyRequest, UpdateMaskingPolicyRequest, UpdateRbacPolicyRequest,
};
pub use source::{CreateSourceRequest, Source, SourceType, UpdateSourceRequest};
pub use tool::{InternalTool, SchemaKind, UpsertToolsRequest};
pub use vendor::{
    IdentityConfiguration, UpdateAllowedOriginsRequest, UpdateIdentityConfigurationRequest,
    VendorConfig,
};

/// JSON object used for free-form `metadata` and condition values
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}
