//! Endpoint wrappers, one module per API family
//!
//! Each module adds an `impl AgentLinkClient` block.

pub mod applications;
pub mod identity;
pub mod mcp;
pub mod policies;
pub mod sources;
pub mod tools;
pub mod vendor;

pub(crate) const APPLICATIONS_PATH: &str = "/applications/resources/applications/v1";
pub(crate) const SOURCES_PATH: &str = "/app-integrations/resources/app-mcp-configuration-sources/v1";
pub(crate) const MCP_CONFIGURATIONS_PATH: &str = "/app-integrations/resources/app-mcp-configurations/v1";
pub(crate) const INTERNAL_TOOLS_PATH: &str = "/app-integrations/resources/internal-tools/v1";
pub(crate) const POLICIES_PATH: &str = "/app-integrations/resources/policies/v1";
pub(crate) const VENDORS_PATH: &str = "/vendors";
pub(crate) const IDENTITY_CONFIGURATION_PATH: &str = "/identity/resources/configurations/v1";
