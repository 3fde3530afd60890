use std::sync::Arc;

use agentlink_client::AgentLinkClient;
use agentlink_provider::{ApplicationRef, ProviderData, ProviderRegistry, Severity};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const APPLICATIONS: &str = "/applications/resources/applications/v1";
const TOOLS: &str = "/app-integrations/resources/internal-tools/v1";
const POLICIES: &str = "/app-integrations/resources/policies/v1";
const MCP_CONFIGURATIONS: &str = "/app-integrations/resources/app-mcp-configurations/v1";

async fn registry(server: &MockServer) -> ProviderRegistry {
    Mock::given(method("POST"))
        .and(path("/auth/vendor"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"token": "tok", "expiresIn": 3600})),
        )
        .mount(server)
        .await;

    let client = AgentLinkClient::new(server.uri(), "client-id", "s3cret").unwrap();
    ProviderRegistry::new(Arc::new(ProviderData::new(Arc::new(client))))
}

#[tokio::test]
async fn test_all_resource_types_registered() {
    let server = MockServer::start().await;
    let registry = registry(&server).await;

    assert_eq!(
        registry.resource_types(),
        vec![
            "agentlink_allowed_origins",
            "agentlink_application",
            "agentlink_conditional_policy",
            "agentlink_identity_configuration",
            "agentlink_masking_policy",
            "agentlink_mcp_configuration",
            "agentlink_rbac_policy",
            "agentlink_source",
            "agentlink_tools_import",
        ]
    );
    assert_eq!(registry.data_source_types(), vec!["agentlink_application"]);
}

#[tokio::test]
async fn test_unknown_type_is_diagnosed() {
    let server = MockServer::start().await;
    let registry = registry(&server).await;

    let response = registry.create("agentlink_widget", json!({})).await;
    assert!(response.state.is_none());
    assert!(response.diagnostics.has_error());
}

#[tokio::test]
async fn test_application_create_sends_defaults() {
    let server = MockServer::start().await;
    let registry = registry(&server).await;

    Mock::given(method("POST"))
        .and(path(APPLICATIONS))
        .and(body_json(json!({
            "name": "Orders",
            "appURL": "https://orders.example.com",
            "loginURL": "https://orders.example.com/login",
            "accessType": "FREE_ACCESS",
            "isDefault": false,
            "isActive": true,
            "type": "agent",
            "frontendStack": "react",
            "allowDcr": false
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "app-1",
            "vendorId": "vendor-1",
            "name": "Orders",
            "appURL": "https://orders.example.com",
            "loginURL": "https://orders.example.com/login",
            "accessType": "FREE_ACCESS",
            "isActive": true,
            "type": "agent",
            "frontendStack": "react"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = registry
        .create(
            "agentlink_application",
            json!({
                "name": "Orders",
                "app_url": "https://orders.example.com",
                "login_url": "https://orders.example.com/login"
            }),
        )
        .await;

    assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
    let state = response.state.unwrap();
    assert_eq!(state["id"], "app-1");
    assert_eq!(state["vendor_id"], "vendor-1");
    assert_eq!(state["app_host"], "");
}

#[tokio::test]
async fn test_read_of_deleted_application_drops_state() {
    let server = MockServer::start().await;
    let registry = registry(&server).await;

    Mock::given(method("GET"))
        .and(path(format!("{APPLICATIONS}/app-gone")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let response = registry
        .read("agentlink_application", json!({"id": "app-gone", "name": "Gone"}))
        .await;

    assert!(response.state.is_none());
    assert!(response.diagnostics.is_empty());
}

#[tokio::test]
async fn test_api_failure_becomes_client_error() {
    let server = MockServer::start().await;
    let registry = registry(&server).await;

    Mock::given(method("GET"))
        .and(path(format!("{APPLICATIONS}/app-1")))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let response = registry
        .read("agentlink_application", json!({"id": "app-1"}))
        .await;

    let diag = response.diagnostics.iter().next().unwrap();
    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(diag.summary, "Client Error");
    assert!(diag.detail.starts_with("Unable to read application"));
    assert!(diag.detail.contains("boom"));
}

#[tokio::test]
async fn test_source_import_by_composite_id() {
    let server = MockServer::start().await;
    let registry = registry(&server).await;

    Mock::given(method("GET"))
        .and(path("/app-integrations/resources/app-mcp-configuration-sources/v1"))
        .and(query_param("appId", "app-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "src-0", "appId": "app-1", "name": "other", "type": "REST"},
            {"id": "src-1", "appId": "app-1", "name": "orders", "type": "GRAPHQL",
             "sourceUrl": "https://orders.example.com/graphql", "apiTimeout": 1500, "enabled": true}
        ])))
        .mount(&server)
        .await;

    let response = registry.import("agentlink_source", "app-1:src-1").await;
    let state = response.state.unwrap();
    assert_eq!(state["id"], "src-1");
    assert_eq!(state["type"], "GRAPHQL");
    assert_eq!(state["api_timeout"], 1500);

    let response = registry.import("agentlink_source", "src-1").await;
    assert!(response.state.is_none());
    assert_eq!(
        response.diagnostics.iter().next().unwrap().summary,
        "Invalid Import ID"
    );
}

#[tokio::test]
async fn test_mcp_configuration_upsert_then_read() {
    let server = MockServer::start().await;
    let registry = registry(&server).await;

    Mock::given(method("POST"))
        .and(path(MCP_CONFIGURATIONS))
        .and(body_json(json!({
            "appId": "app-1",
            "baseUrl": "https://mcp.example.com",
            "apiTimeout": 5000
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "mcp-1",
            "appId": "app-1",
            "baseUrl": "https://mcp.example.com",
            "apiTimeout": 5000
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(MCP_CONFIGURATIONS))
        .and(query_param("appId", "app-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "mcp-1",
            "appId": "app-1",
            "baseUrl": "https://mcp.example.com/v2",
            "apiTimeout": 8000
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = registry
        .create(
            "agentlink_mcp_configuration",
            json!({"application_id": "app-1", "base_url": "https://mcp.example.com"}),
        )
        .await;
    assert!(created.diagnostics.is_empty(), "{:?}", created.diagnostics);
    let state = created.state.unwrap();
    assert_eq!(state["id"], "mcp-1");
    assert_eq!(state["api_timeout"], 5000);

    let read = registry.read("agentlink_mcp_configuration", state).await;
    let state = read.state.unwrap();
    assert_eq!(state["id"], "mcp-1");
    assert_eq!(state["base_url"], "https://mcp.example.com/v2");
    assert_eq!(state["api_timeout"], 8000);
}

#[tokio::test]
async fn test_mcp_delete_makes_no_request() {
    let server = MockServer::start().await;
    let registry = registry(&server).await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let response = registry
        .delete(
            "agentlink_mcp_configuration",
            json!({"id": "mcp-1", "application_id": "app-1", "base_url": "https://mcp.example.com"}),
        )
        .await;
    assert!(response.state.is_none());
    assert!(response.diagnostics.is_empty());
}

#[tokio::test]
async fn test_tools_import_delete_failure_is_warning() {
    let server = MockServer::start().await;
    let registry = registry(&server).await;

    Mock::given(method("GET"))
        .and(path(TOOLS))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let response = registry
        .delete(
            "agentlink_tools_import",
            json!({
                "id": "app-1:src-1",
                "application_id": "app-1",
                "source_id": "src-1",
                "schema_file": "/schemas/openapi.json",
                "schema_type": "openapi"
            }),
        )
        .await;

    assert!(response.state.is_none());
    assert!(!response.diagnostics.has_error());
    let warning = response.diagnostics.warnings().next().unwrap();
    assert_eq!(warning.summary, "Cleanup Warning");
}

#[tokio::test]
async fn test_tools_import_create_records_hash_and_count() {
    let server = MockServer::start().await;
    let registry = registry(&server).await;

    Mock::given(method("POST"))
        .and(path(format!("{TOOLS}/graphql/import")))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            {"name": "orders", "isActive": true},
            {"name": "customers", "isActive": true}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("{TOOLS}/upsert")))
        .and(body_partial_json(json!({"appId": "app-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join("schema.graphql");
    std::fs::write(&schema, "abc").unwrap();

    let response = registry
        .create(
            "agentlink_tools_import",
            json!({
                "application_id": "app-1",
                "source_id": "src-1",
                "schema_file": schema,
                "schema_type": "graphql"
            }),
        )
        .await;

    assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
    let state = response.state.unwrap();
    assert_eq!(state["id"], "app-1:src-1");
    assert_eq!(state["tools_count"], 2);
    assert_eq!(
        state["schema_hash"],
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[tokio::test]
async fn test_rbac_requires_tool_ids() {
    let server = MockServer::start().await;
    let registry = registry(&server).await;

    Mock::given(method("POST"))
        .and(path("/app-integrations/resources/policies/v1/rbac"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let response = registry
        .create(
            "agentlink_rbac_policy",
            json!({"name": "admins only", "type": "RBAC_ROLES", "keys": ["admin"]}),
        )
        .await;

    let diag = response.diagnostics.iter().next().unwrap();
    assert_eq!(diag.summary, "Validation Error");
    assert_eq!(
        diag.detail,
        "At least one internal_tool_id is required for RBAC policies"
    );
}

#[tokio::test]
async fn test_allowed_origins_lifecycle() {
    let server = MockServer::start().await;
    let registry = registry(&server).await;

    Mock::given(method("PUT"))
        .and(path("/vendors"))
        .and(body_json(json!({"allowedOrigins": ["https://app.example.com"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "vendor-1",
            "allowedOrigins": ["https://app.example.com/"]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vendors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "vendor-1",
            "allowedOrigins": ["https://app.example.com/"]
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/vendors"))
        .and(body_json(json!({"allowedOrigins": []})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "vendor-1", "allowedOrigins": []})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let planned = json!({"allowed_origins": ["https://app.example.com"]});
    let created = registry
        .create("agentlink_allowed_origins", planned)
        .await
        .state
        .unwrap();
    assert_eq!(created["id"], "vendor-1");
    assert_eq!(created["allowed_origins"], json!(["https://app.example.com"]));

    let read = registry
        .read("agentlink_allowed_origins", created.clone())
        .await
        .state
        .unwrap();
    assert_eq!(read, created);

    let deleted = registry.delete("agentlink_allowed_origins", read).await;
    assert!(deleted.diagnostics.is_empty());
}

#[tokio::test]
async fn test_application_data_source() {
    let server = MockServer::start().await;
    let client = AgentLinkClient::new(server.uri(), "client-id", "s3cret").unwrap();
    let data = ProviderData::new(Arc::new(client)).with_application(ApplicationRef {
        id: "app-1".to_string(),
        name: "Orders".to_string(),
    });
    let registry = ProviderRegistry::new(Arc::new(data));

    let response = registry.read_data_source("agentlink_application");
    assert_eq!(response.state, Some(json!({"id": "app-1", "name": "Orders"})));
}

#[tokio::test]
async fn test_conditional_policy_lifecycle() {
    let server = MockServer::start().await;
    let registry = registry(&server).await;

    Mock::given(method("POST"))
        .and(path(POLICIES))
        .and(body_partial_json(json!({
            "name": "gate deletes",
            "internalToolIds": ["t1"],
            "targeting": {"then": {"result": "APPROVAL_REQUIRED", "approvalFlowId": "flow-1"}},
            "metadata": {"owner": "platform"}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "pol-1"})))
        .expect(1)
        .mount(&server)
        .await;
    // Read back after the write; the server fills in its own description
    Mock::given(method("GET"))
        .and(path(format!("{POLICIES}/pol-1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "pol-1",
            "name": "gate deletes",
            "description": "server default",
            "enabled": true,
            "internalToolIds": ["t1"]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("{POLICIES}/pol-1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "pol-1",
            "name": "gate deletes",
            "description": "",
            "enabled": true,
            "internalToolIds": ["t1"],
            "targeting": {
                "if": {"conditions": [{
                    "attribute": "tool.name",
                    "negate": false,
                    "op": "in_list",
                    "value": {"list": "delete"}
                }]},
                "then": {"result": "DENY"}
            },
            "metadata": {"owner": "security", "tier": 2}
        })))
        .mount(&server)
        .await;

    let created = registry
        .create(
            "agentlink_conditional_policy",
            json!({
                "name": "gate deletes",
                "enabled": true,
                "internal_tool_ids": ["t1"],
                "targeting": {
                    "if": {"conditions": [{
                        "attribute": "tool.name",
                        "op": "equals",
                        "value": {"value": "delete_order"}
                    }]},
                    "then": {"result": "APPROVAL_REQUIRED", "approval_flow_id": "flow-1"}
                },
                "metadata": {"owner": "platform"}
            }),
        )
        .await;

    assert!(created.diagnostics.is_empty(), "{:?}", created.diagnostics);
    let state = created.state.unwrap();
    assert_eq!(state["id"], "pol-1");
    assert!(state["description"].is_null());
    assert_eq!(state["targeting"]["then"]["result"], "APPROVAL_REQUIRED");
    assert_eq!(state["metadata"], json!({"owner": "platform"}));

    let read = registry.read("agentlink_conditional_policy", state).await;
    assert!(read.diagnostics.is_empty(), "{:?}", read.diagnostics);
    let state = read.state.unwrap();
    assert_eq!(state["id"], "pol-1");
    assert_eq!(state["description"], "");
    assert_eq!(
        state["targeting"]["if"]["conditions"][0],
        json!({
            "attribute": "tool.name",
            "negate": false,
            "op": "in_list",
            "value": {"list": "delete"}
        })
    );
    assert_eq!(state["targeting"]["then"]["result"], "DENY");
    assert_eq!(state["metadata"], json!({"owner": "security", "tier": "2"}));
}
