use agentlink_client::{AgentLinkClient, ClientError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_auth(server: &MockServer, token: &str, expires_in: i64, times: u64) {
    Mock::given(method("POST"))
        .and(path("/auth/vendor"))
        .and(body_json(json!({"clientId": "client-id", "secret": "s3cret"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"token": token, "expiresIn": expires_in})),
        )
        .expect(times)
        .mount(server)
        .await;
}

async fn mount_vendors(server: &MockServer, token: &str) {
    Mock::given(method("GET"))
        .and(path("/vendors"))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "vendor-1",
            "name": "Acme",
            "allowedOrigins": []
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_token_reused_across_requests() {
    let server = MockServer::start().await;
    mount_auth(&server, "tok-1", 3600, 1).await;
    mount_vendors(&server, "tok-1").await;

    let client = AgentLinkClient::new(server.uri(), "client-id", "s3cret").unwrap();
    assert!(!client.has_valid_token().await);

    client.get_vendor_config().await.unwrap();
    client.get_vendor_config().await.unwrap();

    assert!(client.has_valid_token().await);
}

#[tokio::test]
async fn test_extreme_expiry_is_accepted() {
    let server = MockServer::start().await;
    mount_auth(&server, "forever", i64::MAX, 1).await;
    mount_vendors(&server, "forever").await;

    let client = AgentLinkClient::new(server.uri(), "client-id", "s3cret").unwrap();
    client.authenticate().await.unwrap();
    client.get_vendor_config().await.unwrap();

    assert!(client.has_valid_token().await);
}

#[tokio::test]
async fn test_expired_token_triggers_reauthentication() {
    let server = MockServer::start().await;
    // a 60 second lifetime is fully consumed by the expiry buffer
    mount_auth(&server, "short", 60, 2).await;
    mount_vendors(&server, "short").await;

    let client = AgentLinkClient::new(server.uri(), "client-id", "s3cret").unwrap();
    client.get_vendor_config().await.unwrap();
    client.get_vendor_config().await.unwrap();

    assert!(!client.has_valid_token().await);
}

#[tokio::test]
async fn test_authentication_failure_surfaces_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/vendor"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid credentials"))
        .mount(&server)
        .await;

    let client = AgentLinkClient::new(server.uri(), "client-id", "wrong").unwrap();
    let err = client.authenticate().await.unwrap_err();

    match err {
        ClientError::Authentication { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid credentials");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!client.has_valid_token().await);
}

#[tokio::test]
async fn test_authentication_failure_aborts_api_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/vendor"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vendors"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = AgentLinkClient::new(server.uri(), "client-id", "s3cret").unwrap();
    let err = client.get_vendor_config().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_concurrent_callers_share_valid_token() {
    let server = MockServer::start().await;
    mount_auth(&server, "tok-1", 3600, 1).await;
    mount_vendors(&server, "tok-1").await;

    let client = AgentLinkClient::new(server.uri(), "client-id", "s3cret").unwrap();
    client.authenticate().await.unwrap();

    let calls = (0..8).map(|_| client.get_vendor_config());
    let results = futures::future::join_all(calls).await;

    assert!(results.iter().all(|r| r.is_ok()));
}

#[tokio::test]
async fn test_concurrent_callers_without_token_all_succeed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/vendor"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"token": "tok-1", "expiresIn": 3600})),
        )
        .mount(&server)
        .await;
    mount_vendors(&server, "tok-1").await;

    let client = AgentLinkClient::new(server.uri(), "client-id", "s3cret").unwrap();
    let calls = (0..4).map(|_| client.access_token());
    let tokens = futures::future::join_all(calls).await;

    for token in tokens {
        assert_eq!(token.unwrap(), "tok-1");
    }
}
