//! Router tests for the stateless HTTP transport.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{any, header as header_eq, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use anilist_mcp::config::Config;
use anilist_mcp::server::transport::create_router;

const METHOD_NOT_ALLOWED_BODY: &str =
    r#"{"jsonrpc":"2.0","error":{"code":-32000,"message":"Method not allowed."},"id":null}"#;
const INTERNAL_ERROR_BODY: &str =
    r#"{"jsonrpc":"2.0","error":{"code":-32603,"message":"Internal server error"},"id":null}"#;

fn router(config: Config) -> Router {
    create_router(config, None)
}

fn offline_router() -> Router {
    router(Config::for_testing("http://127.0.0.1:9"))
}

fn rpc(method: &str, params: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": 1, "method": method, "params": params})
}

fn post(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn config_query(token: &str) -> String {
    let encoded = STANDARD.encode(json!({"anilistToken": token}).to_string());
    serde_urlencoded::to_string([("config", encoded)]).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

// =============================================================================
// Method handling
// =============================================================================

#[tokio::test]
async fn test_get_mcp_is_method_not_allowed() {
    let request = Request::builder().uri("/mcp").body(Body::empty()).unwrap();
    let response = offline_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body_text(response).await, METHOD_NOT_ALLOWED_BODY);
}

#[tokio::test]
async fn test_delete_mcp_is_method_not_allowed() {
    let request =
        Request::builder().method(Method::DELETE).uri("/mcp").body(Body::empty()).unwrap();
    let response = offline_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body_text(response).await, METHOD_NOT_ALLOWED_BODY);
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = offline_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "anilist-mcp");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// POST /mcp
// =============================================================================

#[tokio::test]
async fn test_initialize_over_http() {
    let response = offline_router()
        .oneshot(post("/mcp", &rpc("initialize", json!({"protocolVersion": "2025-03-26"}))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["result"]["serverInfo"]["name"], "anilist-mcp");
}

#[tokio::test]
async fn test_notification_is_accepted() {
    let notification = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});
    let response = offline_router().oneshot(post("/mcp", &notification)).await.unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert!(body_text(response).await.is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/mcp")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = offline_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], -32700);
}

#[tokio::test]
async fn test_malformed_config_param_is_internal_error() {
    let response = offline_router()
        .oneshot(post("/mcp?config=%25%25not-base64", &rpc("ping", json!({}))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, INTERNAL_ERROR_BODY);
}

#[tokio::test]
async fn test_tools_list_names_and_annotations() {
    let response = offline_router().oneshot(post("/mcp", &rpc("tools/list", json!({})))).await.unwrap();

    let body = body_json(response).await;
    let tools = body["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 44);

    let mut names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), 44);

    for tool in tools {
        assert!(tool["inputSchema"].is_object());
        assert!(tool["annotations"]["title"].is_string());
    }

    let delete_thread = tools.iter().find(|t| t["name"] == "delete_thread").unwrap();
    assert_eq!(delete_thread["annotations"]["destructiveHint"], true);
    assert_eq!(delete_thread["annotations"]["idempotentHint"], true);

    let get_genres = tools.iter().find(|t| t["name"] == "get_genres").unwrap();
    assert_eq!(get_genres["annotations"]["readOnlyHint"], true);
}

#[tokio::test]
async fn test_unknown_tool_is_invalid_params() {
    let response = offline_router()
        .oneshot(post("/mcp", &rpc("tools/call", json!({"name": "get_paper", "arguments": {}}))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["error"]["code"], -32602);
}

#[tokio::test]
async fn test_login_tool_without_credential_is_in_band_error() {
    let mock_server = MockServer::start().await;
    Mock::given(any()).respond_with(ResponseTemplate::new(200)).expect(0).mount(&mock_server).await;

    let response = router(Config::for_testing(&mock_server.uri()))
        .oneshot(post("/mcp", &rpc("tools/call", json!({"name": "get_authorized_user"}))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["result"]["isError"], true);
}

// =============================================================================
// Credential precedence
// =============================================================================

async fn viewer_mock(mock_server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(header_eq("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"Viewer": {"id": 1, "name": token}}
        })))
        .expect(1)
        .mount(mock_server)
        .await;
}

fn viewer_call() -> Value {
    rpc("tools/call", json!({"name": "get_authorized_user", "arguments": {}}))
}

#[tokio::test]
async fn test_credential_precedence() {
    let mock_server = MockServer::start().await;
    viewer_mock(&mock_server, "header-token").await;
    viewer_mock(&mock_server, "query-token").await;
    viewer_mock(&mock_server, "default-token").await;

    let config =
        Config::for_testing(&mock_server.uri()).with_token(Some("default-token".to_string()));
    let uri = format!("/mcp?{}", config_query("query-token"));

    // Header beats query parameter.
    let mut request = post(&uri, &viewer_call());
    request.headers_mut().insert("AniList-Token", "header-token".parse().unwrap());
    let response = router(config.clone()).oneshot(request).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["result"]["isError"], Value::Null, "{body}");

    // Query parameter beats the process default.
    let response = router(config.clone()).oneshot(post(&uri, &viewer_call())).await.unwrap();
    assert_eq!(body_json(response).await["result"]["isError"], Value::Null);

    // Process default.
    let response = router(config).oneshot(post("/mcp", &viewer_call())).await.unwrap();
    assert_eq!(body_json(response).await["result"]["isError"], Value::Null);
}

#[tokio::test]
async fn test_unpadded_url_safe_config_param_reaches_token() {
    let mock_server = MockServer::start().await;
    viewer_mock(&mock_server, "tok~~?>").await;

    // {"anilistToken":"tok~~?>"}, URL-safe alphabet, padding stripped.
    let encoded = URL_SAFE_NO_PAD.encode(json!({"anilistToken": "tok~~?>"}).to_string());
    assert!(!encoded.ends_with('=') && encoded.contains('-'));
    let uri = format!("/mcp?config={encoded}");

    let response = router(Config::for_testing(&mock_server.uri()))
        .oneshot(post(&uri, &viewer_call()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["result"]["isError"], Value::Null, "{body}");
}

// =============================================================================
// CORS
// =============================================================================

#[tokio::test]
async fn test_cors_any_origin_by_default() {
    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://client.example")
        .body(Body::empty())
        .unwrap();
    let response = offline_router().oneshot(request).await.unwrap();

    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_cors_preflight_allows_token_header() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/mcp")
        .header(header::ORIGIN, "https://a.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "anilist-token")
        .body(Body::empty())
        .unwrap();
    let response = create_router(
        Config::for_testing("http://127.0.0.1:9"),
        Some("https://a.example, https://b.example"),
    )
    .oneshot(request)
    .await
    .unwrap();

    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "https://a.example");
    let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS].to_str().unwrap().to_ascii_lowercase();
    assert!(allowed.contains("anilist-token"));
    assert!(allowed.contains("mcp-session-id"));
}

#[tokio::test]
async fn test_cors_rejects_unlisted_origin() {
    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = create_router(Config::for_testing("http://127.0.0.1:9"), Some("https://a.example"))
        .oneshot(request)
        .await
        .unwrap();

    assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
