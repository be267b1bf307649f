//! Tests for Config and AniListClient against a mock GraphQL endpoint.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use anilist_mcp::client::{AniListClient, FavouriteKind};
use anilist_mcp::config::Config;
use anilist_mcp::error::ClientError;
use anilist_mcp::models::{FilterArgs, IdOrName, MediaType};

fn client(mock_server: &MockServer, token: Option<&str>) -> AniListClient {
    let config = Config::for_testing(&mock_server.uri()).with_token(token.map(String::from));
    AniListClient::new(&config).unwrap()
}

// =============================================================================
// Config
// =============================================================================

#[test]
fn test_config_defaults() {
    let config = Config::default();
    assert_eq!(config.api_url, "https://graphql.anilist.co");
    assert!(!config.has_token());
}

#[test]
fn test_config_blank_token_is_absent() {
    assert!(!Config::new(Some("  ".to_string())).has_token());
    assert_eq!(Config::new(Some("abc".to_string())).credential(), Some("abc"));
}

#[test]
fn test_config_rejects_invalid_api_url() {
    assert!(Config::default().with_api_url("not a url").is_err());
    let config = Config::default().with_api_url("http://localhost:4000/").unwrap();
    assert_eq!(config.api_url, "http://localhost:4000");
}

#[test]
fn test_config_debug_hides_token() {
    let config = Config::new(Some("secret-token".to_string()));
    let debug = format!("{config:?}");
    assert!(!debug.contains("secret-token"));
    assert!(debug.contains("has_token: true"));
}

// =============================================================================
// Requests
// =============================================================================

#[tokio::test]
async fn test_bearer_token_sent_when_configured() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("authorization", "Bearer token123"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"GenreCollection": ["Action", "Comedy"]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let genres = client(&mock_server, Some("token123")).genres().await.unwrap();
    assert_eq!(genres, json!(["Action", "Comedy"]));
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(|req: &Request| {
            let status = if req.headers.contains_key("authorization") { 500 } else { 200 };
            ResponseTemplate::new(status).set_body_json(json!({"data": {"MediaTagCollection": []}}))
        })
        .mount(&mock_server)
        .await;

    assert!(client(&mock_server, None).media_tags().await.is_ok());
}

#[tokio::test]
async fn test_search_media_sends_filter_in_document() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(|req: &Request| {
            let body: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
            let query = body["query"].as_str().unwrap_or_default();
            let ok = query.contains("$seasonYear: Int")
                && query.contains("seasonYear: $seasonYear")
                && body["variables"]["seasonYear"] == 1998;
            ResponseTemplate::new(if ok { 200 } else { 400 })
                .set_body_json(json!({"data": {"Page": {"media": []}}}))
        })
        .mount(&mock_server)
        .await;

    let filter = json!({"seasonYear": 1998});
    let args = FilterArgs::parse(filter.as_object(), anilist_mcp::models::filters::MEDIA_FILTERS, &[])
        .unwrap();

    let page = client(&mock_server, None)
        .search_media(MediaType::Anime, "bebop", &args, 1, 5)
        .await
        .unwrap();
    assert_eq!(page, json!({"media": []}));
}

#[tokio::test]
async fn test_character_by_name_uses_search() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({"variables": {"search": "Spike Spiegel"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"Character": {"id": 1, "name": {"full": "Spike Spiegel"}}}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let character = client(&mock_server, None)
        .character(&IdOrName::Name("Spike Spiegel".to_string()))
        .await
        .unwrap();
    assert_eq!(character["id"], 1);
}

#[tokio::test]
async fn test_toggle_favourite_polarity() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({"variables": {"staffId": 95}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"ToggleFavourite": {"staff": {"nodes": [{"id": 3}, {"id": 95}]}}}
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({"variables": {"studioId": 4}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"ToggleFavourite": {"studios": {"nodes": []}}}
        })))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server, Some("token123"));
    assert!(client.toggle_favourite(FavouriteKind::Staff, 95).await.unwrap());
    assert!(!client.toggle_favourite(FavouriteKind::Studio, 4).await.unwrap());
}

// =============================================================================
// Error mapping
// =============================================================================

#[tokio::test]
async fn test_rate_limit_reads_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "42"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server, None).genres().await.unwrap_err();
    assert_eq!(err.retry_after(), Some(Duration::from_secs(42)));
}

#[tokio::test]
async fn test_graphql_errors_joined_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{"message": "first"}, {"message": "second"}],
            "data": null
        })))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server, None).thread(1).await.unwrap_err();
    assert!(matches!(err, ClientError::GraphQl { .. }));
    assert_eq!(err.to_string(), "first; second");
}

#[tokio::test]
async fn test_status_mapping() {
    let mock_server = MockServer::start().await;

    for (id, status) in [(1, 404), (2, 401), (3, 400), (4, 503), (5, 418)] {
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"variables": {"id": id}})))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "errors": [{"message": format!("status {status}")}]
            })))
            .mount(&mock_server)
            .await;
    }

    let client = client(&mock_server, None);
    assert!(matches!(client.thread(1).await, Err(ClientError::NotFound { .. })));
    assert!(matches!(client.thread(2).await, Err(ClientError::Unauthorized { .. })));
    assert!(matches!(client.thread(3).await, Err(ClientError::BadRequest { .. })));
    assert!(matches!(client.thread(4).await, Err(ClientError::Server { status: 503, .. })));
    assert!(matches!(client.thread(5).await, Err(ClientError::UnexpectedStatus { status: 418, .. })));

    let err = client.thread(1).await.unwrap_err();
    assert_eq!(err.to_string(), "status 404");
}

#[tokio::test]
async fn test_null_root_is_missing_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"Studio": null}})))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server, None).studio(&IdOrName::Id(7)).await.unwrap_err();
    assert!(matches!(err, ClientError::MissingData { .. }));
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    let config = Config::for_testing("http://127.0.0.1:9");
    let err = AniListClient::new(&config).unwrap().genres().await.unwrap_err();
    assert!(matches!(err, ClientError::Middleware(_) | ClientError::Http(_)));
}
