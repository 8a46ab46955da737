//! Tests for the HTTP transport module

use super::*;
use crate::error::Error;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_rest_client_config_default() {
    let config = RestClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.base_url.is_none());
    assert!(config.username.is_none());
    assert!(config.user_agent.starts_with("pageflow/"));
}

#[test]
fn test_rest_client_config_builder() {
    let config = RestClientConfig::builder()
        .base_url("https://api.example.com")
        .timeout(Duration::from_secs(60))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .basic_auth("AC123", "secret")
        .build();

    assert_eq!(config.base_url, Some("https://api.example.com".to_string()));
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
    assert_eq!(config.username, Some("AC123".to_string()));
    assert_eq!(config.password, Some("secret".to_string()));
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("page", "1")
        .query("page_size", "10")
        .header("X-Request-Id", "abc123")
        .json(serde_json::json!({"key": "value"}))
        .timeout(Duration::from_secs(10));

    assert_eq!(config.query.get("page"), Some(&"1".to_string()));
    assert_eq!(config.query.get("page_size"), Some(&"10".to_string()));
    assert_eq!(
        config.headers.get("X-Request-Id"),
        Some(&"abc123".to_string())
    );
    assert!(config.body.is_some());
    assert_eq!(config.timeout, Some(Duration::from_secs(10)));
}

#[tokio::test]
async fn test_get_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/Devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "devices": [{"sid": "DE1"}]
        })))
        .mount(&mock_server)
        .await;

    let config = RestClientConfig::builder()
        .base_url(mock_server.uri())
        .build();

    let client = RestClient::with_config(config);
    let data: serde_json::Value = client.get_json("/v1/Devices").await.unwrap();

    assert_eq!(data["devices"][0]["sid"], "DE1");
}

#[tokio::test]
async fn test_query_params_forwarded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/Devices"))
        .and(query_param("page_size", "25"))
        .and(query_param("status", "active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "devices": []
        })))
        .mount(&mock_server)
        .await;

    let config = RestClientConfig::builder()
        .base_url(mock_server.uri())
        .build();

    let client = RestClient::with_config(config);
    let request = RequestConfig::new()
        .query("page_size", "25")
        .query("status", "active");
    let response = client.get_with_config("/v1/Devices", request).await.unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_default_headers_and_basic_auth() {
    let mock_server = MockServer::start().await;

    // "AC123:secret" base64-encoded
    Mock::given(method("GET"))
        .and(path("/v1/Devices"))
        .and(header("authorization", "Basic QUMxMjM6c2VjcmV0"))
        .and(header("X-Api-Edge", "frankfurt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "devices": []
        })))
        .mount(&mock_server)
        .await;

    let config = RestClientConfig::builder()
        .base_url(mock_server.uri())
        .header("X-Api-Edge", "frankfurt")
        .basic_auth("AC123", "secret")
        .build();

    let client = RestClient::with_config(config);
    let response = client.get("/v1/Devices").await.unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_non_success_status_carries_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/Devices/DE404"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"message": "not found"}"#),
        )
        .mount(&mock_server)
        .await;

    let config = RestClientConfig::builder()
        .base_url(mock_server.uri())
        .build();

    let client = RestClient::with_config(config);
    let err = client.get("/v1/Devices/DE404").await.unwrap_err();

    assert!(err.is_transport());
    assert_eq!(err.status(), Some(404));
    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, r#"{"message": "not found"}"#);
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/Devices"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = RestClientConfig::builder()
        .base_url(mock_server.uri())
        .build();

    let client = RestClient::with_config(config);
    let err = client.get("/v1/Devices").await.unwrap_err();

    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_post_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/Devices/DE1"))
        .and(body_json(serde_json::json!({"name": "renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "sid": "DE1",
            "name": "renamed"
        })))
        .mount(&mock_server)
        .await;

    let config = RestClientConfig::builder()
        .base_url(mock_server.uri())
        .build();

    let client = RestClient::with_config(config);
    let response = client
        .post("/v1/Devices/DE1", serde_json::json!({"name": "renamed"}))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_absolute_url_bypasses_base() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/Devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "devices": []
        })))
        .mount(&mock_server)
        .await;

    // Base points somewhere unreachable; the absolute URL must win.
    let config = RestClientConfig::builder()
        .base_url("https://api.example.invalid")
        .build();

    let client = RestClient::with_config(config);
    let url = format!("{}/v1/Devices", mock_server.uri());
    let response = client.get(&url).await.unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_relative_path_without_base_fails() {
    let client = RestClient::new();
    let err = client.get("/v1/Devices").await.unwrap_err();
    assert!(matches!(err, Error::InvalidUrl(_)));
}
