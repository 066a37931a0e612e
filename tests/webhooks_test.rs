//! Integration tests for webhook operations.

use blueink::types::event_types;
use blueink::{Client, ClientConfig, WebhookBuilder};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: String) -> Client {
    Client::with_config(
        "test_api_key",
        ClientConfig {
            base_url: Some(base_url),
            ..Default::default()
        },
    )
    .unwrap()
}

#[tokio::test]
async fn test_create_webhook_from_builder() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/webhooks/"))
        .and(body_string_contains("bundle_complete"))
        .and(body_string_contains("\"json\":true"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": "wh1"})))
        .mount(&mock_server)
        .await;

    let mut builder = WebhookBuilder::new("https://example.com/hook");
    builder.add_event_type(event_types::BUNDLE_COMPLETE).unwrap();
    builder.add_extra_header("X-Custom", "value");

    let client = test_client(mock_server.uri());
    let response = client.webhooks().create_from_builder(&builder).await.unwrap();
    assert_eq!(response.data["id"], "wh1");
}

#[tokio::test]
async fn test_webhook_crud_paths() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webhooks/wh1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "wh1"})))
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/webhooks/wh1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "wh1"})))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/webhooks/wh1/"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    assert!(client.webhooks().retrieve("wh1").await.is_ok());

    let patch = serde_json::json!({"enabled": false});
    assert!(client.webhooks().update("wh1", &patch).await.is_ok());
    assert!(client.webhooks().delete("wh1").await.is_ok());
}

#[tokio::test]
async fn test_webhook_extra_header_subresource() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webhook_extra_header/hdr1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "hdr1"})))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/webhook_extra_header/hdr1/"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    assert!(client.webhooks().retrieve_header("hdr1").await.is_ok());
    assert!(client.webhooks().delete_header("hdr1").await.is_ok());
}

#[tokio::test]
async fn test_webhook_events_and_deliveries_read_only() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webhook_events/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/webhook_deliveries/del1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "del1"})))
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    assert!(client.webhooks().list_events(&[]).await.is_ok());
    assert!(client.webhooks().retrieve_delivery("del1").await.is_ok());
}

#[tokio::test]
async fn test_webhook_secret_pair() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/webhook_secret/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"secret": "s1"})),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/webhook_secret/regenerate/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"secret": "s2"})),
        )
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    let old = client.webhooks().retrieve_secret().await.unwrap();
    let new = client.webhooks().regenerate_secret().await.unwrap();
    assert_eq!(old.data["secret"], "s1");
    assert_eq!(new.data["secret"], "s2");
}
