//! Integration tests for person and packet operations.

use blueink::{Client, ClientConfig, PersonBuilder};
use wiremock::matchers::{body_json, body_string_contains, method, path};
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
async fn test_create_person_from_builder() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/persons/"))
        .and(body_json(serde_json::json!({
            "name": "Eli Vance",
            "channels": [
                {"email": "eli@blackmesa.gov", "kind": "em"},
                {"phone": "505 555 5555", "kind": "mp"}
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": "p1"})))
        .mount(&mock_server)
        .await;

    let mut builder = PersonBuilder::new("Eli Vance");
    builder.add_email("eli@blackmesa.gov").add_phone("505 555 5555");

    let client = test_client(mock_server.uri());
    let response = client.persons().create_from_builder(&builder).await.unwrap();
    assert_eq!(response.data["id"], "p1");
}

#[tokio::test]
async fn test_create_person_requires_name() {
    let client = test_client("http://127.0.0.1:9".to_string());
    let builder = PersonBuilder::default();

    let err = client.persons().create_from_builder(&builder).await.unwrap_err();
    assert!(err.is_validation_error());
}

#[tokio::test]
async fn test_update_person_full_and_partial() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/persons/p1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "p1"})))
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/persons/p1/"))
        .and(body_string_contains("Gordon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "p1"})))
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());

    let person = PersonBuilder::new("Eli Vance").build().unwrap();
    assert!(client.persons().update("p1", &person).await.is_ok());

    let patch = serde_json::json!({"name": "Gordon Freeman"});
    assert!(client.persons().partial_update("p1", &patch).await.is_ok());
}

#[tokio::test]
async fn test_delete_person() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/persons/p1/"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    let response = client.persons().delete("p1").await.unwrap();
    assert_eq!(response.status, 204);
}

#[tokio::test]
async fn test_packet_remind_and_update() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/packets/pk1/remind/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/packets/pk1/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "pk1"})))
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    assert!(client.packets().remind("pk1").await.is_ok());

    let patch = serde_json::json!({"email": "new@x.com"});
    assert!(client.packets().update("pk1", &patch).await.is_ok());
}

#[tokio::test]
async fn test_packet_embed_url_and_coe() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/packets/pk1/embed_url/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"embed_url": "https://e/x"})),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/packets/pk1/coe/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&mock_server)
        .await;

    let client = test_client(mock_server.uri());
    let response = client.packets().embed_url("pk1").await.unwrap();
    assert_eq!(response.data["embed_url"], "https://e/x");
    assert!(client.packets().retrieve_coe("pk1").await.is_ok());
}
