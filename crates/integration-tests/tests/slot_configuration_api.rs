//! Integration tests for the slot configuration HTTP API.
//!
//! These tests start the server in process with the in-memory store.
//!
//! Run with: cargo test -p pagecraft-integration-tests

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use pagecraft_core::StoreId;
use pagecraft_integration_tests::TestServer;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

async fn send(
    client: &Client,
    request: reqwest::RequestBuilder,
) -> (StatusCode, Value) {
    let response = client.execute(request.build().unwrap()).await.unwrap();
    let status = response.status();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

fn target(server: &TestServer, store_id: StoreId, page: &str, action: &str) -> String {
    server.url(&format!("api/slot-configurations/{store_id}/{page}/{action}"))
}

// ============================================================================
// Health and middleware
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let server = TestServer::spawn().await;
    let client = Client::new();

    let response = client.get(server.url("health")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = client.get(server.url("health/ready")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = TestServer::spawn().await;
    let client = Client::new();

    let response = client
        .get(server.url("health"))
        .header("x-request-id", "it-req-1")
        .send()
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "it-req-1");

    let response = client.get(server.url("health")).send().await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Envelope contract
// ============================================================================

#[tokio::test]
async fn test_draft_publish_cycle() {
    let server = TestServer::spawn().await;
    let client = Client::new();
    let store_id = StoreId::generate();

    let (status, body) = send(&client, client.get(target(&server, store_id, "cart", "draft"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "data": null}));

    let doc = json!({
        "slots": {"cart_title": {"id": "cart_title", "type": "text", "content": "Your bag"}},
        "cmsBlocks": ["cart_above_items"],
        "customFlag": true
    });
    let (status, body) = send(
        &client,
        client.put(target(&server, store_id, "cart", "draft")).json(&doc),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Draft saved");
    assert_eq!(body["data"]["customFlag"], true);

    let (status, body) = send(&client, client.post(target(&server, store_id, "cart", "publish"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["version"], 1);
    assert_eq!(body["message"], "Published version 1");

    let (_, body) = send(&client, client.get(target(&server, store_id, "cart", "published"))).await;
    assert_eq!(body["data"]["slots"]["cart_title"]["content"], "Your bag");
    assert_eq!(body["data"]["metadata"]["version"], 1);
    assert_eq!(body["data"]["cmsBlocks"], json!(["cart_above_items"]));

    // The draft stays editable after publishing.
    let (_, body) = send(&client, client.get(target(&server, store_id, "cart", "draft"))).await;
    assert_eq!(body["data"]["slots"]["cart_title"]["content"], "Your bag");
}

#[tokio::test]
async fn test_error_envelopes() {
    let server = TestServer::spawn().await;
    let client = Client::new();
    let store_id = StoreId::generate();

    let (status, body) = send(&client, client.post(target(&server, store_id, "cart", "publish"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
    assert!(body.get("data").is_none());

    let (status, body) = send(&client, client.get(target(&server, store_id, "homepage", "draft"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = send(
        &client,
        client
            .put(target(&server, store_id, "cart", "draft"))
            .json(&json!({"metadata": {}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, _) = send(
        &client,
        client.post(target(&server, store_id, "cart", "versions/7/revert")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_versions_newest_first_and_revert() {
    let server = TestServer::spawn().await;
    let client = Client::new();
    let store_id = StoreId::generate();

    for content in ["first", "second"] {
        let doc = json!({"slots": {"title": {"id": "title", "type": "text", "content": content}}});
        send(
            &client,
            client.put(target(&server, store_id, "product", "draft")).json(&doc),
        )
        .await;
        send(&client, client.post(target(&server, store_id, "product", "publish"))).await;
    }

    let (_, body) = send(&client, client.get(target(&server, store_id, "product", "versions"))).await;
    let versions: Vec<u64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["version"].as_u64().unwrap())
        .collect();
    assert_eq!(versions, vec![2, 1]);

    let (status, body) = send(
        &client,
        client.post(target(&server, store_id, "product", "versions/1/revert")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["slots"]["title"]["content"], "first");

    // Reverting only rewrites the draft.
    let (_, body) = send(&client, client.get(target(&server, store_id, "product", "published"))).await;
    assert_eq!(body["data"]["slots"]["title"]["content"], "second");
}

#[tokio::test]
async fn test_defaults_route() {
    let server = TestServer::spawn().await;
    let client = Client::new();

    let (status, body) = send(
        &client,
        client.get(server.url("api/slot-configurations/defaults/category")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["metadata"]["pageType"], "category");
    assert!(body["data"]["slots"]["product_1_price"].is_object());
}
