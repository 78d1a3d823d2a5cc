//! End-to-end tests against a server bound to a local port

mod common;

use adapt_ai::llm::ScriptedReply;
use adapt_ai::routes::{configure_routes, SESSION_HEADER};
use serde_json::{json, Value};
use std::net::{SocketAddr, TcpListener};
use std::time::Duration;

/// Start the service on a free port and wait until it accepts connections
async fn spawn_server(replies: Vec<ScriptedReply>) -> String {
    let (_, state) = common::scripted_state(replies);

    let addr: SocketAddr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    tokio::spawn(warp::serve(configure_routes(state)).run(addr));

    for _ in 0..50 {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_health_and_root() {
    let base = spawn_server(vec![]).await;
    let client = reqwest::Client::new();

    let health: Value = client
        .get(format!("{}/health", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health, json!({"status": "healthy"}));

    let root = client.get(&base).send().await.unwrap();
    assert_eq!(root.status(), 200);
}

#[tokio::test]
async fn test_unknown_route_and_wrong_method() {
    let base = spawn_server(vec![]).await;
    let client = reqwest::Client::new();

    let missing = client.get(format!("{}/nope", base)).send().await.unwrap();
    assert_eq!(missing.status(), 404);
    let body: Value = missing.json().await.unwrap();
    assert!(body["detail"].is_string());

    let wrong = client
        .get(format!("{}/generate-word-search", base))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong.status(), 405);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let base = spawn_server(vec![]).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/generate-mind-map", base))
        .header("content-type", "application/json")
        .body("{\"subject\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let response = client
        .post(format!("{}/generate-flashcards", base))
        .json(&json!({"topic": "wrong field"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_flashcards_over_http() {
    let base = spawn_server(vec![ScriptedReply::text(
        r#"[{"id": 1, "front": "Q", "back": "A"}]"#,
    )])
    .await;

    let response = reqwest::Client::new()
        .post(format!("{}/generate-flashcards", base))
        .json(&json!({"subject": "Photosynthesis"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["general_subject"], json!("Photosynthesis"));
    assert_eq!(body["flashcards"][0]["front"], json!("Q"));
}

#[tokio::test]
async fn test_session_header_routes_conversation() {
    let base = spawn_server(vec![ScriptedReply::text("Hello there")]).await;
    let client = reqwest::Client::new();
    let session = uuid::Uuid::new_v4();

    let response = client
        .post(format!("{}/send-message", base))
        .header(SESSION_HEADER, session.to_string())
        .json(&json!({"message": "Hi", "temperature": 0.3}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"response": "Hello there"}));

    let history: Value = client
        .get(format!("{}/sessions/{}/history", base, session))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(history["session_id"], json!(session.to_string()));
    assert_eq!(history["messages"].as_array().map(Vec::len), Some(3));
    assert_eq!(history["messages"][2]["role"], json!("assistant"));

    let cleared = client
        .post(format!("{}/clear-history", base))
        .header(SESSION_HEADER, session.to_string())
        .send()
        .await
        .unwrap();
    assert_eq!(cleared.status(), 200);

    let history: Value = client
        .get(format!("{}/sessions/{}/history", base, session))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(history["messages"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_invalid_session_header_is_bad_request() {
    let base = spawn_server(vec![]).await;

    let response = reqwest::Client::new()
        .post(format!("{}/clear-history", base))
        .header(SESSION_HEADER, "not-a-uuid")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}
