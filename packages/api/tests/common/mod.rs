// ABOUTME: Common test utilities for API integration tests
// ABOUTME: Spawns the API on an ephemeral port over an in-memory database and wraps HTTP calls

use std::sync::Arc;

use realworlded_agents::AgentSet;
use realworlded_ai::GeminiService;
use realworlded_api::{create_api_router, AppState};
use realworlded_security::TokenIssuer;
use realworlded_storage::DbState;
use reqwest::StatusCode;
use serde_json::{json, Value};

pub const TEST_SECRET: &str = "integration-test-secret";
#[allow(dead_code)]
pub const TEST_PASSWORD: &str = "secret123";

/// Test context containing the server URL and its database
pub struct TestContext {
    pub base_url: String,
    #[allow(dead_code)]
    pub db: DbState,
}

/// Server whose agents run in demo mode (no Gemini key)
pub async fn setup_test_server() -> TestContext {
    let gemini = GeminiService::new(None, "test-model").expect("Failed to build Gemini client");
    spawn_server(gemini).await
}

/// Server whose agents talk to a mock Gemini API at `gemini_url`
#[allow(dead_code)]
pub async fn setup_test_server_with_gemini(gemini_url: &str) -> TestContext {
    let gemini = GeminiService::new(Some("test-key".to_string()), "test-model")
        .expect("Failed to build Gemini client")
        .with_base_url(gemini_url);
    spawn_server(gemini).await
}

async fn spawn_server(gemini: GeminiService) -> TestContext {
    let db = DbState::in_memory().await.expect("Failed to create database");
    let agents = AgentSet::new(Arc::new(gemini)).expect("Failed to load personas");
    let state = AppState::new(db.clone(), TokenIssuer::new(TEST_SECRET, 60), agents);

    let app = create_api_router().with_state(state);

    // Bind to random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestContext { base_url, db }
}

fn request(
    method: reqwest::Method,
    base_url: &str,
    path: &str,
    token: Option<&str>,
) -> reqwest::RequestBuilder {
    let builder = reqwest::Client::new().request(method, format!("{}{}", base_url, path));
    match token {
        Some(token) => builder.bearer_auth(token),
        None => builder,
    }
}

/// Helper to make GET requests
pub async fn get(base_url: &str, path: &str, token: Option<&str>) -> reqwest::Response {
    request(reqwest::Method::GET, base_url, path, token)
        .send()
        .await
        .expect("Failed to make GET request")
}

/// Helper to make POST requests with JSON body
pub async fn post_json<T: serde::Serialize>(
    base_url: &str,
    path: &str,
    token: Option<&str>,
    body: &T,
) -> reqwest::Response {
    request(reqwest::Method::POST, base_url, path, token)
        .json(body)
        .send()
        .await
        .expect("Failed to make POST request")
}

/// Helper to make PATCH requests with JSON body
#[allow(dead_code)]
pub async fn patch_json<T: serde::Serialize>(
    base_url: &str,
    path: &str,
    token: Option<&str>,
    body: &T,
) -> reqwest::Response {
    request(reqwest::Method::PATCH, base_url, path, token)
        .json(body)
        .send()
        .await
        .expect("Failed to make PATCH request")
}

/// Helper to make DELETE requests
#[allow(dead_code)]
pub async fn delete(base_url: &str, path: &str, token: Option<&str>) -> reqwest::Response {
    request(reqwest::Method::DELETE, base_url, path, token)
        .send()
        .await
        .expect("Failed to make DELETE request")
}

/// Parse the body and return the `data` payload of a success envelope
pub async fn data(response: reqwest::Response) -> Value {
    let body: Value = response.json().await.expect("Response body is not JSON");
    assert_eq!(body["success"], true, "unexpected body: {body}");
    body["data"].clone()
}

/// Parse an error body and return `(code, message)`
#[allow(dead_code)]
pub async fn error(response: reqwest::Response) -> (String, String) {
    let body: Value = response.json().await.expect("Response body is not JSON");
    assert_eq!(body["success"], false, "unexpected body: {body}");
    (
        body["error"]["code"].as_str().unwrap_or_default().to_string(),
        body["error"]["message"].as_str().unwrap_or_default().to_string(),
    )
}

/// Register a user and return its access token
pub async fn signup(base_url: &str, email: &str, username: &str) -> String {
    let response = post_json(
        base_url,
        "/api/v1/auth/signup",
        None,
        &json!({ "email": email, "username": username, "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    data(response).await["access_token"]
        .as_str()
        .expect("signup returned no token")
        .to_string()
}

/// Start a session in `mode` and return its id
#[allow(dead_code)]
pub async fn create_session(base_url: &str, token: &str, mode: &str) -> i64 {
    let response = post_json(
        base_url,
        "/api/v1/sessions",
        Some(token),
        &json!({ "mode": mode, "subject": "python" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    data(response).await["id"].as_i64().expect("session has no id")
}

/// Send a chat message and return the response payload
#[allow(dead_code)]
pub async fn chat(base_url: &str, token: &str, session_id: i64, message: &str) -> Value {
    let response = post_json(
        base_url,
        "/api/v1/chat",
        Some(token),
        &json!({ "session_id": session_id, "message": message }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    data(response).await
}
