#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, SET_COOKIE};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use foodshare_api::config::{AppConfig, Environment, StoreBackend};
use foodshare_api::database::MemoryFoodStore;
use foodshare_api::{app, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub state: AppState,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Default test config: development cookies, memory store, known secret
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::defaults(Environment::Development);
    config.store.backend = StoreBackend::Memory;
    config.security.access_token_secret = TEST_SECRET.to_string();
    config
}

pub async fn spawn_server() -> Result<TestServer> {
    spawn_server_with(|_| {}).await
}

/// Serve the router in-process on an unused port; the server lives as long as
/// the test's runtime
pub async fn spawn_server_with(configure: impl FnOnce(&mut AppConfig)) -> Result<TestServer> {
    let mut config = test_config();
    configure(&mut config);

    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;

    let state = AppState::new(config, Arc::new(MemoryFoodStore::new()));
    let router = app(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok(TestServer {
        port,
        base_url: format!("http://127.0.0.1:{}", port),
        state,
    })
}

pub fn client() -> reqwest::Client {
    reqwest::Client::new()
}

pub fn listing(name: &str, quantity: i64, expired_date: &str, status: &str) -> Value {
    json!({
        "food_name": name,
        "food_image": "https://example.com/food.jpg",
        "food_quantity": quantity,
        "pickup_location": "Dhaka",
        "expired_date": expired_date,
        "additional_notes": "",
        "food_status": status,
        "donator_name": "Donor",
        "donator_email": "donor@x.com",
    })
}

/// Insert through the API and return the new id
pub async fn add_listing(server: &TestServer, body: &Value) -> Result<String> {
    let res = client().post(server.url("/add-food")).json(body).send().await?;
    assert_eq!(res.status(), StatusCode::OK, "add-food failed");

    let ack = res.json::<Value>().await?;
    ack.get("insertedId")
        .and_then(Value::as_str)
        .map(str::to_string)
        .with_context(|| format!("missing insertedId in {}", ack))
}

pub async fn get_json(server: &TestServer, path: &str) -> Result<(StatusCode, Value)> {
    let res = client().get(server.url(path)).send().await?;
    let status = res.status();
    Ok((status, res.json::<Value>().await?))
}

/// POST /jwt and return the token cookie value
pub async fn login(server: &TestServer, email: &str) -> Result<String> {
    let res = client()
        .post(server.url("/jwt"))
        .json(&json!({ "email": email }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK, "jwt failed");

    token_cookie(res.headers()).context("no token cookie set")
}

pub fn set_cookies(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

pub fn token_cookie(headers: &HeaderMap) -> Option<String> {
    set_cookies(headers).into_iter().find_map(|cookie| {
        let pair = cookie.split(';').next()?.trim().to_string();
        pair.strip_prefix("token=").map(str::to_string)
    })
}

pub fn ids(items: &Value) -> Vec<String> {
    items
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("_id").and_then(Value::as_str).map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
