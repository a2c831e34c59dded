use std::time::Duration;

use anyhow::{anyhow, Context};
use reqwest::header::{HeaderMap, SET_COOKIE};
use reqwest::{Response, StatusCode};
use serde_json::Value;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Thin HTTP client for the food sharing API
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(server: &str) -> anyhow::Result<Self> {
        let base = Url::parse(server).with_context(|| format!("invalid server URL: {}", server))?;
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, base })
    }

    pub fn url(&self, path: &str) -> anyhow::Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("invalid request path: {}", path))
    }

    pub async fn get_text(&self, path: &str) -> anyhow::Result<String> {
        let response = self.http.get(self.url(path)?).send().await?;
        Ok(check_status(response).await?.text().await?)
    }

    pub async fn get_json(&self, path: &str, query: &[(&str, String)]) -> anyhow::Result<Value> {
        let response = self.http.get(self.url(path)?).query(query).send().await?;
        Ok(check_status(response).await?.json().await?)
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> anyhow::Result<Response> {
        let response = self.http.post(self.url(path)?).json(body).send().await?;
        check_status(response).await
    }

    pub async fn delete_json(&self, path: &str) -> anyhow::Result<Value> {
        let response = self.http.delete(self.url(path)?).send().await?;
        Ok(check_status(response).await?.json().await?)
    }
}

/// Turn non-2xx responses into errors carrying the server's `message`
async fn check_status(response: Response) -> anyhow::Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(anyhow!("{}: {}", status_label(status), error_message(&body)))
}

fn status_label(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

/// Pull a named cookie's value out of Set-Cookie response headers
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookie| {
            let pair = cookie.split(';').next()?.trim();
            pair.strip_prefix(prefix.as_str()).map(str::to_string)
        })
}
