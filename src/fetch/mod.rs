mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Context, Result};
use serde_json::Value;

/// POSTs a JSON body to `url` and decodes the JSON response.
pub async fn post_json<C: HttpClient + ?Sized>(
    client: &C,
    url: &str,
    body: &Value,
) -> Result<Value> {
    let mut req = reqwest::Request::new(reqwest::Method::POST, url.parse()?);
    req.headers_mut().insert(
        reqwest::header::CONTENT_TYPE,
        reqwest::header::HeaderValue::from_static("application/json"),
    );
    *req.body_mut() = Some(serde_json::to_vec(body)?.into());

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await.unwrap_or_default();
        anyhow::bail!("request to {url} failed with status {status}: {text}");
    }

    resp.json().await.context("response body is not JSON")
}
