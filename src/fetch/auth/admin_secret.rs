use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::HeaderValue;

use crate::fetch::client::HttpClient;

/// An [`HttpClient`] wrapper that injects the `x-hasura-admin-secret`
/// header Hasura expects on privileged queries.
///
/// The secret is validated into a header value once, at construction,
/// so a malformed secret fails at startup instead of on every request.
pub struct AdminSecret<C> {
    inner: C,
    secret: HeaderValue,
}

impl<C> AdminSecret<C> {
    pub fn new(inner: C, secret: &str) -> Result<Self> {
        let mut secret: HeaderValue = secret
            .parse()
            .context("admin secret is not a valid header value")?;
        secret.set_sensitive(true);
        Ok(Self { inner, secret })
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for AdminSecret<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.headers_mut()
            .insert("x-hasura-admin-secret", self.secret.clone());
        self.inner.execute(req).await
    }
}
