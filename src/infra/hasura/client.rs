use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{Value, json};

use crate::fetch::auth::AdminSecret;
use crate::fetch::{BasicClient, HttpClient, post_json};
use crate::services::query_store::QueryStore;

/// [`QueryStore`] implementation speaking Hasura's GraphQL-over-HTTP
/// protocol.
pub struct HasuraClient {
    endpoint: String,
    http: Box<dyn HttpClient>,
}

impl HasuraClient {
    /// Builds a client for `endpoint`. When `admin_secret` is set, every
    /// request carries the `x-hasura-admin-secret` header.
    pub fn new(endpoint: impl Into<String>, admin_secret: Option<&str>) -> Result<Self> {
        let base = BasicClient::new()?;
        let http: Box<dyn HttpClient> = match admin_secret {
            Some(secret) => Box::new(AdminSecret::new(base, secret)?),
            None => Box::new(base),
        };
        Ok(Self {
            endpoint: endpoint.into(),
            http,
        })
    }
}

#[async_trait]
impl QueryStore for HasuraClient {
    async fn run_query(&self, document: &str, variables: Value) -> Result<Value> {
        let payload = json!({"query": document, "variables": variables});
        let response = post_json(self.http.as_ref(), &self.endpoint, &payload)
            .await
            .context("GraphQL request failed")?;

        if let Some(errors) = response.get("errors") {
            anyhow::bail!("GraphQL query returned errors: {errors}");
        }

        response
            .get("data")
            .cloned()
            .context("GraphQL response carries neither data nor errors")
    }
}
