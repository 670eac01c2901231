//! The seam between aggregation and the GraphQL backing store.

use anyhow::Result;
use serde_json::Value;

/// Executes a GraphQL document with bound variables and returns the
/// `data` object. Implementations own transport, auth, and GraphQL-level
/// error mapping; callers only see typed-enough JSON.
#[async_trait::async_trait]
pub trait QueryStore: Send + Sync {
    async fn run_query(&self, document: &str, variables: Value) -> Result<Value>;
}

/// In-memory [`QueryStore`] that answers every query with one canned
/// `data` object. Used by tests instead of a network endpoint.
#[derive(Debug, Default, Clone)]
pub struct FakeStore {
    data: Value,
}

impl FakeStore {
    pub fn with_data(data: Value) -> Self {
        Self { data }
    }
}

#[async_trait::async_trait]
impl QueryStore for FakeStore {
    async fn run_query(&self, _document: &str, _variables: Value) -> Result<Value> {
        Ok(self.data.clone())
    }
}
