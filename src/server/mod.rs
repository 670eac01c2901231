//! The inbound HTTP surface.

mod handlers;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use tracing::info;

use crate::services::LegcoService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<LegcoService>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/legco/members/", get(handlers::members_default))
        .route("/legco/members/{sortkey}/", get(handlers::members_sorted))
        .route(
            "/legco/members/{sortkey}/{sortorder}/",
            get(handlers::members_sorted_ordered),
        )
        .route("/legco/member/{member_id}/", get(handlers::member_statistics))
        .route("/legco/member_news/{member_id}/", get(handlers::member_news))
        .route(
            "/legco/member_news_by_name/{name_zh}/",
            get(handlers::member_news_by_name),
        )
        .route("/legco/hot_news/", get(handlers::hot_news))
        .route("/legco/bill_categories/", get(handlers::bill_categories))
        .route("/budget/meeting/{year}/", get(handlers::budget_meetings))
        .with_state(state)
}

/// Binds `addr` and serves requests until the process exits.
pub async fn serve(addr: &str, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, build_router(state))
        .await
        .context("server terminated")
}
