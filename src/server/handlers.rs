//! Request handlers. Validation happens here; the aggregation code only
//! sees parsed values.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use super::AppState;
use crate::analyzers::sort::{SortKey, SortOrder};

/// Upstream failures surface as 502 with a terse JSON body; details go
/// to the log, not to the caller.
fn upstream_error(route: &str, err: anyhow::Error) -> Response {
    error!(route, error = %err, "query store request failed");
    (
        StatusCode::BAD_GATEWAY,
        Json(json!({"error": "upstream query failed"})),
    )
        .into_response()
}

/// Invalid sort parameters answer with an empty JSON object, not an
/// error status.
fn empty_object() -> Response {
    Json(json!({})).into_response()
}

async fn leaderboard_response(state: &AppState, sortkey: &str, sortorder: &str) -> Response {
    let (Ok(key), Ok(order)) = (sortkey.parse::<SortKey>(), sortorder.parse::<SortOrder>()) else {
        return empty_object();
    };

    match state.service.member_leaderboard(key, order).await {
        Ok(rows) => Json(rows).into_response(),
        Err(err) => upstream_error("/legco/members/", err),
    }
}

pub(super) async fn members_default(State(state): State<AppState>) -> Response {
    leaderboard_response(&state, "id", "asc").await
}

pub(super) async fn members_sorted(
    State(state): State<AppState>,
    Path(sortkey): Path<String>,
) -> Response {
    leaderboard_response(&state, &sortkey, "asc").await
}

pub(super) async fn members_sorted_ordered(
    State(state): State<AppState>,
    Path((sortkey, sortorder)): Path<(String, String)>,
) -> Response {
    leaderboard_response(&state, &sortkey, &sortorder).await
}

pub(super) async fn member_statistics(
    State(state): State<AppState>,
    Path(member_id): Path<i64>,
) -> Response {
    match state.service.member_statistics(member_id).await {
        Ok(Some(stats)) => Json(stats).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "no such member"})),
        )
            .into_response(),
        Err(err) => upstream_error("/legco/member/", err),
    }
}

pub(super) async fn member_news(
    State(state): State<AppState>,
    Path(member_id): Path<i64>,
) -> Response {
    match state.service.member_news(member_id).await {
        Ok(items) => Json(items).into_response(),
        Err(err) => upstream_error("/legco/member_news/", err),
    }
}

pub(super) async fn member_news_by_name(
    State(state): State<AppState>,
    Path(name_zh): Path<String>,
) -> Response {
    match state.service.member_news_by_name(&name_zh).await {
        Ok(items) => Json(items).into_response(),
        Err(err) => upstream_error("/legco/member_news_by_name/", err),
    }
}

pub(super) async fn hot_news(State(state): State<AppState>) -> Response {
    match state.service.hot_news().await {
        Ok(entries) => Json(entries).into_response(),
        Err(err) => upstream_error("/legco/hot_news/", err),
    }
}

pub(super) async fn budget_meetings(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Response {
    match state.service.budget_meetings(year).await {
        Ok(meetings) => Json(meetings).into_response(),
        Err(err) => upstream_error("/budget/meeting/", err),
    }
}

/// Panel categories for bill classification. Maintained here; the
/// backing store has no table for them.
static BILL_CATEGORIES: &[(i64, &str, &str)] = &[
    (1, "司法及法律", "Administration of Justice and Legal Services"),
    (2, "工商", "Commerce and Industry"),
    (3, "政制", "Constitutional Affairs"),
    (4, "發展", "Development"),
    (5, "經濟發展", "Economic Development"),
    (6, "教育", "Education"),
    (7, "環境", "Environmental Affairs"),
    (8, "財經", "Financial Affairs"),
    (9, "食物安全及環境衞生", "Food Safety and Environmental Hygiene"),
    (10, "衞生", "Health Services"),
    (11, "民政", "Home Affairs"),
    (12, "房屋", "Housing"),
    (13, "資訊科技及廣播", "Information Technology and Broadcasting"),
    (14, "人力", "Manpower"),
    (15, "公務員及資助機構員工", "Public Service"),
    (16, "保安", "Security"),
    (17, "交通", "Transport"),
    (18, "福利", "Welfare Services"),
];

const PLACEHOLDER_AVATAR: &str = "https://upload.wikimedia.org/wikipedia/commons/thumb/a/ac/No_image_available.svg/480px-No_image_available.svg.png";

pub(super) async fn bill_categories() -> Response {
    let categories: Vec<_> = BILL_CATEGORIES
        .iter()
        .map(|&(id, title_zh, title_en)| {
            json!({
                "id": id,
                "title_zh": title_zh,
                "title_en": title_en,
                "avatar": PLACEHOLDER_AVATAR,
            })
        })
        .collect();
    Json(categories).into_response()
}
