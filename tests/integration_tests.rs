use std::sync::Arc;

use legco_stats::analyzers::sort::{SortKey, SortOrder};
use legco_stats::config::Config;
use legco_stats::server::{build_router, AppState};
use legco_stats::services::{FakeStore, LegcoService};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

fn fixture_data() -> Value {
    json!({
        "legco_IndividualVote": [
            {"Meeting": {"id": 1, "date": "2019-06-12"}, "individual": 2, "vote_number": 1, "result": "YES"},
            {"Meeting": {"id": 2, "date": "2019-07-03"}, "individual": 2, "vote_number": 1, "result": "NO"},
            {"Meeting": {"id": 2, "date": "2019-07-03"}, "individual": 1, "vote_number": 1, "result": "ABSTAIN"}
        ],
        "legco_Individual": [
            {"id": 1, "name_ch": "陳大文", "name_en": "CHAN Tai-man", "image": null, "Party": {"name_short_ch": "測試黨"}},
            {"id": 2, "name_ch": "李小明", "name_en": "LEE Siu-ming", "image": null, "Party": null}
        ],
        "legco_CouncilMembers": [
            {"member": 2, "CouncilMembershipType": {"category": "地方選區", "sub_category": "九龍西"}},
            {"member": 1, "CouncilMembershipType": {"category": "功能界別", "sub_category": "法律界"}}
        ]
    })
}

fn app_state(data: Value) -> AppState {
    let service = LegcoService::new(Arc::new(FakeStore::with_data(data)), Config::default());
    AppState {
        service: Arc::new(service),
    }
}

async fn spawn_server(state: AppState) -> std::net::SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    let app = build_router(state);
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

async fn get_json(addr: std::net::SocketAddr, path: &str) -> (u16, Value) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let req = format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    stream.write_all(req.as_bytes()).await.expect("write request");

    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .await
        .expect("read response");
    let response = String::from_utf8(response).expect("utf8 response");

    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("status line");
    let value = serde_json::from_str(body).expect("json body");
    (status, value)
}

#[tokio::test]
async fn test_leaderboard_pipeline_over_fake_store() {
    let service = LegcoService::new(
        Arc::new(FakeStore::with_data(fixture_data())),
        Config::default(),
    );

    let rows = service
        .member_leaderboard(SortKey::Id, SortOrder::Asc)
        .await
        .expect("leaderboard");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].member.id, 1);
    assert_eq!(rows[1].member.id, 2);

    // Member 2 voted in June and July; the leaderboard carries July only.
    let rate = &rows[1].rates.vote_rate;
    assert_eq!(rate.len(), 1);
    assert_eq!(rate[0]["2019-07-01 00:00:00"].vote_count, 1);
}

#[tokio::test]
async fn test_members_route_sorts_and_defaults() {
    let addr = spawn_server(app_state(fixture_data())).await;

    let (status, body) = get_json(addr, "/legco/members/").await;
    assert_eq!(status, 200);
    let rows = body.as_array().expect("array body");
    assert_eq!(rows.len(), 2);
    // Default sort is id ascending.
    assert_eq!(rows[0]["id"], 1);
    assert_eq!(rows[1]["id"], 2);
    // Roster fields and identity fields are merged flat.
    assert_eq!(rows[0]["political_affiliation"], "測試黨");
    assert_eq!(rows[1]["political_affiliation"], Value::Null);

    let (status, body) = get_json(addr, "/legco/members/id/desc/").await;
    assert_eq!(status, 200);
    let rows = body.as_array().expect("array body");
    assert_eq!(rows[0]["id"], 2);
}

#[tokio::test]
async fn test_members_route_rejects_unknown_sort_with_empty_object() {
    let addr = spawn_server(app_state(fixture_data())).await;

    let (status, body) = get_json(addr, "/legco/members/popularity/").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({}));

    let (status, body) = get_json(addr, "/legco/members/id/sideways/").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_member_route_serves_full_history_and_404() {
    let addr = spawn_server(app_state(fixture_data())).await;

    let (status, body) = get_json(addr, "/legco/member/2/").await;
    assert_eq!(status, 200);
    assert_eq!(body["name_zh"], "李小明");
    let vote_rate = body["vote_rate"].as_array().expect("vote_rate array");
    assert_eq!(vote_rate.len(), 2);

    let empty = app_state(json!({
        "legco_IndividualVote": [],
        "legco_Individual": [],
        "legco_CouncilMembers": []
    }));
    let addr = spawn_server(empty).await;
    let (status, _) = get_json(addr, "/legco/member/2/").await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_hot_news_route_groups_members() {
    let data = json!({
        "legco_IndividualNews": [
            {
                "News": {"date": "2020-01-02", "image": null, "link": "http://example.org/a", "title": "一", "key": "a"},
                "engagement": {"engagement": 5},
                "member": {"id": 1, "name_ch": "陳大文", "image": null}
            },
            {
                "News": {"date": "2020-01-02", "image": null, "link": "http://example.org/a", "title": "一", "key": "a"},
                "engagement": {"engagement": 5},
                "member": {"id": 2, "name_ch": "李小明", "image": null}
            },
            {
                "News": {"date": "2020-01-03", "image": null, "link": "http://example.org/b", "title": "二", "key": "b"},
                "engagement": {"engagement": 9},
                "member": {"id": 1, "name_ch": "陳大文", "image": null}
            }
        ]
    });
    let addr = spawn_server(app_state(data)).await;

    let (status, body) = get_json(addr, "/legco/hot_news/").await;
    assert_eq!(status, 200);
    let entries = body.as_array().expect("array body");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["key"], "b");
    assert_eq!(entries[1]["members"].as_array().expect("members").len(), 2);
}

#[tokio::test]
async fn test_bill_categories_route_is_static() {
    let addr = spawn_server(app_state(json!({}))).await;

    let (status, body) = get_json(addr, "/legco/bill_categories/").await;
    assert_eq!(status, 200);
    let rows = body.as_array().expect("array body");
    assert_eq!(rows.len(), 18);
    assert_eq!(rows[0]["id"], 1);
    assert_eq!(rows[16]["title_en"], "Transport");
}

#[tokio::test]
async fn test_budget_meeting_route() {
    let data = json!({
        "legco_BudgetQMeeting": [
            {"id": 11, "year": 2020, "bureau": {"id": 4, "bureau": "FHB", "name_ch": "食物及衞生局", "name_en": "Food and Health Bureau"}}
        ]
    });
    let addr = spawn_server(app_state(data)).await;

    let (status, body) = get_json(addr, "/budget/meeting/2020/").await;
    assert_eq!(status, 200);
    assert_eq!(body[0]["year"], 2020);
    assert_eq!(body[0]["bureau"]["bureau"], "FHB");
}
