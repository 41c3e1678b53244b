use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use usradm::api::HttpUserApi;
use usradm::models::AppState;
use usradm::routes::build_router;

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn list(
    State(hits): State<Arc<AtomicUsize>>,
    Query(q): Query<HashMap<String, String>>,
) -> Json<Value> {
    hits.fetch_add(1, Ordering::SeqCst);
    let page = q.get("page").cloned().unwrap_or_default();
    Json(json!({
        "code": 200,
        "message": "success",
        "data": [{
            "id": 7,
            "username": format!("page{}-user", page),
            "balance": 3,
            "status": 1,
            "role": 0,
            "createTime": null
        }]
    }))
}

async fn update_role(Path(id): Path<i64>) -> Json<Value> {
    if id == 13 {
        return Json(json!({"code": 403, "message": "not allowed", "data": null}));
    }
    Json(json!({"code": 200, "message": "success", "data": true}))
}

/// Panel URL plus the number of list requests the backend has served.
async fn start_panel() -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let backend = Router::new()
        .route("/api/user/list", get(list))
        .route(
            "/api/user/count",
            get(|| async { Json(json!({"code": 200, "message": "success", "data": 35})) }),
        )
        .route("/api/user/:id/role", put(update_role))
        .with_state(hits.clone());
    let backend_url = serve(backend).await;

    usradm::api::set_silent(true);
    let api = HttpUserApi::new(reqwest::Client::new(), backend_url, "");
    let state = AppState::new(api);
    (serve(build_router(state)).await, hits)
}

/// The `name=value` part of the session cookie a response sets.
fn session_cookie(resp: &reqwest::Response) -> String {
    resp.headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .expect("session cookie")
        .to_string()
}

#[tokio::test]
async fn users_page_renders_table_and_pagination() {
    let (panel, _) = start_panel().await;
    let body = reqwest::get(format!("{}/users?status=1&page=2", panel))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("page2-user"));
    assert!(body.contains(r#"<option value="1" selected>Active</option>"#));
    assert!(body.contains(r#"<li class="page-item active">"#));
    assert!(body.contains("/users?username=&status=1&role=&page=3"));
    assert!(!body.contains("updateRoleModal"));
}

#[tokio::test]
async fn edit_link_opens_the_modal() {
    let (panel, _) = start_panel().await;
    let body = reqwest::get(format!("{}/users/7/role?role=1", panel))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains(r#"id="updateRoleModal""#));
    assert!(body.contains(r#"name="user_id" value="7""#));
    assert!(body.contains(r#"<option value="1" selected>Admin</option>"#));
}

#[tokio::test]
async fn saving_a_role_reloads_page_one_with_a_toast() {
    let (panel, _) = start_panel().await;
    let client = reqwest::Client::new();
    let resp = client.get(format!("{}/users?page=3", panel)).send().await.unwrap();
    let cookie = session_cookie(&resp);
    assert!(resp.text().await.unwrap().contains("page3-user"));

    let body = client
        .post(format!("{}/users/role", panel))
        .header("cookie", &cookie)
        .form(&[("user_id", "7"), ("role", "1")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("Role updated"));
    assert!(body.contains("page1-user"));
    assert!(!body.contains("updateRoleModal"));
}

#[tokio::test]
async fn failed_save_keeps_the_modal_open() {
    let (panel, _) = start_panel().await;
    let body = reqwest::Client::new()
        .post(format!("{}/users/role", panel))
        .form(&[("user_id", "13"), ("role", "1")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("Failed to update role: not allowed"));
    assert!(body.contains(r#"name="user_id" value="13""#));
}

#[tokio::test]
async fn stylesheet_is_served() {
    let (panel, _) = start_panel().await;
    let resp = reqwest::get(format!("{}/static/styles.css", panel)).await.unwrap();
    assert_eq!(
        resp.headers().get("content-type").and_then(|v| v.to_str().ok()),
        Some("text/css")
    );
    assert!(resp.text().await.unwrap().contains(".pagination"));
}

#[tokio::test]
async fn sessions_do_not_share_panel_state() {
    let (panel, _) = start_panel().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/users/7/role?role=0", panel))
        .send()
        .await
        .unwrap();
    let operator_a = session_cookie(&resp);
    assert!(resp.text().await.unwrap().contains(r#"id="updateRoleModal""#));

    let resp = client
        .get(format!("{}/users?username=bob", panel))
        .send()
        .await
        .unwrap();
    let operator_b = session_cookie(&resp);
    assert_ne!(operator_a, operator_b);
    let body = resp.text().await.unwrap();
    assert!(!body.contains("updateRoleModal"));
    assert!(body.contains(r#"value="bob""#));

    let body = client
        .get(format!("{}/users", panel))
        .header("cookie", &operator_a)
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains(r#"id="updateRoleModal""#));
    assert!(!body.contains(r#"value="bob""#));
}

#[tokio::test]
async fn opening_the_dialog_reuses_the_loaded_table() {
    let (panel, hits) = start_panel().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{}/users?page=2", panel))
        .send()
        .await
        .unwrap();
    let cookie = session_cookie(&resp);
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    let resp = client
        .get(format!("{}/users/7/role?role=1", panel))
        .header("cookie", &cookie)
        .send()
        .await
        .unwrap();
    assert!(resp.headers().get("set-cookie").is_none());
    let body = resp.text().await.unwrap();
    assert!(body.contains(r#"id="updateRoleModal""#));
    assert!(body.contains("page2-user"));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}
