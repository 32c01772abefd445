use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;

use crate::{app::build_app, state::AppState};

pub const PASSWORD: &str = "sunflower-seeds";

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("response body is JSON")
    }

    /// `name=value` pair of the session cookie set by this response.
    pub fn cookie(&self) -> Option<String> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }
}

pub async fn test_app() -> (Router, AppState) {
    let state = AppState::for_tests().await.expect("test state");
    (build_app(state.clone()), state)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    cookie: Option<&str>,
) -> TestResponse {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    let req = match body {
        Some(body) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => req.body(Body::empty()),
    }
    .unwrap();
    send_raw(app, req).await
}

/// Dispatches a hand-built request, for cases `send` cannot express.
pub async fn send_raw(app: &Router, req: Request<Body>) -> TestResponse {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let headers = res.headers().clone();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

/// Signs `username` up and returns the session cookie to send back.
pub async fn signed_in(app: &Router, username: &str) -> String {
    let res = send(
        app,
        Method::POST,
        "/signup",
        Some(json!({ "username": username, "password": PASSWORD })),
        None,
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED, "signup failed: {}", res.body);
    res.cookie().expect("signup sets a session cookie")
}

pub async fn users_named(db: &SqlitePool, username: &str) -> i64 {
    let (n,) = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM users WHERE username = $1")
        .bind(username)
        .fetch_one(db)
        .await
        .unwrap();
    n
}

pub async fn plant_count(db: &SqlitePool) -> i64 {
    let (n,) = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM plants")
        .fetch_one(db)
        .await
        .unwrap();
    n
}
