#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use course_feedback::{AppState, Config, app_router, db, db::Storage};
use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

pub const FORM: &str = "application/x-www-form-urlencoded";

/// A router over its own temp-file SQLite database.
pub struct TestApp {
    pub app: Router,
    pub storage: Storage,
    pub database_url: String,
    path: PathBuf,
}

impl TestApp {
    pub async fn new(admin_users: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();

        let mut path = std::env::temp_dir();
        path.push(format!(
            "course-feedback-{}-{}.sqlite",
            std::process::id(),
            nanos
        ));

        let database_url = format!("sqlite:{}", path.display());
        let pool = db::connect(&database_url).await.expect("failed to open db");
        let storage = Storage::new(pool);
        storage.init_schema().await.expect("failed to init schema");

        let cfg = Config {
            database_url: database_url.clone(),
            secret_key: "test-secret".to_string(),
            admin_users: admin_users.to_string(),
            ..Config::default()
        };
        let app = app_router(AppState::new(storage.clone(), cfg));

        Self {
            app,
            storage,
            database_url,
            path,
        }
    }

    pub async fn send(&self, req: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(req).await.expect("request failed")
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).expect("failed to build request"))
            .await
    }

    pub async fn post_form(&self, uri: &str, body: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, FORM);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(
            builder
                .body(Body::from(body.to_string()))
                .expect("failed to build request"),
        )
        .await
    }

    /// Register `username` and return the `name=value` session cookie it was issued.
    pub async fn register(&self, username: &str, password: &str) -> String {
        let resp = self
            .post_form(
                "/register",
                &format!("username={username}&password={password}"),
                None,
            )
            .await;
        assert!(resp.status().is_redirection(), "register failed: {}", resp.status());
        session_cookie(&resp).expect("register did not set a session cookie")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
        let _ = fs::remove_file(format!("{}-wal", self.path.display()));
        let _ = fs::remove_file(format!("{}-shm", self.path.display()));
    }
}

pub fn session_cookie(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("session="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

pub fn location(resp: &Response<Body>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

pub async fn body_string(resp: Response<Body>) -> String {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(body.to_vec()).expect("response body was not utf-8")
}
