use std::sync::Arc;

use axum::{Router, extract::FromRef, routing::{get, post}};
use axum_extra::extract::cookie::Key;

use crate::config::Config;
use crate::db::Storage;
use crate::handlers::{auth, feedback};

/// Everything a request handler needs, built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
    pub config: Arc<Config>,
    key: Key,
}

impl AppState {
    pub fn new(storage: Storage, config: Config) -> Self {
        let key = config.session_key();
        Self {
            storage,
            config: Arc::new(config),
            key,
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(feedback::feedback_page).post(feedback::submit_feedback))
        .route("/thanks", get(feedback::thanks_page))
        .route("/admin", get(feedback::admin_page))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .with_state(state)
}
