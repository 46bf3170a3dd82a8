use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Deserialize;
use tracing::info;

use crate::error::AppError;
use crate::middleware::auth::{end_session, safe_next, session_user_id, start_session};
use crate::router::AppState;
use crate::service::accounts;
use crate::views;

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// GET /login
pub async fn login_page(Query(query): Query<LoginQuery>) -> Html<String> {
    views::login_form(None, "", query.next.as_deref())
}

/// POST /login -> sets the session cookie and follows `next` when it is a local path.
pub async fn login(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let Some(user) = accounts::authenticate(&state.storage, &form.username, &form.password).await?
    else {
        let page = views::login_form(
            Some("Invalid username or password."),
            &form.username,
            form.next.as_deref(),
        );
        return Ok((StatusCode::UNAUTHORIZED, page).into_response());
    };

    let jar = start_session(jar, &user, state.config.secure_cookie);
    info!(user_id = user.id, "user logged in");
    let target = safe_next(form.next.as_deref());
    Ok((jar, Redirect::to(target)).into_response())
}

/// GET /register
pub async fn register_page() -> Html<String> {
    views::register_form(None, "")
}

/// POST /register -> creates the account and logs it in.
pub async fn register(
    State(state): State<AppState>,
    jar: PrivateCookieJar,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    match accounts::register(&state.storage, &state.config, &form.username, &form.password).await {
        Ok(user) => {
            let jar = start_session(jar, &user, state.config.secure_cookie);
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(err @ (AppError::UsernameTaken | AppError::MissingCredentials)) => {
            let status = match err {
                AppError::UsernameTaken => StatusCode::CONFLICT,
                _ => StatusCode::BAD_REQUEST,
            };
            let page = views::register_form(Some(&err.to_string()), form.username.trim());
            Ok((status, page).into_response())
        }
        Err(err) => Err(err),
    }
}

/// POST /logout -> drops the session cookie.
pub async fn logout(jar: PrivateCookieJar) -> impl IntoResponse {
    if let Some(user_id) = session_user_id(&jar) {
        info!(user_id, "user logged out");
    }
    (end_session(jar), Redirect::to("/login"))
}
