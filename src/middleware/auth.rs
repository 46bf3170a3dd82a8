use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use time::Duration;
use tracing::debug;

use crate::db::User;
use crate::router::AppState;

pub const SESSION_COOKIE: &str = "session";
const SESSION_TTL: Duration = Duration::days(7);

/// Issue the session cookie for `user`. The jar encrypts it with the app key.
pub fn start_session(jar: PrivateCookieJar, user: &User, secure: bool) -> PrivateCookieJar {
    let cookie = Cookie::build(Cookie::new(SESSION_COOKIE, user.id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(SESSION_TTL)
        .build();
    jar.add(cookie)
}

pub fn end_session(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.remove(Cookie::build(Cookie::new(SESSION_COOKIE, "")).path("/").build())
}

/// User id stored in the session, if the cookie is present and decrypts.
pub fn session_user_id(jar: &PrivateCookieJar) -> Option<i64> {
    jar.get(SESSION_COOKIE)
        .and_then(|c| c.value().parse::<i64>().ok())
}

/// Only same-site absolute paths are followed after login; anything else lands on `/`.
/// Browsers drop tabs and newlines from URLs, so `/\t/host` would read as `//host`.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(n)
            if n.starts_with('/')
                && !n.starts_with("//")
                && !n.contains('\\')
                && !n.chars().any(|c| c.is_control() || c.is_whitespace()) =>
        {
            n
        }
        _ => "/",
    }
}

pub fn login_redirect(original: &str) -> Redirect {
    let next: String = url::form_urlencoded::byte_serialize(original.as_bytes()).collect();
    Redirect::to(&format!("/login?next={next}"))
}

/// The logged-in user for this request. Rejects with a redirect to the login page.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let original = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| "/".to_string());

        let Ok(jar) = PrivateCookieJar::<Key>::from_request_parts(parts, state).await;
        let Some(user_id) = session_user_id(&jar) else {
            debug!(path = %original, "no session; redirecting to login");
            return Err(login_redirect(&original).into_response());
        };

        match state.storage.get_user_by_id(user_id).await {
            Ok(Some(user)) => Ok(CurrentUser(user)),
            Ok(None) => {
                debug!(user_id, "session references unknown user");
                Err(login_redirect(&original).into_response())
            }
            Err(e) => Err(e.into_response()),
        }
    }
}
