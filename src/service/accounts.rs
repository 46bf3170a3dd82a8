use tracing::{info, warn};

use crate::config::Config;
use crate::db::{Storage, User};
use crate::error::AppError;
use crate::service::password::{hash_password, verify_password};

/// Create an account. Usernames listed in `admin_users` get the admin flag.
pub async fn register(
    storage: &Storage,
    cfg: &Config,
    username: &str,
    password: &str,
) -> Result<User, AppError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AppError::MissingCredentials);
    }

    let password_hash = hash_password(password)?;
    let is_admin = cfg.is_admin_username(username);
    let user = storage.create_user(username, &password_hash, is_admin).await?;
    info!(user_id = user.id, username = %user.username, is_admin, "registered user");
    Ok(user)
}

/// Check a username/password pair. Unknown users and wrong passwords both return `None`.
pub async fn authenticate(
    storage: &Storage,
    username: &str,
    password: &str,
) -> Result<Option<User>, AppError> {
    let username = username.trim();
    let Some(user) = storage.get_user_by_username(username).await? else {
        warn!(username = %username, "login for unknown user");
        return Ok(None);
    };
    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = user.id, "login with wrong password");
        return Ok(None);
    }
    Ok(Some(user))
}
