use axum_extra::extract::cookie::Key;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};

use crate::error::AppError;

/// Runtime configuration, read from the environment on top of local-development defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Secret used to derive the session cookie key.
    pub secret_key: String,
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub loglevel: String,
    /// Mark the session cookie `Secure`; leave off when serving plain HTTP locally.
    pub secure_cookie: bool,
    /// Comma-separated usernames that are granted the admin flag at registration.
    pub admin_users: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            secret_key: "dev-secret".to_string(),
            database_url: "sqlite:local.db".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
            loglevel: "debug".to_string(),
            secure_cookie: false,
            admin_users: String::new(),
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::raw().only(&[
            "secret_key",
            "database_url",
            "host",
            "port",
            "loglevel",
            "secure_cookie",
            "admin_users",
        ]))
    }

    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self::figment().extract()?)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Cookie encryption key. SHA-512 stretches any secret to the 64 bytes `Key` expects.
    pub fn session_key(&self) -> Key {
        let digest = Sha512::digest(self.secret_key.as_bytes());
        Key::from(digest.as_slice())
    }

    pub fn is_admin_username(&self, username: &str) -> bool {
        self.admin_users
            .split(',')
            .map(str::trim)
            .any(|name| !name.is_empty() && name == username)
    }
}
