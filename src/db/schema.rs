//! SQL DDL for the user and feedback tables.
//! Every statement is `IF NOT EXISTS`, so running it against a populated
//! database leaves existing rows untouched.

/// SQLite schema with:
/// - `users.username` UNIQUE
/// - `users.is_admin` BOOLEAN (stored as INTEGER 0/1)
/// - `feedback.user_id` referencing `users(id)`
/// - `created_at` columns as RFC3339 text
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    is_admin INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL -- RFC3339
);

CREATE TABLE IF NOT EXISTS feedback (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    course TEXT NOT NULL,
    rating INTEGER NOT NULL,
    comments TEXT NOT NULL DEFAULT '',
    user_id INTEGER NOT NULL REFERENCES users(id),
    created_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_feedback_user_id ON feedback(user_id);
"#;
