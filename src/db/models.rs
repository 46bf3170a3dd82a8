use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feedback {
    pub id: i64,
    pub course: String,
    pub rating: i64,
    pub comments: String,
    pub user_id: i64,
    /// Submitter's username, joined in for the admin listing.
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// A validated feedback submission, not yet attributed to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub course: String,
    pub rating: i64,
    pub comments: String,
}
