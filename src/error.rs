use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Username and password are required")]
    MissingCredentials,

    #[error("Forbidden")]
    Forbidden,
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(e: argon2::password_hash::Error) -> Self {
        AppError::PasswordHash(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden").into_response(),
            AppError::UsernameTaken => {
                (StatusCode::CONFLICT, "Username already taken").into_response()
            }
            AppError::MissingCredentials => {
                (StatusCode::BAD_REQUEST, "Username and password are required").into_response()
            }
            AppError::DatabaseError(_)
            | AppError::PasswordHash(_)
            | AppError::Config(_) => {
                error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.",
                )
                    .into_response()
            }
        }
    }
}

/// Rejections for the feedback form body. Each one is recoverable: the form is shown again.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum FeedbackFormError {
    #[error("Course is required.")]
    MissingCourse,

    #[error("Rating is required.")]
    MissingRating,

    #[error("Rating must be a whole number, got {0:?}.")]
    InvalidRating(String),
}
