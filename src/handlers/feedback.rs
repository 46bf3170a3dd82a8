use axum::{
    extract::State,
    response::{Html, Redirect},
};
use tracing::{info, warn};

use crate::error::AppError;
use crate::middleware::auth::CurrentUser;
use crate::middleware::feedback_form::FeedbackSubmission;
use crate::router::AppState;
use crate::views::{self, FeedbackFormValues};

/// GET / -> empty feedback form.
pub async fn feedback_page(CurrentUser(_user): CurrentUser) -> Html<String> {
    views::feedback_form(None, &FeedbackFormValues::default())
}

/// POST / -> store one feedback row for the session user, then redirect to /thanks.
pub async fn submit_feedback(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    FeedbackSubmission(feedback): FeedbackSubmission,
) -> Result<Redirect, AppError> {
    let course = feedback.course.clone();
    let rating = feedback.rating;
    let id = state.storage.insert_feedback(user.id, feedback).await?;
    info!(feedback_id = id, user_id = user.id, course = %course, rating, "feedback stored");
    Ok(Redirect::to("/thanks"))
}

/// GET /thanks
pub async fn thanks_page() -> Html<String> {
    views::thanks()
}

/// GET /admin -> every feedback row; 403 for non-admins.
pub async fn admin_page(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Html<String>, AppError> {
    if !user.is_admin {
        warn!(user_id = user.id, "non-admin requested feedback listing");
        return Err(AppError::Forbidden);
    }
    let feedbacks = state.storage.list_feedback().await?;
    Ok(views::admin_list(&feedbacks))
}
