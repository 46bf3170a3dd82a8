use axum::{
    Form,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::debug;

use crate::db::NewFeedback;
use crate::error::FeedbackFormError;
use crate::views::{self, FeedbackFormValues};

/// Urlencoded body of the feedback form. Absent fields read as empty.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FeedbackFormBody {
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub comments: String,
}

impl FeedbackFormBody {
    /// Trim every field and require a course and a base-10 integer rating.
    pub fn validate(&self) -> Result<NewFeedback, FeedbackFormError> {
        let course = self.course.trim();
        let rating = self.rating.trim();
        let comments = self.comments.trim();

        if course.is_empty() {
            return Err(FeedbackFormError::MissingCourse);
        }
        if rating.is_empty() {
            return Err(FeedbackFormError::MissingRating);
        }
        let rating = rating
            .parse::<i64>()
            .map_err(|_| FeedbackFormError::InvalidRating(rating.to_string()))?;

        Ok(NewFeedback {
            course: course.to_string(),
            rating,
            comments: comments.to_string(),
        })
    }

    fn into_values(self) -> FeedbackFormValues {
        FeedbackFormValues {
            course: self.course,
            rating: self.rating,
            comments: self.comments,
        }
    }
}

/// A feedback submission that passed validation. On failure the form is
/// rendered again with the error and a 422, and nothing is written.
pub struct FeedbackSubmission(pub NewFeedback);

impl<S> FromRequest<S> for FeedbackSubmission
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(body) = match Form::<FeedbackFormBody>::from_request(req, state).await {
            Ok(v) => v,
            Err(rejection) => return Err(rejection.into_response()),
        };

        match body.validate() {
            Ok(feedback) => Ok(FeedbackSubmission(feedback)),
            Err(err) => {
                debug!(error = %err, "rejected feedback form");
                let page = views::feedback_form(Some(&err.to_string()), &body.into_values());
                Err((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(course: &str, rating: &str, comments: &str) -> FeedbackFormBody {
        FeedbackFormBody {
            course: course.to_string(),
            rating: rating.to_string(),
            comments: comments.to_string(),
        }
    }

    #[test]
    fn valid_form_is_trimmed() {
        let fb = body("  CS101 ", " 5 ", " great\n").validate().unwrap();
        assert_eq!(
            fb,
            NewFeedback {
                course: "CS101".into(),
                rating: 5,
                comments: "great".into(),
            }
        );
    }

    #[test]
    fn comments_are_optional() {
        let fb = body("CS101", "3", "").validate().unwrap();
        assert_eq!(fb.comments, "");
    }

    #[test]
    fn missing_fields_are_reported() {
        assert_eq!(
            body("   ", "5", "x").validate(),
            Err(FeedbackFormError::MissingCourse)
        );
        assert_eq!(
            body("CS101", "  ", "x").validate(),
            Err(FeedbackFormError::MissingRating)
        );
    }

    #[test]
    fn non_integer_rating_is_a_validation_error() {
        for bad in ["five", "4.5", "0x10", "99999999999999999999"] {
            assert_eq!(
                body("CS101", bad, "").validate(),
                Err(FeedbackFormError::InvalidRating(bad.to_string()))
            );
        }
    }

    #[test]
    fn any_integer_rating_is_accepted() {
        assert_eq!(body("CS101", "-2", "").validate().unwrap().rating, -2);
        assert_eq!(body("CS101", "100", "").validate().unwrap().rating, 100);
    }
}
