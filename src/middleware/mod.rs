pub mod auth;
pub mod feedback_form;
