pub mod auth;
pub mod feedback;
