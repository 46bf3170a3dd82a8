//! Server-rendered HTML pages.
//!
//! Every value that came from a user goes through [`escape`] before it is
//! written into markup.

use axum::response::Html;
use std::fmt::Write;

use crate::db::Feedback;

/// Raw form values echoed back when the feedback form is shown again.
#[derive(Debug, Default, Clone)]
pub struct FeedbackFormValues {
    pub course: String,
    pub rating: String,
    pub comments: String,
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<nav><a href="/">Feedback</a> | <a href="/admin">Admin</a>
<form method="post" action="/logout" style="display:inline"><button type="submit">Log out</button></form></nav>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
    ))
}

fn error_block(error: Option<&str>) -> String {
    error
        .map(|msg| format!(r#"<p class="error">{}</p>"#, escape(msg)))
        .unwrap_or_default()
}

pub fn feedback_form(error: Option<&str>, values: &FeedbackFormValues) -> Html<String> {
    let body = format!(
        r#"<h1>Course Feedback</h1>
{error}
<form method="post" action="/">
<label>Course <input type="text" name="course" value="{course}" required></label>
<label>Rating <input type="number" name="rating" value="{rating}" required></label>
<label>Comments <textarea name="comments">{comments}</textarea></label>
<button type="submit">Submit</button>
</form>"#,
        error = error_block(error),
        course = escape(&values.course),
        rating = escape(&values.rating),
        comments = escape(&values.comments),
    );
    layout("Course Feedback", &body)
}

pub fn thanks() -> Html<String> {
    layout(
        "Thank you",
        r#"<h1>Thank you!</h1>
<p>Your feedback has been recorded.</p>
<p><a href="/">Submit more feedback</a></p>"#,
    )
}

pub fn admin_list(feedbacks: &[Feedback]) -> Html<String> {
    let mut rows = String::new();
    if feedbacks.is_empty() {
        rows.push_str(r#"<tr><td colspan="5">No feedback yet.</td></tr>"#);
    }
    for fb in feedbacks {
        // writing into a String cannot fail
        let _ = writeln!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&fb.course),
            fb.rating,
            escape(&fb.comments),
            escape(&fb.username),
            fb.created_at.format("%Y-%m-%d %H:%M"),
        );
    }
    let body = format!(
        r#"<h1>All Feedback ({count})</h1>
<table>
<thead><tr><th>Course</th><th>Rating</th><th>Comments</th><th>User</th><th>Submitted</th></tr></thead>
<tbody>
{rows}</tbody>
</table>"#,
        count = feedbacks.len(),
    );
    layout("All Feedback", &body)
}

pub fn login_form(error: Option<&str>, username: &str, next: Option<&str>) -> Html<String> {
    let next_field = next
        .map(|n| format!(r#"<input type="hidden" name="next" value="{}">"#, escape(n)))
        .unwrap_or_default();
    let body = format!(
        r#"<h1>Log in</h1>
{error}
<form method="post" action="/login">
{next_field}
<label>Username <input type="text" name="username" value="{username}" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Log in</button>
</form>
<p>No account? <a href="/register">Register</a></p>"#,
        error = error_block(error),
        username = escape(username),
    );
    layout("Log in", &body)
}

pub fn register_form(error: Option<&str>, username: &str) -> Html<String> {
    let body = format!(
        r#"<h1>Register</h1>
{error}
<form method="post" action="/register">
<label>Username <input type="text" name="username" value="{username}" required></label>
<label>Password <input type="password" name="password" required></label>
<button type="submit">Register</button>
</form>
<p>Already registered? <a href="/login">Log in</a></p>"#,
        error = error_block(error),
        username = escape(username),
    );
    layout("Register", &body)
}
