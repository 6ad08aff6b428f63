//! Generic error pages
//!
//! Neither page shows error details; those go to the log.

use super::layout;

pub fn not_found_page() -> String {
    layout(
        "Not Found",
        None,
        r#"        <h1>404</h1>
        <p>Sorry, the page you were looking for does not exist.</p>
        <p><a href="/">Back to home</a></p>"#,
    )
}

pub fn server_error_page() -> String {
    layout(
        "Server Error",
        None,
        r#"        <h1>500</h1>
        <p>Sorry, something went wrong on our end. Please try again.</p>
        <p><a href="/">Back to home</a></p>"#,
    )
}
