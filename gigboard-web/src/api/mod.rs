//! HTTP handlers for gigboard-web

use std::any::Any;

use axum::{
    body::Body,
    http::{header::SET_COOKIE, Response, StatusCode},
    response::{Html, IntoResponse, Redirect},
};
use tracing::error;

use crate::error::CommandError;
use crate::forms::FormFields;
use crate::notify::Notification;
use crate::views;

pub mod artists;
pub mod health;
pub mod home;
pub mod shows;
pub mod venues;

pub use artists::artist_routes;
pub use health::health_routes;
pub use home::home_routes;
pub use shows::show_routes;
pub use venues::venue_routes;

/// 303 redirect carrying `notification` in the flash cookie
pub(crate) fn redirect_with(location: &str, notification: &Notification) -> Response<Body> {
    let mut response = Redirect::to(location).into_response();
    response
        .headers_mut()
        .append(SET_COOKIE, notification.to_cookie_header());
    response
}

/// Response to an edit submission
///
/// Edits redirect to the detail page with the notification in the flash
/// cookie. When the target row does not exist there is no detail page to
/// carry it, so the home page renders the failure directly.
pub(crate) fn edit_response<T>(
    outcome: &Result<T, CommandError>,
    location: &str,
    notification: &Notification,
) -> Response<Body> {
    match outcome {
        Err(err) if err.is_not_found() => home::home_with(notification).into_response(),
        _ => redirect_with(location, notification),
    }
}

/// Name as submitted, for notifications; empty when the field is missing
pub(crate) fn submitted_name(fields: &FormFields) -> String {
    fields.get("name").unwrap_or_default().trim().to_string()
}

/// Router fallback for unknown paths
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(views::errors::not_found_page()))
}

/// Render a handler panic as the generic 500 page
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("Handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(views::errors::server_error_page()),
    )
        .into_response()
}
