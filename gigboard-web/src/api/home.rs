//! Home page handler

use axum::{
    response::{Html, Response},
    routing::get,
    Router,
};

use crate::notify::{Flash, Notification};
use crate::views;
use crate::AppState;

/// GET /
pub async fn home(flash: Flash) -> Response {
    flash.consume(Html(views::home::home_page(flash.notification())))
}

/// Home page carrying a submission's notification, returned with status 200
pub fn home_with(notification: &Notification) -> Html<String> {
    Html(views::home::home_page(Some(notification)))
}

pub fn home_routes() -> Router<AppState> {
    Router::new().route("/", get(home))
}
