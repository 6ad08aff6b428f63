//! Error types for gigboard-web
//!
//! Two families: `CommandError` for form submissions, which never reaches the
//! client as a status code and is turned into a failure notification, and
//! `PageError` for page reads, which renders the generic 404/500 pages.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::forms::ValidationError;
use crate::views;

/// Failure of a create/update/delete submission
#[derive(Debug, Error)]
pub enum CommandError {
    /// A required field was missing or malformed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store rejected the operation (constraint, connectivity, missing row)
    #[error(transparent)]
    Store(#[from] gigboard_common::Error),
}

impl CommandError {
    /// True when the submission targeted a row that does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, CommandError::Store(err) if err.is_not_found())
    }
}

impl From<sqlx::Error> for CommandError {
    fn from(err: sqlx::Error) -> Self {
        CommandError::Store(err.into())
    }
}

/// Failure while assembling a page
#[derive(Debug, Error)]
pub enum PageError {
    /// Requested entity or route does not exist (404)
    #[error("Resource not found")]
    NotFound,

    /// Anything else (500)
    #[error(transparent)]
    Store(gigboard_common::Error),
}

impl From<gigboard_common::Error> for PageError {
    fn from(err: gigboard_common::Error) -> Self {
        if err.is_not_found() {
            PageError::NotFound
        } else {
            PageError::Store(err)
        }
    }
}

impl From<sqlx::Error> for PageError {
    fn from(err: sqlx::Error) -> Self {
        gigboard_common::Error::from(err).into()
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound => {
                (StatusCode::NOT_FOUND, Html(views::errors::not_found_page())).into_response()
            }
            PageError::Store(err) => {
                error!("Page request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(views::errors::server_error_page()),
                )
                    .into_response()
            }
        }
    }
}

/// Result type for page handlers
pub type PageResult<T> = Result<T, PageError>;

/// Parse an `{id}` path segment; anything but a decimal integer is a 404
pub fn parse_id(raw: &str) -> PageResult<i64> {
    raw.parse::<i64>().map_err(|_| PageError::NotFound)
}
