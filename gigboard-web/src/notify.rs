//! User-facing notifications
//!
//! Every form submission produces exactly one `Notification`. Pages rendered
//! in the same response embed it directly; redirects carry it to the next
//! page in a short-lived flash cookie that the next page render clears.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{
        header::{COOKIE, SET_COOKIE},
        request::Parts,
        HeaderValue,
    },
    response::{IntoResponse, Response},
};
use cookie::{time::Duration, Cookie, SameSite};
use std::convert::Infallible;
use tracing::{info, warn};

use crate::error::CommandError;

/// Name of the one-shot flash cookie
pub const FLASH_COOKIE: &str = "gigboard_flash";

const FLASH_MAX_AGE_SECS: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    fn tag(self) -> char {
        match self {
            NotificationKind::Success => 's',
            NotificationKind::Error => 'e',
        }
    }

    fn from_tag(tag: char) -> Option<Self> {
        match tag {
            's' => Some(NotificationKind::Success),
            'e' => Some(NotificationKind::Error),
            _ => None,
        }
    }
}

/// A single message shown to the user after a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }

    /// Set-Cookie header value carrying this notification
    pub fn to_cookie_header(&self) -> HeaderValue {
        let value = format!("{}:{}", self.kind.tag(), self.message);
        let cookie = Cookie::build((FLASH_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(Duration::seconds(FLASH_MAX_AGE_SECS))
            .build();

        header_value(&cookie)
    }

    fn from_cookie_value(value: &str) -> Option<Self> {
        let mut chars = value.chars();
        let kind = NotificationKind::from_tag(chars.next()?)?;
        let message = chars.as_str().strip_prefix(':')?;

        Some(Self {
            kind,
            message: message.to_string(),
        })
    }
}

/// Turn the outcome of a submission into its one notification
///
/// Failures are logged here so handlers do not need to.
pub fn report<T>(
    outcome: &Result<T, CommandError>,
    success: impl FnOnce() -> String,
    failure: impl FnOnce() -> String,
) -> Notification {
    match outcome {
        Ok(_) => {
            let notification = Notification::success(success());
            info!("{}", notification.message);
            notification
        }
        Err(err) => {
            let notification = Notification::error(failure());
            warn!("{} ({})", notification.message, err);
            notification
        }
    }
}

/// Flash notification left by a previous response, if any
#[derive(Debug, Clone, Default)]
pub struct Flash(pub Option<Notification>);

impl Flash {
    pub fn notification(&self) -> Option<&Notification> {
        self.0.as_ref()
    }

    /// Attach a cookie removal to `response` when a flash was consumed
    pub fn consume(&self, response: impl IntoResponse) -> Response {
        let mut response = response.into_response();
        if self.0.is_some() {
            response
                .headers_mut()
                .append(SET_COOKIE, clear_flash_cookie());
        }
        response
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let notification = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(Cookie::split_parse_encoded)
            .filter_map(Result::ok)
            .find(|cookie| cookie.name() == FLASH_COOKIE)
            .and_then(|cookie| Notification::from_cookie_value(cookie.value()));

        Ok(Flash(notification))
    }
}

/// Set-Cookie header value expiring the flash cookie
pub fn clear_flash_cookie() -> HeaderValue {
    let mut cookie = Cookie::build((FLASH_COOKIE, "")).path("/").build();
    cookie.make_removal();
    header_value(&cookie)
}

fn header_value(cookie: &Cookie<'_>) -> HeaderValue {
    // Percent-encoding leaves only visible ASCII, which is always a valid header value
    HeaderValue::from_str(&cookie.encoded().to_string())
        .unwrap_or_else(|_| HeaderValue::from_static(""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::ValidationError;
    use axum::http::Request;

    async fn flash_from(cookie_header: &str) -> Flash {
        let request = Request::builder()
            .header(COOKIE, cookie_header)
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        Flash::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_cookie_round_trip() {
        let notification = Notification::success("Venue The Musical Hop was successfully edited!");
        let header = notification.to_cookie_header();
        let header = header.to_str().unwrap();

        // Browser sends back only name=value
        let pair = header.split(';').next().unwrap();
        let flash = flash_from(&format!("other=1; {}", pair)).await;

        assert_eq!(flash.notification(), Some(&notification));
    }

    #[tokio::test]
    async fn test_missing_or_garbled_cookie_is_none() {
        assert!(flash_from("other=1").await.0.is_none());
        assert!(flash_from("gigboard_flash=nonsense").await.0.is_none());
    }

    #[test]
    fn test_cookie_header_attributes() {
        let header = Notification::error("Error: Show could not be listed!").to_cookie_header();
        let header = header.to_str().unwrap();
        assert!(header.starts_with("gigboard_flash="));
        assert!(header.contains("Path=/"));
        assert!(header.contains("HttpOnly"));
        assert!(header.contains("Max-Age=60"));
    }

    #[test]
    fn test_clear_cookie_expires() {
        let header = clear_flash_cookie();
        let header = header.to_str().unwrap();
        assert!(header.starts_with("gigboard_flash="));
        assert!(header.contains("Max-Age=0"));
    }

    #[test]
    fn test_report_produces_one_notification_per_outcome() {
        let ok: Result<(), CommandError> = Ok(());
        let notification = report(&ok, || "listed".to_string(), || "failed".to_string());
        assert_eq!(notification, Notification::success("listed"));

        let err: Result<(), CommandError> = Err(ValidationError::MissingField("name").into());
        let notification = report(&err, || "listed".to_string(), || "failed".to_string());
        assert_eq!(notification, Notification::error("failed"));
        assert!(notification.is_error());
    }
}
