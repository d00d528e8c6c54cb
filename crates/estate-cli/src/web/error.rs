//! HTTP error responses.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use estate_core::MarketError;
use log::{error, warn};

use super::{pages, session::with_flash};

/// Error returned by page handlers.
///
/// Validation failures, conflicts and missing enrollment are shown to the
/// user as a flash message on the page they came from; the rest become an
/// error page with a matching status.
pub enum WebError {
    Market(MarketError),
    Flash {
        jar: PrivateCookieJar,
        to: String,
    },
}

impl From<MarketError> for WebError {
    fn from(e: MarketError) -> Self {
        WebError::Market(e)
    }
}

/// Turns recoverable marketplace errors into a flash and redirect.
pub trait FlashOnError<T> {
    fn or_flash(self, jar: &PrivateCookieJar, to: &str) -> Result<T, WebError>;
}

impl<T> FlashOnError<T> for estate_core::Result<T> {
    fn or_flash(self, jar: &PrivateCookieJar, to: &str) -> Result<T, WebError> {
        self.map_err(|e| match e {
            MarketError::InvalidInput { .. }
            | MarketError::Conflict { .. }
            | MarketError::NotEnrolled { .. } => WebError::Flash {
                jar: with_flash(jar.clone(), e.to_string()),
                to: to.to_string(),
            },
            other => WebError::Market(other),
        })
    }
}

fn status_for(e: &MarketError) -> StatusCode {
    match e {
        MarketError::AccessDenied { .. } | MarketError::NotLoggedIn => StatusCode::FORBIDDEN,
        MarketError::NotFound { .. } => StatusCode::NOT_FOUND,
        MarketError::InvalidInput { .. }
        | MarketError::Conflict { .. }
        | MarketError::NotEnrolled { .. }
        | MarketError::Session(_) => StatusCode::BAD_REQUEST,
        MarketError::Database { .. }
        | MarketError::FileSystem { .. }
        | MarketError::XdgDirectory(_)
        | MarketError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::Flash { jar, to } => (jar, Redirect::to(&to)).into_response(),
            WebError::Market(e) => {
                let status = status_for(&e);
                let message = if status.is_server_error() {
                    error!("Request failed: {e}");
                    "An internal error occurred.".to_string()
                } else {
                    warn!("Request rejected ({status}): {e}");
                    e.to_string()
                };
                (status, Html(pages::error_page(status, &message))).into_response()
            }
        }
    }
}
