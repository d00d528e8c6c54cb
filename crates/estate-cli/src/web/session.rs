//! Cookie-backed login sessions and one-shot flash messages.
//!
//! Both live in private (encrypted and authenticated) cookies, so a client
//! can neither read nor forge the `email,role` record.

use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use estate_core::{MarketError, Session};

use super::error::WebError;

const SESSION_COOKIE: &str = "estate_session";
const FLASH_COOKIE: &str = "estate_flash";

/// The logged-in caller, if any. Never rejects.
pub struct MaybeSession(pub Option<Session>);

/// The logged-in caller. Rejects with 403 when nobody is logged in.
pub struct CurrentSession(pub Session);

fn read_session(jar: &PrivateCookieJar) -> Option<Session> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| Session::from_record(cookie.value()).ok())
}

impl<S> FromRequestParts<S> for MaybeSession
where
    Key: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state).await?;
        Ok(Self(read_session(&jar)))
    }
}

impl<S> FromRequestParts<S> for CurrentSession
where
    Key: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let MaybeSession(session) = MaybeSession::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|never| match never {});
        session
            .map(Self)
            .ok_or(WebError::Market(MarketError::NotLoggedIn))
    }
}

fn build_cookie(name: &str, value: String) -> Cookie<'static> {
    Cookie::build(Cookie::new(name.to_string(), value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

pub fn log_in(jar: PrivateCookieJar, session: &Session) -> PrivateCookieJar {
    jar.add(build_cookie(SESSION_COOKIE, session.to_record()))
}

pub fn log_out(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.remove(build_cookie(SESSION_COOKIE, String::new()))
}

/// Queues a message for the next rendered page.
pub fn with_flash(jar: PrivateCookieJar, message: impl Into<String>) -> PrivateCookieJar {
    jar.add(build_cookie(FLASH_COOKIE, message.into()))
}

/// Takes the pending flash message, removing it from the jar.
pub fn take_flash(jar: PrivateCookieJar) -> (PrivateCookieJar, Option<String>) {
    match jar.get(FLASH_COOKIE) {
        Some(cookie) => {
            let message = cookie.value().to_string();
            (jar.remove(build_cookie(FLASH_COOKIE, String::new())), Some(message))
        }
        None => (jar, None),
    }
}
