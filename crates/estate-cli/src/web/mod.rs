//! Web front end over the same marketplace as the command line.
//!
//! ```text
//! ┌──────────┐   ┌──────────────┐   ┌─────────────┐   ┌─────────────┐
//! │ Browser  │──▶│ axum Router  │──▶│  handlers   │──▶│ Marketplace │
//! └──────────┘   │ (WebState)   │   │ forms/pages │   └─────────────┘
//!                └──────────────┘   └─────────────┘
//! ```
//!
//! Sessions and flash messages are kept in private cookies encrypted with
//! the server's [`Key`].

mod error;
mod forms;
mod handlers;
mod pages;
mod session;
#[cfg(test)]
mod tests;

use anyhow::{anyhow, Context, Result};
use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::Key;
use estate_core::Marketplace;
use log::{info, warn};
use tokio::net::TcpListener;

use crate::cli::ServeArgs;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct WebState {
    pub market: Marketplace,
    key: Key,
}

impl WebState {
    pub fn new(market: Marketplace, key: Key) -> Self {
        Self { market, key }
    }
}

impl FromRef<WebState> for Key {
    fn from_ref(state: &WebState) -> Self {
        state.key.clone()
    }
}

pub fn router(state: WebState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        .route("/login", post(handlers::login))
        .route("/logout", get(handlers::logout))
        .route("/register", post(handlers::register))
        .route(
            "/addresses",
            get(handlers::addresses_page).post(handlers::add_address),
        )
        .route("/addresses/{id}/edit", post(handlers::edit_address))
        .route("/addresses/{id}/delete", post(handlers::delete_address))
        .route("/cards", get(handlers::cards_page).post(handlers::add_card))
        .route("/cards/{number}/edit", post(handlers::edit_card))
        .route("/cards/{number}/delete", post(handlers::delete_card))
        .route(
            "/properties",
            get(handlers::properties_page).post(handlers::add_property),
        )
        .route("/properties/{id}/edit", post(handlers::edit_property))
        .route("/properties/{id}/delete", post(handlers::delete_property))
        .route(
            "/search",
            get(handlers::search_page).post(handlers::search_form),
        )
        .route("/bookings", get(handlers::bookings_page))
        .route("/bookings/{id}/cancel", post(handlers::cancel_booking))
        .route("/book/{property_id}", post(handlers::book))
        .route(
            "/neighborhoods",
            get(handlers::neighborhoods_page).post(handlers::add_neighborhood),
        )
        .route("/neighborhoods/{name}/edit", post(handlers::edit_neighborhood))
        .route("/rewards", get(handlers::rewards_page))
        .route("/rewards/history", get(handlers::reward_history_page))
        .route("/rewards/join", post(handlers::join_rewards))
        .with_state(state)
}

/// Builds the cookie key from a configured secret, or generates one that
/// lasts until the process exits.
fn cookie_key(secret: Option<&str>) -> Result<Key> {
    match secret {
        Some(secret) => Key::try_from(secret.as_bytes())
            .map_err(|_| anyhow!("Cookie secret must be at least 64 bytes long")),
        None => {
            warn!("No cookie secret configured; sessions will not survive a restart");
            Ok(Key::generate())
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
    }
    info!("Shutting down web server");
}

/// Serves the web interface until interrupted.
pub async fn serve(market: Marketplace, args: ServeArgs) -> Result<()> {
    let key = cookie_key(args.cookie_secret.as_deref())?;
    let app = router(WebState::new(market, key));

    let addr = format!("{}:{}", args.host, args.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("HTTP server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}
