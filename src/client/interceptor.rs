//! Outgoing request authorization
//!
//! Every request the client sends passes through [`AuthInterceptor`]: on the
//! way out it picks up the bearer token, on the way back a 401 ends the
//! session.

use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde_json::Value;

use crate::client::models::ApiResponse;
use crate::error::{ApiError, Result};
use crate::navigation::{Navigator, routes};
use crate::session::TokenStore;

/// URL fragments that never carry a bearer token.
///
/// Matched case-sensitively anywhere in the request URL.
pub const PUBLIC_ENDPOINTS: &[&str] = &[
    "/auth/login",
    "/auth/register",
    "/assets/",
    "/api/auth/login",
    "/api/auth/register",
];

/// Attaches the session token and reacts to rejected sessions
#[derive(Clone)]
pub struct AuthInterceptor {
    store: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
}

impl AuthInterceptor {
    pub fn new(store: Arc<dyn TokenStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { store, navigator }
    }

    /// Whether `url` is on the public allow-list
    pub fn is_public(url: &str) -> bool {
        PUBLIC_ENDPOINTS.iter().any(|endpoint| url.contains(endpoint))
    }

    /// Add `Authorization: Bearer <token>` to non-public requests.
    ///
    /// Without a token the request goes out unauthenticated.
    pub fn authorize(&self, request: &mut reqwest::Request) {
        if Self::is_public(request.url().as_str()) {
            return;
        }

        let Some(token) = self.store.get().filter(|t| !t.is_empty()) else {
            log::debug!("No session token for {}", request.url());
            return;
        };

        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            Err(_) => log::warn!("Stored token is not a valid header value; sending without it"),
        }
    }

    /// Check a response status.
    ///
    /// A 401 clears the stored token, redirects to `/login` and comes back as
    /// [`ApiError::Unauthorized`] carrying the envelope message from `body`,
    /// if there is one. Other statuses pass through.
    pub fn inspect(&self, url: &str, status: StatusCode, body: &str) -> Result<()> {
        if status != StatusCode::UNAUTHORIZED {
            return Ok(());
        }

        log::info!("{} rejected the session; signing out", url);
        self.store.remove();
        self.navigator.navigate(routes::LOGIN);

        let message = serde_json::from_str::<ApiResponse<Value>>(body)
            .ok()
            .and_then(|envelope| envelope.message)
            .filter(|m| !m.is_empty());
        Err(ApiError::Unauthorized(message).into())
    }
}
