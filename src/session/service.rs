//! Session service
//!
//! Owns the session state and is its only writer. Every endpoint that hands
//! out a token goes through the same path: store it, decode it, publish the
//! identity.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::decoder;
use super::state::SessionState;
use super::store::TokenStore;
use crate::client::AuthApi;
use crate::client::models::{
    ApiResponse, AuthResponse, LoginRequest, RegisterRequest, UserIdentity,
};
use crate::error::Result;
use crate::navigation::{Navigator, routes};

/// Login, registration, logout and profile operations for one client
pub struct SessionService {
    api: Arc<dyn AuthApi>,
    store: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    state: SessionState,
}

impl SessionService {
    /// Create the service, restoring the user from a stored token when
    /// storage is available
    pub fn new(
        api: Arc<dyn AuthApi>,
        store: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let service = Self {
            api,
            store,
            navigator,
            state: SessionState::new(),
        };

        if service.store.is_available() {
            service.decode_and_set_user_from_token();
        }

        service
    }

    /// Observable current user
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Stored token, if any
    pub fn token(&self) -> Option<String> {
        self.store.get().filter(|t| !t.is_empty())
    }

    /// Register a new account.
    ///
    /// A successful response that carries a token signs the user in exactly
    /// like [`login`](Self::login); either way the user is sent to `/login`.
    pub async fn register(
        &self,
        credentials: &RegisterRequest,
    ) -> Result<ApiResponse<AuthResponse>> {
        let response = self.api.register(credentials).await?;

        if response.success {
            log::info!("Registered {}", credentials.email);
            self.accept_token(&response);
            self.navigator.navigate(routes::LOGIN);
        }

        Ok(response)
    }

    /// Sign in. On success with a token, the token is stored, the identity
    /// published and the user sent home.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<ApiResponse<AuthResponse>> {
        let response = self.api.login(credentials).await?;

        if self.accept_token(&response) {
            log::info!("Signed in as {}", credentials.email);
            self.navigator.navigate(routes::HOME);
        }

        Ok(response)
    }

    /// Sign out. Safe to call without a session.
    pub fn logout(&self) {
        self.store.remove();
        self.state.set(None);
        self.navigator.navigate(routes::LOGIN);
    }

    /// Whether a token is stored. Says nothing about whether it is still valid.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Identity decoded from the stored token
    pub fn current_user_from_token(&self) -> Option<UserIdentity> {
        if !self.store.is_available() {
            return None;
        }
        self.token().and_then(|token| decoder::decode_or_log(&token))
    }

    /// Publish the identity from the stored token (or none)
    pub fn decode_and_set_user_from_token(&self) {
        self.state.set(self.current_user_from_token());
    }

    /// Expiry of the stored token, if it carries one
    pub fn token_expiry(&self) -> Option<DateTime<Utc>> {
        self.token().and_then(|token| decoder::expiry(&token))
    }

    /// Fetch the signed-in user's profile
    pub async fn get_profile(&self) -> Result<UserIdentity> {
        self.api.get_profile().await
    }

    /// Update the profile.
    ///
    /// The session user is replaced before the request is sent and is not
    /// restored if the server rejects the change.
    pub async fn update_profile(&self, user: UserIdentity) -> Result<ApiResponse<UserIdentity>> {
        self.state.set(Some(user.clone()));
        self.api.update_profile(&user).await
    }

    /// Ask the backend whether `token` is still valid
    pub async fn validate_token(&self, token: &str) -> Result<ApiResponse<Value>> {
        self.api.validate_token(token).await
    }

    /// Store and publish the token from a successful auth response.
    ///
    /// Returns whether a token was accepted.
    fn accept_token(&self, response: &ApiResponse<AuthResponse>) -> bool {
        if !response.success {
            return false;
        }

        let token = response
            .data
            .as_ref()
            .and_then(|d| d.token.as_deref())
            .filter(|t| !t.is_empty());

        match token {
            Some(token) => {
                self.store.set(token);
                self.decode_and_set_user_from_token();
                true
            }
            None => {
                log::warn!("Successful auth response carried no token");
                false
            }
        }
    }
}
