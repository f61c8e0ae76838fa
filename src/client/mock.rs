//! Mock StockNet API client for testing
//!
//! Provides a mock implementation of [`AuthApi`] for unit testing without
//! making real API calls.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::AuthApi;
use super::models::{ApiResponse, AuthResponse, LoginRequest, RegisterRequest, UserIdentity};
use crate::error::{ApiError, Result};
use crate::session::SessionState;

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockAuthClient::new()
///     .with_login(ApiResponse::ok(AuthResponse { token: Some(token) }))
///     .await;
///
/// let response = mock.login(&LoginRequest::new("a@b.c", "secret1")).await?;
/// assert!(response.success);
/// ```
#[derive(Default)]
pub struct MockAuthClient {
    /// Response to return from login
    login: Arc<Mutex<Option<ApiResponse<AuthResponse>>>>,
    /// Response to return from register
    register: Arc<Mutex<Option<ApiResponse<AuthResponse>>>>,
    /// Profile to return from get_profile
    profile: Arc<Mutex<Option<UserIdentity>>>,
    /// Response to return from update_profile
    update: Arc<Mutex<Option<ApiResponse<UserIdentity>>>>,
    /// Response to return from validate_token
    validate: Arc<Mutex<Option<ApiResponse<Value>>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
    /// Session state sampled whenever a request arrives
    watched: Arc<Mutex<Option<SessionState>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub register: usize,
    pub login: usize,
    pub get_profile: usize,
    pub update_profile: usize,
    pub validate_token: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.register + self.login + self.get_profile + self.update_profile + self.validate_token
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// The API method called (e.g., "login", "validate_token")
    pub method: String,
    /// Token passed to validate_token
    pub token: Option<String>,
    /// Identity sent to update_profile
    pub user: Option<UserIdentity>,
    /// Session user at the moment the request arrived (when watched)
    pub session_user: Option<Option<UserIdentity>>,
}

impl MockAuthClient {
    /// Create a new mock client with default responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the response to return from login.
    pub async fn with_login(self, response: ApiResponse<AuthResponse>) -> Self {
        *self.login.lock().await = Some(response);
        self
    }

    /// Configure the response to return from register.
    pub async fn with_register(self, response: ApiResponse<AuthResponse>) -> Self {
        *self.register.lock().await = Some(response);
        self
    }

    /// Configure the profile to return from get_profile.
    pub async fn with_profile(self, profile: UserIdentity) -> Self {
        *self.profile.lock().await = Some(profile);
        self
    }

    /// Configure the response to return from update_profile.
    pub async fn with_update(self, response: ApiResponse<UserIdentity>) -> Self {
        *self.update.lock().await = Some(response);
        self
    }

    /// Configure the response to return from validate_token.
    pub async fn with_validate(self, response: ApiResponse<Value>) -> Self {
        *self.validate.lock().await = Some(response);
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Sample `state` on every request, recorded in the captured requests.
    pub async fn watch_state(&self, state: SessionState) {
        *self.watched.lock().await = Some(state);
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        let mut error = self.error.lock().await;
        if let Some(e) = error.take() {
            return Err(e.into());
        }
        Ok(())
    }

    /// Record a captured request for test assertions.
    async fn capture_request(&self, method: &str, token: Option<&str>, user: Option<&UserIdentity>) {
        let session_user = self.watched.lock().await.as_ref().map(|s| s.current());
        let mut requests = self.captured_requests.lock().await;
        requests.push(CapturedRequest {
            method: method.to_string(),
            token: token.map(|s| s.to_string()),
            user: user.cloned(),
            session_user,
        });
    }
}

#[async_trait]
impl AuthApi for MockAuthClient {
    async fn register(&self, _request: &RegisterRequest) -> Result<ApiResponse<AuthResponse>> {
        self.capture_request("register", None, None).await;
        self.check_error().await?;
        self.call_count.lock().await.register += 1;

        let response = self.register.lock().await;
        Ok(response
            .clone()
            .unwrap_or_else(|| ApiResponse::ok(AuthResponse::default())))
    }

    async fn login(&self, _request: &LoginRequest) -> Result<ApiResponse<AuthResponse>> {
        self.capture_request("login", None, None).await;
        self.check_error().await?;
        self.call_count.lock().await.login += 1;

        let response = self.login.lock().await;
        Ok(response
            .clone()
            .unwrap_or_else(|| ApiResponse::failure("Credenciales inválidas")))
    }

    async fn get_profile(&self) -> Result<UserIdentity> {
        self.capture_request("get_profile", None, None).await;
        self.check_error().await?;
        self.call_count.lock().await.get_profile += 1;

        let profile = self.profile.lock().await;
        profile
            .clone()
            .ok_or_else(|| ApiError::NotFound("Auth/profile".to_string()).into())
    }

    async fn update_profile(&self, user: &UserIdentity) -> Result<ApiResponse<UserIdentity>> {
        self.capture_request("update_profile", None, Some(user)).await;
        self.check_error().await?;
        self.call_count.lock().await.update_profile += 1;

        let response = self.update.lock().await;
        Ok(response
            .clone()
            .unwrap_or_else(|| ApiResponse::ok(user.clone())))
    }

    async fn validate_token(&self, token: &str) -> Result<ApiResponse<Value>> {
        self.capture_request("validate_token", Some(token), None).await;
        self.check_error().await?;
        self.call_count.lock().await.validate_token += 1;

        let response = self.validate.lock().await;
        Ok(response
            .clone()
            .unwrap_or_else(|| ApiResponse::ok(Value::Bool(true))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[tokio::test]
    async fn test_mock_defaults() {
        let mock = MockAuthClient::new();

        let login = mock.login(&LoginRequest::new("a@b.c", "x")).await.unwrap();
        assert!(!login.success);

        let validate = mock.validate_token("t").await.unwrap();
        assert!(validate.success);

        assert!(mock.get_profile().await.is_err());
    }

    #[tokio::test]
    async fn test_mock_error_consumed_once() {
        let mock = MockAuthClient::new()
            .with_error(ApiError::Network("down".to_string()))
            .await;

        let first = mock.validate_token("t").await;
        assert!(matches!(first, Err(Error::Api(ApiError::Network(_)))));

        let second = mock.validate_token("t").await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_mock_call_counts_and_capture() {
        let mock = MockAuthClient::new();

        let _ = mock.validate_token("abc").await;
        let _ = mock.register(&RegisterRequest::new("u", "e", "p")).await;

        let counts = mock.call_counts().await;
        assert_eq!(counts.validate_token, 1);
        assert_eq!(counts.register, 1);
        assert_eq!(counts.total(), 2);

        let captured = mock.captured_requests().await;
        assert_eq!(captured[0].method, "validate_token");
        assert_eq!(captured[0].token.as_deref(), Some("abc"));
        assert!(captured[0].session_user.is_none());
    }
}
