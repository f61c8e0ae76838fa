//! StockNet API client

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub mod http;
pub mod interceptor;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use http::StocknetClient;
pub use interceptor::AuthInterceptor;
#[cfg(test)]
pub use mock::MockAuthClient;

use models::{ApiResponse, AuthResponse, LoginRequest, RegisterRequest, UserIdentity};

/// Remote `Auth/*` operations.
///
/// Business outcomes come back inside [`ApiResponse`]; `Err` means the call
/// itself failed (transport, authorization or an unreadable response).
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST Auth/register`
    async fn register(&self, request: &RegisterRequest) -> Result<ApiResponse<AuthResponse>>;

    /// `POST Auth/login`
    async fn login(&self, request: &LoginRequest) -> Result<ApiResponse<AuthResponse>>;

    /// `GET Auth/profile`, the only endpoint answering with a bare payload
    async fn get_profile(&self) -> Result<UserIdentity>;

    /// `PUT Auth/updateProfile`
    async fn update_profile(&self, user: &UserIdentity) -> Result<ApiResponse<UserIdentity>>;

    /// `GET Auth/validateToken?token=<token>`
    async fn validate_token(&self, token: &str) -> Result<ApiResponse<Value>>;
}
