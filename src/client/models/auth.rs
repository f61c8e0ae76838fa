//! Authentication models

use serde::{Deserialize, Serialize};

/// Login credentials
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,

    #[serde(rename = "passWord")]
    pub password: String,
}

/// Registration form
#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    #[serde(rename = "userName")]
    pub username: String,

    pub email: String,

    #[serde(rename = "passWord")]
    pub password: String,

    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl RegisterRequest {
    /// Registration where the confirmation matches the password
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let password = password.into();
        Self {
            username: username.into(),
            email: email.into(),
            confirm_password: password.clone(),
            password,
        }
    }
}

// Credentials end up in debug logs; keep the secrets out.
impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .finish()
    }
}

/// Payload of a successful login or registration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests
    #[serde(default)]
    pub token: Option<String>,
}
