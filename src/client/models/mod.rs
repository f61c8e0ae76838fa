//! StockNet API data models
//!
//! Wire types exchanged with the `Auth/*` endpoints.

mod auth;
mod response;
mod user;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest};
pub use response::ApiResponse;
pub use user::{DEFAULT_PHOTO_URL, UserIdentity, parse_birth_date, value_text};
