//! Client-side session
//!
//! - [`store`] persists the bearer token
//! - [`decoder`] reads the identity out of it
//! - [`state`] publishes the current user
//! - [`service`] ties them to the remote API

pub mod decoder;
pub mod service;
pub mod state;
pub mod store;

pub use service::SessionService;
pub use state::{SessionState, Subscription};
pub use store::{LocalStorage, MemoryStore, TokenStore};
