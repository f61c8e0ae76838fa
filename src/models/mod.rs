//! CLI-facing models

pub mod display;

pub use display::{ProfileDisplay, StatusDisplay};
