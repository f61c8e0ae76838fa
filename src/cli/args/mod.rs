//! Shared CLI argument types

mod common;
mod global;
mod profile;

pub use common::OutputFormat;
pub use global::GlobalOptions;
pub use profile::ProfileUpdateArgs;
