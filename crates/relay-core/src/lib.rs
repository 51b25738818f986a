//! Core types, configuration, and error handling for ReviewRelay.
//!
//! This crate provides the shared foundation used by the rest of the
//! workspace:
//! - [`RelayError`] — unified error type using `thiserror`
//! - [`RelayConfig`] — configuration read from the process environment
//! - [`PullFile`] — one entry of the pull-request files listing

mod config;
mod error;
mod types;

pub use config::RelayConfig;
pub use error::RelayError;
pub use types::PullFile;

/// A convenience `Result` type for relay operations.
pub type Result<T> = std::result::Result<T, RelayError>;
