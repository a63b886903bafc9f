//! Common types and utilities shared across Claimcheck crates.
//!
//! This crate holds the pieces every other crate in the workspace leans on:
//! the shared error type, the [`Result`] alias, and the [`observability`]
//! helpers that install our `tracing` subscriber. It stays dependency-light so
//! that library crates can depend on it without pulling in the UI stack.
//!
//! # Overview
//!
//! - [`observability`]: Centralised tracing/logging initialisation
//! - [`ClaimcheckError`] and [`Result`]: Shared error handling
//! - [`LogFormat`]: Preferred log encoding, shared with the config loader
//!
//! # Examples
//!
//! ```rust
//! use claimcheck_common::{ClaimcheckError, LogFormat};
//!
//! let fmt: LogFormat = "json".parse().unwrap();
//! assert_eq!(fmt, LogFormat::Json);
//!
//! let err = ClaimcheckError::Config("missing base_url".into());
//! assert_eq!(err.to_string(), "Configuration error: missing base_url");
//! ```
use std::str::FromStr;

pub mod observability;

pub use observability::LogFormat;

/// Base address of the verification service when neither config nor CLI
/// supply one.
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";

/// Error types used across the Claimcheck system.
#[derive(thiserror::Error, Debug)]
pub enum ClaimcheckError {
    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenient alias for results that use [`ClaimcheckError`].
pub type Result<T> = std::result::Result<T, ClaimcheckError>;

impl FromStr for LogFormat {
    type Err = ClaimcheckError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ClaimcheckError::Config(format!(
                "unknown log format '{other}' (expected text or json)"
            ))),
        }
    }
}
