//! Core types, configuration, and error handling for Lookout.
//!
//! This crate provides the shared foundation used by the other Lookout
//! crates:
//! - [`LookoutError`] — unified error type using `thiserror`
//! - [`LookoutConfig`] — configuration loaded from `lookout.toml` with an
//!   environment overlay for credentials
//! - Webhook payload types: [`PullRequestEvent`], [`PullRequestInfo`],
//!   [`RepositoryInfo`]

mod config;
mod error;
mod types;

pub use config::{GitHubConfig, LlmConfig, LookoutConfig, ServerConfig};
pub use error::LookoutError;
pub use types::{PullRequestEvent, PullRequestInfo, RepositoryInfo};

/// A convenience `Result` type for Lookout operations.
pub type Result<T> = std::result::Result<T, LookoutError>;
