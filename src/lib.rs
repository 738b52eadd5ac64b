//! Page-Walker: a paginated listing extractor
//!
//! This crate walks a chain of linked listing pages, extracting structured
//! records from each one and following the "next page" link until the chain
//! runs out.

pub mod config;
pub mod output;
pub mod url;
pub mod walker;

use thiserror::Error;

/// Errors that end a walk
///
/// Every variant is terminal: the walk stops at the first error and the
/// caller decides whether to retry the whole walk.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("Invalid page reference '{reference}': {reason}")]
    InvalidReference { reference: String, reason: String },

    #[error("Failed to fetch {reference}: {cause}")]
    Fetch { reference: String, cause: String },

    #[error("Unexpected page structure at {reference}: {message}")]
    Parse { reference: String, message: String },
}

impl WalkError {
    /// Returns the page reference the error is attached to
    pub fn reference(&self) -> &str {
        match self {
            Self::InvalidReference { reference, .. }
            | Self::Fetch { reference, .. }
            | Self::Parse { reference, .. } => reference,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Errors from driving a walk into a sink
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Walk(#[from] WalkError),

    #[error("Sink error: {0}")]
    Sink(#[from] output::SinkError),
}

/// Result type alias for walk operations
pub type Result<T> = std::result::Result<T, WalkError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use output::{run_walk, Sink, WalkSummary};
pub use url::PageReference;
pub use walker::{Fetcher, PageResult, PageWalker, Record, Walk, WalkLimits};
