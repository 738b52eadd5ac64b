//! Configuration module for Page-Walker
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use page_walker::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("walker.toml")).unwrap();
//! println!("Walk starts at: {}", config.walker.start_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, HttpConfig, OutputConfig, SelectorConfig, UserAgentConfig, WalkerConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};

pub(crate) use validation::validate_selector;
