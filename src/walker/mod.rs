//! Walker module for paginated extraction
//!
//! This module contains the core walking logic, including:
//! - The record and page result data model
//! - The [`Fetcher`] seam and its HTTP implementation
//! - Selector-driven HTML extraction
//! - The lazy pagination loop ([`PageWalker`] / [`Walk`])

mod fetcher;
mod parser;
mod record;
mod walk;

pub use fetcher::{build_http_client, FetchFailure, Fetcher, HttpFetcher};
pub use parser::PageParser;
pub use record::{PageResult, Record};
pub use walk::{PageWalker, Walk, WalkLimits};
