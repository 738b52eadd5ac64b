//! URL handling module for Page-Walker
//!
//! This module provides the [`PageReference`] locator type: seed parsing and
//! resolution of discovered hrefs against the page they were found on.

mod reference;

pub use reference::PageReference;
