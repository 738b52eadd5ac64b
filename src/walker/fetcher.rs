//! Page fetching
//!
//! This module defines the [`Fetcher`] seam the walker pulls pages through,
//! and the HTTP implementation used by the command-line tool:
//! - Building HTTP clients with a proper user agent string
//! - GET requests for listing pages
//! - Error classification into transport and parse failures

use crate::config::{HttpConfig, UserAgentConfig};
use crate::url::PageReference;
use crate::walker::{PageParser, PageResult};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Why a single page could not be turned into a [`PageResult`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    /// Network error, timeout, non-success status or unreadable body
    #[error("{0}")]
    Transport(String),

    /// The page arrived but is not in the expected structure
    #[error("{0}")]
    Parse(String),
}

/// Turns a page reference into that page's records and next-page href
///
/// Implementations perform one attempt per call; the walker never retries.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, reference: &PageReference) -> Result<PageResult, FetchFailure>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `http` - Timeout settings
///
/// # Example
///
/// ```no_run
/// use page_walker::config::{HttpConfig, UserAgentConfig};
/// use page_walker::walker::build_http_client;
///
/// let user_agent = UserAgentConfig {
///     crawler_name: "PageWalker".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
/// };
///
/// let client = build_http_client(&user_agent, &HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    http: &HttpConfig,
) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL)
    let user_agent = format!(
        "{}/{} (+{})",
        user_agent.crawler_name, user_agent.crawler_version, user_agent.contact_url
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(http.timeout_secs))
        .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches listing pages over HTTP and parses them with a [`PageParser`]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    parser: PageParser,
}

impl HttpFetcher {
    pub fn new(client: Client, parser: PageParser) -> Self {
        Self { client, parser }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    /// # Request Flow
    ///
    /// | Condition | Outcome |
    /// |-----------|---------|
    /// | Timeout / connection error | Transport |
    /// | Non-2xx status | Transport |
    /// | Content-Type present but not HTML | Parse |
    /// | Empty body | Parse |
    /// | Otherwise | Parsed page |
    async fn fetch(&self, reference: &PageReference) -> Result<PageResult, FetchFailure> {
        let response = self
            .client
            .get(reference.as_url().clone())
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Transport(format!("HTTP status {}", status)));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if let Some(content_type) = content_type {
            if !content_type.contains("html") {
                return Err(FetchFailure::Parse(format!(
                    "expected an HTML page, got content type '{}'",
                    content_type
                )));
            }
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchFailure::Transport(format!("failed to read body: {}", e)))?;

        if body.trim().is_empty() {
            return Err(FetchFailure::Parse("empty document".to_string()));
        }

        Ok(self.parser.parse(&body))
    }
}

fn classify_error(e: reqwest::Error) -> FetchFailure {
    if e.is_timeout() {
        FetchFailure::Transport("request timeout".to_string())
    } else if e.is_connect() {
        FetchFailure::Transport(format!("connection failed: {}", e))
    } else {
        FetchFailure::Transport(e.to_string())
    }
}
