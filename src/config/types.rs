use serde::Deserialize;

/// Main configuration structure for Page-Walker
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub walker: WalkerConfig,
    #[serde(default)]
    pub selectors: SelectorConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Walk behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WalkerConfig {
    /// The seed page the walk starts from
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Optional ceiling on the number of pages fetched
    #[serde(rename = "max-pages", default)]
    pub max_pages: Option<u32>,
}

/// CSS selectors used to extract records from a listing page
///
/// Field selectors are evaluated relative to each item matched by `item`;
/// `next` is evaluated against the whole page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub item: String,
    pub text: String,
    pub author: String,
    pub tags: String,
    pub next: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            item: "div.quote".to_string(),
            text: "span.text".to_string(),
            author: "small.author".to_string(),
            tags: "div.tags a.tag".to_string(),
            next: "li.next a".to_string(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the walker
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the walker
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the walker
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

/// HTTP client timeouts
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Total request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the JSON Lines file records are written to, `-` for stdout
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "-".to_string(),
        }
    }
}

impl OutputConfig {
    /// Returns true if records go to standard output
    pub fn is_stdout(&self) -> bool {
        self.path == "-"
    }
}
