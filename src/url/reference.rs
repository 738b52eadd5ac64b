use crate::{Result, WalkError};
use std::fmt;
use url::Url;

/// An absolute locator for a fetchable page
///
/// References are created either from a caller-supplied seed
/// ([`PageReference::parse`]) or by resolving an href found on a page against
/// that page's own reference ([`PageReference::join`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageReference {
    url: Url,
}

impl PageReference {
    /// Parses a seed locator
    ///
    /// The seed must be an absolute `http` or `https` URL with a host.
    ///
    /// # Examples
    ///
    /// ```
    /// use page_walker::url::PageReference;
    ///
    /// let seed = PageReference::parse("http://quotes.toscrape.com/page/1/").unwrap();
    /// assert_eq!(seed.as_str(), "http://quotes.toscrape.com/page/1/");
    ///
    /// assert!(PageReference::parse("page/1/").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let url = Url::parse(input).map_err(|e| invalid(input, e.to_string()))?;
        Self::from_url(url)
    }

    /// Resolves an href discovered on this page
    ///
    /// Resolution is always relative to `self`, the page the href was found
    /// on. A relative-path href whose first segment names a directory already
    /// on this page's path restates the path from that directory, so it is
    /// resolved against the directory's parent: `http://example.com/page/2/`
    /// joined with `page/3/` yields `http://example.com/page/3/`. Every other
    /// href (dot segments, unrelated relative paths, absolute, scheme-relative,
    /// root-relative, query and fragment) follows the usual URL join rules.
    ///
    /// # Examples
    ///
    /// ```
    /// use page_walker::url::PageReference;
    ///
    /// let current = PageReference::parse("http://example.com/page/2/").unwrap();
    /// assert_eq!(current.join("page/3/").unwrap().as_str(), "http://example.com/page/3/");
    /// assert_eq!(current.join("/page/3/").unwrap().as_str(), "http://example.com/page/3/");
    /// assert_eq!(current.join("../3/").unwrap().as_str(), "http://example.com/page/3/");
    /// ```
    pub fn join(&self, href: &str) -> Result<Self> {
        let href = href.trim();
        if href.is_empty() {
            return Err(invalid(href, "empty href".to_string()));
        }

        let resolved = match anchored_base(&self.url, href) {
            Some(base) => base.join(href),
            None => self.url.join(href),
        }
        .map_err(|e| invalid(href, e.to_string()))?;

        Self::from_url(resolved)
    }

    /// Returns the reference as a string slice
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Returns the underlying URL
    pub fn as_url(&self) -> &Url {
        &self.url
    }

    fn from_url(url: Url) -> Result<Self> {
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(invalid(
                url.as_str(),
                format!(
                    "only HTTP and HTTPS schemes are supported, got: {}",
                    url.scheme()
                ),
            ));
        }

        if url.host_str().is_none() {
            return Err(invalid(url.as_str(), "missing host".to_string()));
        }

        Ok(Self { url })
    }
}

impl fmt::Display for PageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

fn invalid(reference: &str, reason: String) -> WalkError {
    WalkError::InvalidReference {
        reference: reference.to_string(),
        reason,
    }
}

/// True for hrefs like `page/3/` or `../x`: no scheme, no leading `/`, `?` or `#`
fn is_relative_path(href: &str) -> bool {
    if Url::parse(href).is_ok() {
        return false;
    }
    !(href.starts_with('/') || href.starts_with('?') || href.starts_with('#'))
}

/// Base for a relative-path href that restates part of the page's path
///
/// Finds the deepest directory of `url` named by the href's first segment and
/// returns the URL of its parent directory. Returns `None` when the href is
/// not a plain relative path or no directory matches.
fn anchored_base(url: &Url, href: &str) -> Option<Url> {
    if !is_relative_path(href) {
        return None;
    }

    let first = href.split(['/', '?', '#']).next()?;
    if first.is_empty() || first == "." || first == ".." {
        return None;
    }

    let segments: Vec<&str> = url.path_segments()?.collect();
    let directories = &segments[..segments.len().saturating_sub(1)];
    let anchor = directories.iter().rposition(|segment| *segment == first)?;

    let parent: String = directories[..anchor]
        .iter()
        .map(|segment| format!("{}/", segment))
        .collect();
    let mut base = url.clone();
    base.set_path(&format!("/{}", parent));
    base.set_query(None);
    base.set_fragment(None);
    Some(base)
}
