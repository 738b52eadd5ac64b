//! HTML parser for listing pages
//!
//! Applies the configured selectors to a page and produces a [`PageResult`]:
//! - one [`Record`] per item container, in document order
//! - the raw href of the first "next page" link, if any

use crate::config::{validate_selector, SelectorConfig};
use crate::walker::{PageResult, Record};
use crate::ConfigResult;
use scraper::{ElementRef, Html, Selector};

/// Compiled selectors for one listing layout
#[derive(Debug, Clone)]
pub struct PageParser {
    item: Selector,
    text: Selector,
    author: Selector,
    tags: Selector,
    next: Selector,
}

impl PageParser {
    /// Compiles the configured selectors
    ///
    /// # Returns
    ///
    /// * `Ok(PageParser)` - All selectors compiled
    /// * `Err(ConfigError::InvalidSelector)` - A selector is empty or malformed
    pub fn new(config: &SelectorConfig) -> ConfigResult<Self> {
        Ok(Self {
            item: validate_selector(&config.item)?,
            text: validate_selector(&config.text)?,
            author: validate_selector(&config.author)?,
            tags: validate_selector(&config.tags)?,
            next: validate_selector(&config.next)?,
        })
    }

    /// Extracts records and the next-page href from an HTML document
    ///
    /// # Example
    ///
    /// ```
    /// use page_walker::config::SelectorConfig;
    /// use page_walker::walker::PageParser;
    ///
    /// let parser = PageParser::new(&SelectorConfig::default()).unwrap();
    /// let page = parser.parse(r#"
    ///     <div class="quote"><span class="text">Hi</span></div>
    ///     <li class="next"><a href="/page/2/">Next</a></li>
    /// "#);
    /// assert_eq!(page.records.len(), 1);
    /// assert_eq!(page.records[0].text.as_deref(), Some("Hi"));
    /// assert_eq!(page.next.as_deref(), Some("/page/2/"));
    /// ```
    pub fn parse(&self, html: &str) -> PageResult {
        let document = Html::parse_document(html);

        let records = document
            .select(&self.item)
            .map(|item| self.extract_record(item))
            .collect();

        let next = document
            .select(&self.next)
            .filter_map(|element| element.value().attr("href"))
            .map(str::trim)
            .find(|href| !href.is_empty())
            .map(str::to_string);

        PageResult { records, next }
    }

    fn extract_record(&self, item: ElementRef<'_>) -> Record {
        Record {
            text: first_text(item, &self.text),
            author: first_text(item, &self.author),
            tags: item
                .select(&self.tags)
                .filter_map(element_text)
                .collect(),
        }
    }
}

/// Text of the first element matching `selector` under `item`
fn first_text(item: ElementRef<'_>, selector: &Selector) -> Option<String> {
    item.select(selector).next().and_then(element_text)
}

/// First non-blank text node directly under `element`, trimmed
///
/// Text inside nested child elements is not part of the result.
fn element_text(element: ElementRef<'_>) -> Option<String> {
    element
        .children()
        .filter_map(|child| child.value().as_text())
        .map(|text| text.trim())
        .find(|text| !text.is_empty())
        .map(str::to_string)
}
