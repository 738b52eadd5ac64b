use serde::{Deserialize, Serialize};

/// One extracted listing item
///
/// Missing fields are never an error: an item without an author node has
/// `author == None`, and an item without tag nodes has an empty `tags` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub text: Option<String>,
    pub author: Option<String>,
    pub tags: Vec<String>,
}

impl Record {
    /// Creates a record from its three fields
    pub fn new<T, A>(text: Option<T>, author: Option<A>, tags: Vec<String>) -> Self
    where
        T: Into<String>,
        A: Into<String>,
    {
        Self {
            text: text.map(Into::into),
            author: author.map(Into::into),
            tags,
        }
    }
}

/// The outcome of fetching and parsing one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageResult {
    /// Records in extraction order
    pub records: Vec<Record>,

    /// The raw next-page href, unresolved
    pub next: Option<String>,
}

impl PageResult {
    /// Returns true if this page ends the walk
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}
