//! The pagination loop
//!
//! A walk owns a single "current reference". Each pull either hands out a
//! buffered record from the current page or, once the page is drained,
//! fetches the next one. Nothing is fetched ahead of the consumer, so
//! dropping a [`Walk`] stops the walk.

use crate::url::PageReference;
use crate::walker::{FetchFailure, Fetcher, Record};
use crate::WalkError;
use futures::stream::{self, BoxStream};
use futures::{Stream, StreamExt};
use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use tracing::{debug, info, warn};

/// Bounds applied to a single walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkLimits {
    /// Stop after this many pages even if a next link remains.
    /// `None` walks until a page has no next link.
    pub max_pages: Option<u32>,
}

/// Drives paginated extraction through a [`Fetcher`]
///
/// The walker holds no state between walks; every call to
/// [`PageWalker::walk`] starts from scratch.
#[derive(Debug)]
pub struct PageWalker<F> {
    fetcher: F,
    limits: WalkLimits,
}

impl<F: Fetcher> PageWalker<F> {
    /// Creates an unbounded walker
    pub fn new(fetcher: F) -> Self {
        Self::with_limits(fetcher, WalkLimits::default())
    }

    pub fn with_limits(fetcher: F, limits: WalkLimits) -> Self {
        Self { fetcher, limits }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Starts a walk at `seed`
    ///
    /// The seed is validated before anything is fetched; a malformed seed
    /// returns [`WalkError::InvalidReference`] immediately.
    ///
    /// The returned [`Walk`] yields every record of page 1 in page order, then
    /// every record of page 2, and so on. The first error is yielded once and
    /// ends the stream.
    pub fn walk(&self, seed: &str) -> crate::Result<Walk<'_>> {
        let seed = PageReference::parse(seed)?;
        Ok(self.walk_from(seed))
    }

    /// Starts a walk at an already parsed reference
    pub fn walk_from(&self, seed: PageReference) -> Walk<'_> {
        debug!("Starting walk at {}", seed);

        let pages_fetched = Arc::new(AtomicU32::new(0));
        let state = WalkState {
            fetcher: &self.fetcher,
            limits: self.limits,
            current: Some(seed),
            buffered: VecDeque::new(),
            pending_error: None,
            pages_fetched: Arc::clone(&pages_fetched),
        };

        Walk {
            inner: stream::unfold(state, WalkState::advance).boxed(),
            pages_fetched,
        }
    }
}

/// A lazy, finite stream of records produced by one walk
pub struct Walk<'a> {
    inner: BoxStream<'a, Result<Record, WalkError>>,
    pages_fetched: Arc<AtomicU32>,
}

impl Walk<'_> {
    /// Number of pages successfully fetched so far
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched.load(Ordering::Relaxed)
    }
}

impl Stream for Walk<'_> {
    type Item = Result<Record, WalkError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

impl std::fmt::Debug for Walk<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Walk")
            .field("pages_fetched", &self.pages_fetched())
            .finish_non_exhaustive()
    }
}

struct WalkState<'a, F> {
    fetcher: &'a F,
    limits: WalkLimits,
    /// The page to fetch once `buffered` is drained; `None` ends the walk
    current: Option<PageReference>,
    buffered: VecDeque<Record>,
    /// Surfaced after the buffered records of the page it came from
    pending_error: Option<WalkError>,
    pages_fetched: Arc<AtomicU32>,
}

impl<'a, F: Fetcher> WalkState<'a, F> {
    async fn advance(mut self) -> Option<(Result<Record, WalkError>, Self)> {
        loop {
            if let Some(record) = self.buffered.pop_front() {
                return Some((Ok(record), self));
            }

            if let Some(error) = self.pending_error.take() {
                self.current = None;
                return Some((Err(error), self));
            }

            let current = self.current.take()?;
            let fetched = self.pages_fetched.load(Ordering::Relaxed);

            if let Some(max_pages) = self.limits.max_pages {
                if fetched >= max_pages {
                    warn!(
                        "Page ceiling of {} reached, not fetching {}",
                        max_pages, current
                    );
                    return None;
                }
            }

            debug!("Fetching page {}: {}", fetched + 1, current);
            let page = match self.fetcher.fetch(&current).await {
                Ok(page) => page,
                Err(failure) => {
                    return Some((Err(into_walk_error(failure, &current)), self));
                }
            };

            self.pages_fetched.store(fetched + 1, Ordering::Relaxed);
            info!(
                "Page {} ({}): {} records",
                fetched + 1,
                current,
                page.records.len()
            );

            if page.is_last() {
                debug!("No next link on {}, walk complete", current);
            }
            self.buffered.extend(page.records);

            if let Some(href) = page.next {
                match current.join(&href) {
                    Ok(next) => {
                        debug!("Next page: {}", next);
                        self.current = Some(next);
                    }
                    Err(e) => self.pending_error = Some(e),
                }
            }
        }
    }
}

fn into_walk_error(failure: FetchFailure, reference: &PageReference) -> WalkError {
    match failure {
        FetchFailure::Transport(cause) => WalkError::Fetch {
            reference: reference.to_string(),
            cause,
        },
        FetchFailure::Parse(message) => WalkError::Parse {
            reference: reference.to_string(),
            message,
        },
    }
}
