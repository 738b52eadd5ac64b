//! Output module for emitted records
//!
//! This module handles:
//! - The [`Sink`] interface records are delivered through
//! - JSON Lines and in-memory sinks
//! - Driving a walk into a sink and summarising it

mod jsonl;
mod memory;
pub mod stats;
mod traits;

pub use jsonl::JsonLinesSink;
pub use memory::MemorySink;
pub use stats::{print_summary, WalkSummary};
pub use traits::{Sink, SinkError, SinkResult};

use crate::walker::{Fetcher, PageWalker};
use crate::RunError;
use chrono::Utc;
use futures::StreamExt;

/// Runs a walk to completion, forwarding every record to `sink`
///
/// Records reach the sink in emission order. The sink is finished whether
/// the walk completes or fails, so records emitted before a failure are
/// kept.
///
/// # Returns
///
/// * `Ok(WalkSummary)` - The walk reached a page with no next link
/// * `Err(RunError::Walk)` - The seed was invalid or a page failed
/// * `Err(RunError::Sink)` - The sink rejected a record
pub async fn run_walk<F, S>(
    walker: &PageWalker<F>,
    seed: &str,
    sink: &mut S,
) -> Result<WalkSummary, RunError>
where
    F: Fetcher,
    S: Sink + ?Sized,
{
    let started_at = Utc::now();
    let mut walk = walker.walk(seed)?;
    let mut records_emitted = 0u64;

    let outcome = loop {
        match walk.next().await {
            Some(Ok(record)) => {
                if let Err(e) = sink.accept(&record) {
                    break Err(RunError::from(e));
                }
                records_emitted += 1;
            }
            Some(Err(e)) => break Err(RunError::from(e)),
            None => break Ok(()),
        }
    };

    let finished = sink.finish();
    if let Err(e) = outcome {
        match &e {
            RunError::Walk(walk_error) => tracing::error!(
                "Walk stopped at {} after {} records from {} pages: {}",
                walk_error.reference(),
                records_emitted,
                walk.pages_fetched(),
                e
            ),
            RunError::Sink(_) => tracing::error!(
                "Walk stopped after {} records from {} pages: {}",
                records_emitted,
                walk.pages_fetched(),
                e
            ),
        }
        return Err(e);
    }
    finished?;

    Ok(WalkSummary {
        seed: seed.trim().to_string(),
        pages_fetched: walk.pages_fetched(),
        records_emitted,
        started_at,
        finished_at: Utc::now(),
    })
}
