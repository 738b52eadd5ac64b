//! Walk statistics
//!
//! This module provides the summary returned by a completed walk and a
//! human-readable printer for it.

use chrono::{DateTime, Utc};

/// Summary of one completed walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkSummary {
    /// The seed the walk started from
    pub seed: String,

    /// Number of pages fetched
    pub pages_fetched: u32,

    /// Number of records handed to the sink
    pub records_emitted: u64,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl WalkSummary {
    /// Wall-clock duration of the walk in milliseconds
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }

    /// Average records per fetched page
    pub fn records_per_page(&self) -> f64 {
        if self.pages_fetched == 0 {
            return 0.0;
        }
        self.records_emitted as f64 / self.pages_fetched as f64
    }
}

/// Prints a walk summary to stderr
///
/// Stderr keeps the summary out of the way when records go to stdout.
pub fn print_summary(summary: &WalkSummary) {
    eprintln!("=== Walk Summary ===\n");
    eprintln!("  Seed: {}", summary.seed);
    eprintln!("  Started: {}", summary.started_at.to_rfc3339());
    eprintln!("  Finished: {}", summary.finished_at.to_rfc3339());
    eprintln!(
        "  Duration: {:.2} seconds",
        summary.duration_ms() as f64 / 1000.0
    );
    eprintln!("  Pages fetched: {}", summary.pages_fetched);
    eprintln!(
        "  Records emitted: {} ({:.1} per page)",
        summary.records_emitted,
        summary.records_per_page()
    );
}
