//! Sink trait and error types
//!
//! A sink receives records one at a time, in the order the walk emits them.

use crate::walker::Record;
use thiserror::Error;

/// Errors that can occur while writing records
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// Destination for extracted records
pub trait Sink {
    /// Accepts the next record in emission order
    fn accept(&mut self, record: &Record) -> SinkResult<()>;

    /// Flushes anything buffered; called once when the walk ends, whether it
    /// completed or failed
    fn finish(&mut self) -> SinkResult<()> {
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn accept(&mut self, record: &Record) -> SinkResult<()> {
        (**self).accept(record)
    }

    fn finish(&mut self) -> SinkResult<()> {
        (**self).finish()
    }
}
