use crate::output::traits::{Sink, SinkResult};
use crate::walker::Record;

/// Collects records in memory, in emission order
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Vec<Record>,
    finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns true once `finish` has been called
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Sink for MemorySink {
    fn accept(&mut self, record: &Record) -> SinkResult<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn finish(&mut self) -> SinkResult<()> {
        self.finished = true;
        Ok(())
    }
}
