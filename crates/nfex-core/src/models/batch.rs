//! Accumulated results of one extraction run.

use serde::{Deserialize, Serialize};

use super::invoice::InvoiceRecord;

/// Ordered outcome of a batch run: records in processing order plus the
/// names of files that produced no record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionBatch {
    /// Successfully extracted records, in input order.
    pub records: Vec<InvoiceRecord>,

    /// Names of files that failed to read, parse or yield any data.
    pub failures: Vec<String>,
}

impl ExtractionBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a successfully extracted record.
    pub fn push_record(&mut self, record: InvoiceRecord) {
        self.records.push(record);
    }

    /// Record a file that produced no invoice data.
    pub fn push_failure(&mut self, name: impl Into<String>) {
        self.failures.push(name.into());
    }

    /// True when no file produced a record or a failure yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.failures.is_empty()
    }
}
