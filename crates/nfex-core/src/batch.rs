//! Sequential batch orchestration over named byte buffers.
//!
//! Files are fully isolated from each other: a failure records the file
//! name and nothing else, and never affects the rest of the run.

use tracing::{debug, warn};

use crate::decode::decode;
use crate::extract::extract;
use crate::models::batch::ExtractionBatch;

/// Decode one named buffer, extract its record and store the outcome.
pub fn process_input(batch: &mut ExtractionBatch, name: impl Into<String>, bytes: &[u8]) {
    let name = name.into();
    let text = decode(bytes);
    match extract(&text) {
        Ok(record) => {
            debug!("extracted record from {}", name);
            batch.push_record(record);
        }
        Err(err) => {
            warn!("failed to extract {}: {}", name, err);
            batch.push_failure(name);
        }
    }
}

/// Run the extraction pipeline over a sequence of named byte buffers.
///
/// Inputs are processed strictly in order; record order in the result
/// matches input order.
pub fn run_batch<N, B, I>(files: I) -> ExtractionBatch
where
    I: IntoIterator<Item = (N, B)>,
    N: Into<String>,
    B: AsRef<[u8]>,
{
    let mut batch = ExtractionBatch::new();
    for (name, bytes) in files {
        process_input(&mut batch, name, bytes.as_ref());
    }
    batch
}
