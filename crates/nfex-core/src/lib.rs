//! Core library for NF-e invoice data extraction.
//!
//! This crate provides:
//! - byte decoding with a Latin-1 fallback for legacy files
//! - namespaced field extraction from NF-e XML documents
//! - batch aggregation of records and failed file names
//! - spreadsheet, CSV and JSON report writers

pub mod batch;
pub mod decode;
pub mod error;
pub mod extract;
pub mod models;
pub mod report;
pub mod xml;

pub use error::{ExtractionError, NfexError, Result, XmlError};
pub use models::batch::ExtractionBatch;
pub use models::invoice::{InvoiceRecord, COLUMNS};

pub use batch::{process_input, run_batch};
pub use decode::decode;
pub use extract::{extract, NFE_NAMESPACE};
pub use xml::XmlDocument;
