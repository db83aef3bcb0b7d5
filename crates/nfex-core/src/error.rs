//! Error types for the nfex-core library.

use thiserror::Error;

/// Main error type for the nfex library.
#[derive(Error, Debug)]
pub enum NfexError {
    /// XML reading error.
    #[error("XML error: {0}")]
    Xml(#[from] XmlError),

    /// Invoice extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Spreadsheet writing error.
    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    /// CSV writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Report output was not valid UTF-8.
    #[error("invalid UTF-8 in report output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while reading an XML document into a tree.
#[derive(Error, Debug)]
pub enum XmlError {
    /// The underlying reader rejected the input.
    #[error("malformed XML: {0}")]
    Syntax(String),

    /// The document ended before every open element was closed.
    #[error("unclosed element: {0}")]
    Unclosed(String),

    /// The input contains no root element at all.
    #[error("no root element")]
    NoRoot,
}

/// Errors related to invoice field extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The document is not well-formed XML.
    #[error("not well-formed XML: {0}")]
    Malformed(#[from] XmlError),

    /// Every primary field came back empty.
    #[error("no invoice data found")]
    NoData,
}

/// Result type for the nfex library.
pub type Result<T> = std::result::Result<T, NfexError>;
