//! Data models for extracted invoice data.

pub mod batch;
pub mod invoice;
