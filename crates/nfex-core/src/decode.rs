//! Byte decoding for uploaded invoice files.
//!
//! NF-e files in the wild arrive either as UTF-8 or as Latin-1
//! (ISO-8859-1). UTF-8 goes first because it rejects invalid input;
//! Latin-1 maps every byte to a character, so it is the last resort.

use std::borrow::Cow;

use tracing::debug;

/// Decode raw file bytes into text.
///
/// Tries UTF-8, then falls back to Latin-1. The fallback is total, so every
/// byte sequence decodes to some string.
pub fn decode(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            debug!("input is not valid UTF-8, decoding as Latin-1");
            encoding_rs::mem::decode_latin1(bytes)
        }
    }
}
