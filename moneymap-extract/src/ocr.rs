//! OCR collaborator boundary.
//!
//! Recognition itself lives outside this crate; the facade only needs
//! "image bytes in, text out". A failed or empty recognition is treated as
//! empty input downstream, which parses to an all-default record.

use anyhow::Result;

/// Turns an image into text for the parsers.
pub trait TextRecognizer {
    fn recognize(&self, image: &[u8]) -> Result<String>;
}
