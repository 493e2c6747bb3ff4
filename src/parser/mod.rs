//! Mail file parsing: header capture, date handling, and record normalization.

pub mod date;
pub mod header;
pub mod normalize;

use std::path::Path;

use crate::error::Result;
use crate::model::mail::MailRecord;

/// Parse one mail file end to end: read lines, capture the recognized
/// headers, and normalize into a [`MailRecord`].
///
/// Returns `Ok(None)` for files without a `Message-ID` header.
pub fn parse_mail_file(path: &Path) -> Result<Option<MailRecord>> {
    let lines = header::read_mail_lines(path)?;
    let headers = header::capture_headers(lines.iter().map(String::as_str));
    normalize::normalize(&headers)
}
