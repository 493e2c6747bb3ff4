//! Header capture: pick the six recognized header lines out of a mail file,
//! reconstructing multi-line `To:` recipient lists.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, ScanError};
use crate::model::header::{HeaderField, RawHeaders};

/// Matches one recognized header line: `Name:` + optional whitespace + value.
static HEADER_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(Message-ID|Subject|Date|From|To|Sent):\s*(.*)$").expect("valid header regex")
});

/// Matches the first line of a multi-line recipient list: `To: ...,`.
static TO_LIST_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^To: (.*),$").expect("valid To-list regex"));

/// Read a mail file into trimmed lines.
///
/// The corpus predates UTF-8; bytes are decoded UTF-8 first with a
/// Windows-1252 fallback (which accepts every byte).
pub fn read_mail_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path).map_err(|e| ScanError::io(path, e))?;
    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(e.as_bytes());
            decoded.into_owned()
        }
    };
    Ok(text.lines().map(|l| l.trim().to_string()).collect())
}

/// Capture [`RawHeaders`] from a file's trimmed lines.
///
/// Only the first occurrence of each recognized header is kept. A `To:` line
/// ending in a comma starts a multi-line recipient list: following lines are
/// concatenated verbatim until one does not end in a comma, and the
/// accumulated string goes through the normal matcher. A list still open at
/// end of input is dropped, never flushed.
pub fn capture_headers<'a>(lines: impl Iterator<Item = &'a str>) -> RawHeaders {
    let mut headers = RawHeaders::default();
    let mut to_buf = String::new();
    let mut in_to_list = false;

    for line in lines {
        let line = line.trim();

        if TO_LIST_START.is_match(line) {
            to_buf.push_str(line);
            in_to_list = true;
            continue;
        }
        if in_to_list {
            to_buf.push_str(line);
            if line.ends_with(',') {
                continue;
            }
            in_to_list = false;
            let accumulated = std::mem::take(&mut to_buf);
            match_header_line(&accumulated, &mut headers);
            continue;
        }

        match_header_line(line, &mut headers);
    }

    headers
}

/// Run one line through the header matcher, recording a first occurrence.
fn match_header_line(line: &str, headers: &mut RawHeaders) {
    if let Some(caps) = HEADER_LINE.captures(line) {
        if let Some(field) = HeaderField::from_name(&caps[1]) {
            headers.insert_first(field, caps[2].to_string());
        }
    }
}
