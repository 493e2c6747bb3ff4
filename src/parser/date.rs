//! Date parsing for the send timestamp and the original-message baseline.
//!
//! The corpus carries a fixed two-digit UTC offset in the `Date:` header
//! (always written `-NN`); replies are assumed to have been sent in the same
//! zone as the original, so the one offset is applied to both timestamps.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, ScanError};

/// Recognized date/time layouts, tried in order.
pub const DATE_FORMATS: [&str; 3] = [
    "%d %b %Y %H:%M:%S",
    "%b %d, %Y %I:%M %p",
    "%B %d, %Y %I:%M %p",
];

/// `Date:` header shape: day-of-week, `<day month year>`, `<hh:mm:ss>`,
/// and a signed two-digit UTC offset. Trailing zone text (`00 (PDT)`) is
/// ignored.
static SEND_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\w+\W+(\d+\s+\w+\s+\d+)\s+(\d+:\d+:\d+)\s+-(\d\d)").expect("valid date regex")
});

/// `Sent:` header shape on quoted originals: day-of-week then
/// `<Month day, year hh:mm AM/PM>`.
static ORIGINAL_SENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\w+\W+(\w+\s+\d+,\s+\d+\s+\d+:\d+\s+\w+)").expect("valid sent regex")
});

/// Parsed send date/time from a `Date:` header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SendStamp {
    /// Calendar day of the send, day precision.
    pub date: chrono::NaiveDate,
    /// Epoch seconds, adjusted by the UTC offset.
    pub timestamp: i64,
    /// The two-digit offset hours parsed after the `-` sign.
    pub offset_hours: i64,
}

/// Parse a date string against [`DATE_FORMATS`], first success wins.
pub fn parse_date(text: &str) -> Result<NaiveDateTime> {
    for fmt in DATE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Ok(dt);
        }
    }
    Err(ScanError::DateFormat(text.to_string()))
}

/// Extract the send stamp from a raw `Date:` value.
///
/// `Ok(None)` when the header does not match the expected shape (the mail
/// then gets timestamp 0 and no known offset). A shape match with an
/// unparseable date/time is an error.
pub fn extract_send_stamp(raw_date: &str) -> Result<Option<SendStamp>> {
    let Some(caps) = SEND_DATE.captures(raw_date) else {
        return Ok(None);
    };
    let offset_hours: i64 = caps[3].parse().unwrap_or(0);
    let dt = parse_date(&format!("{} {}", &caps[1], &caps[2]))?;
    Ok(Some(SendStamp {
        date: dt.date(),
        timestamp: dt.and_utc().timestamp() - 3600 * offset_hours,
        offset_hours,
    }))
}

/// Extract the original message's epoch time from a raw `Sent:` value,
/// applying the reply's UTC offset when one is known.
///
/// `Ok(None)` when the header does not match the expected shape (response
/// time then stays at its 0.0 default).
pub fn extract_original_timestamp(raw_sent: &str, offset_hours: Option<i64>) -> Result<Option<i64>> {
    let Some(caps) = ORIGINAL_SENT.captures(raw_sent) else {
        return Ok(None);
    };
    let dt = parse_date(&caps[1])?;
    let mut timestamp = dt.and_utc().timestamp();
    if let Some(offset) = offset_hours {
        timestamp -= 3600 * offset;
    }
    Ok(Some(timestamp))
}
