//! Normalization: turn a file's [`RawHeaders`] into a [`MailRecord`].

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, ScanError};
use crate::model::header::{HeaderField, RawHeaders};
use crate::model::mail::{Label, MailRecord};
use crate::parser::date;

/// Recipient tokens are separated by a comma with optional whitespace.
static RECEIVER_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*,\s*").expect("valid split regex"));

/// Message-ID shape: `<digits.digits.word.word@word>`; the leading
/// `digits.digits` is the mail id.
static MESSAGE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<(\d+\.\d+)\.\w+\.\w+@\w+>").expect("valid message-id regex"));

/// Normalize captured headers into a [`MailRecord`].
///
/// `Ok(None)` when no `Message-ID` was observed (the file is silently
/// dropped). Every other absent field defaults to the empty string before
/// processing. A Message-ID that does not fit the expected shape is a
/// per-file [`ScanError::MalformedMessageId`].
pub fn normalize(headers: &RawHeaders) -> Result<Option<MailRecord>> {
    if !headers.contains(HeaderField::MessageId) {
        return Ok(None);
    }

    let raw_id = headers.get_or_empty(HeaderField::MessageId);
    let id = MESSAGE_ID
        .captures(raw_id)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| ScanError::MalformedMessageId(raw_id.to_string()))?;

    let sender = headers.get_or_empty(HeaderField::From).to_string();

    // Label comes from the raw token count; an empty To still yields one
    // (empty) token. Dedup happens only afterwards, for storage.
    let tokens: Vec<&str> = RECEIVER_SPLIT
        .split(headers.get_or_empty(HeaderField::To))
        .collect();
    let label = if tokens.len() > 1 {
        Label::Broadcast
    } else {
        Label::Direct
    };
    let receivers: BTreeSet<String> = tokens.into_iter().map(str::to_string).collect();

    let stamp = date::extract_send_stamp(headers.get_or_empty(HeaderField::Date))?;
    let (send_date, timestamp, offset_hours) = match stamp {
        Some(s) => (Some(s.date), s.timestamp, Some(s.offset_hours)),
        None => (None, 0, None),
    };

    let original =
        date::extract_original_timestamp(headers.get_or_empty(HeaderField::Sent), offset_hours)?;
    let response_time = original
        .map(|orig| (timestamp - orig) as f64)
        .unwrap_or(0.0);

    let raw_subject = headers.get_or_empty(HeaderField::Subject);
    let (is_response, subject) = if raw_subject.starts_with("Re:") || raw_subject.starts_with("RE:")
    {
        // Exactly the first four characters go, prefix and following space.
        (true, raw_subject.chars().skip(4).collect())
    } else {
        (false, raw_subject.to_string())
    };

    Ok(Some(MailRecord {
        id,
        sender,
        receivers,
        label,
        send_date,
        timestamp,
        subject,
        is_response,
        response_time,
    }))
}
