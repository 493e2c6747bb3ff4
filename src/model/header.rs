//! The six recognized header fields and the per-file raw header map.

use std::collections::HashMap;

/// A header field recognized by the extractor.
///
/// Only these six are captured; everything else in a mail file (including
/// `Cc:` and `Bcc:` lines) is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderField {
    MessageId,
    Subject,
    Date,
    From,
    To,
    Sent,
}

impl HeaderField {
    /// All recognized fields, in matcher order.
    pub const ALL: [HeaderField; 6] = [
        HeaderField::MessageId,
        HeaderField::Subject,
        HeaderField::Date,
        HeaderField::From,
        HeaderField::To,
        HeaderField::Sent,
    ];

    /// The header name as it appears in the file, without the colon.
    pub fn name(self) -> &'static str {
        match self {
            HeaderField::MessageId => "Message-ID",
            HeaderField::Subject => "Subject",
            HeaderField::Date => "Date",
            HeaderField::From => "From",
            HeaderField::To => "To",
            HeaderField::Sent => "Sent",
        }
    }

    /// Look up a field by its exact header name (case-sensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// Raw header values captured from one mail file.
///
/// At most one value per field; the first occurrence in the file wins.
/// An absent field means it was not observed. Constructed per file and
/// discarded after normalization.
#[derive(Debug, Clone, Default)]
pub struct RawHeaders {
    values: HashMap<HeaderField, String>,
}

impl RawHeaders {
    /// Record a value for `field` unless one was already captured.
    pub fn insert_first(&mut self, field: HeaderField, value: String) {
        self.values.entry(field).or_insert(value);
    }

    /// The captured value, if the field was observed.
    pub fn get(&self, field: HeaderField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// The captured value, with absent fields defaulting to the empty string.
    pub fn get_or_empty(&self, field: HeaderField) -> &str {
        self.get(field).unwrap_or("")
    }

    /// Whether the field was observed in the file.
    pub fn contains(&self, field: HeaderField) -> bool {
        self.values.contains_key(&field)
    }

    /// Number of distinct fields captured.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if no recognized header was captured.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
