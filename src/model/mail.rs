//! Normalized mail records and the persisted row shapes.

use std::collections::BTreeSet;

use chrono::NaiveDate;

/// Whether a mail went to a single recipient or to many.
///
/// Computed from the raw (pre-deduplication) recipient token count, so a
/// mail listing the same address twice is still `Broadcast`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Label {
    Direct,
    Broadcast,
}

impl Label {
    /// The string stored in the `Label` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Direct => "Direct",
            Label::Broadcast => "Broadcast",
        }
    }
}

/// One normalized mail, derived from a file's [`RawHeaders`].
///
/// A file without a `Message-ID` produces no record at all.
///
/// [`RawHeaders`]: crate::model::header::RawHeaders
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MailRecord {
    /// Unique id extracted from the Message-ID header (`digits.digits`).
    pub id: String,

    /// Sender address from `From:`. May be empty.
    pub sender: String,

    /// Deduplicated recipient addresses from `To:`.
    ///
    /// An empty `To:` still yields one empty-string entry, so every mail
    /// produces at least one team row.
    pub receivers: BTreeSet<String>,

    /// Direct or Broadcast, from the pre-dedup recipient count.
    pub label: Label,

    /// Calendar day the mail was sent, when the Date header matched.
    pub send_date: Option<NaiveDate>,

    /// Epoch seconds of the send time, offset-adjusted. 0 if unparsable.
    pub timestamp: i64,

    /// Subject with a leading `Re: `/`RE: ` stripped.
    pub subject: String,

    /// True iff the subject started with `Re:` or `RE:` (exact casing).
    pub is_response: bool,

    /// Seconds between this mail and the original it replies to,
    /// when a `Sent:` line made the original's time recoverable. 0.0 otherwise.
    pub response_time: f64,
}

impl MailRecord {
    /// The team rows for this mail: one per deduplicated receiver.
    pub fn team_rows(&self) -> Vec<TeamRow> {
        self.receivers
            .iter()
            .map(|receiver| TeamRow {
                mail_id: self.id.clone(),
                date: self.send_date,
                sender: self.sender.clone(),
                receiver: receiver.clone(),
                label: self.label,
            })
            .collect()
    }

    /// The single summary row for this mail.
    pub fn mail_row(&self) -> MailRow {
        MailRow {
            mail_id: self.id.clone(),
            epoch_time: self.timestamp,
            subject: self.subject.clone(),
            is_response: self.is_response,
            response_time: self.response_time,
        }
    }
}

/// One `EnronTeam` row: a (mail, receiver) pair.
///
/// Primary key is (mail_id, receiver).
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TeamRow {
    pub mail_id: String,
    pub date: Option<NaiveDate>,
    pub sender: String,
    pub receiver: String,
    pub label: Label,
}

/// One `EnronMails` row: the per-mail summary.
///
/// Primary key is mail_id.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MailRow {
    pub mail_id: String,
    pub epoch_time: i64,
    pub subject: String,
    pub is_response: bool,
    pub response_time: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> MailRecord {
        MailRecord {
            id: "10001.1075855378110".to_string(),
            sender: "phillip.allen@enron.com".to_string(),
            receivers: ["tim.belden@enron.com".to_string(), "john.lavorato@enron.com".to_string()]
                .into_iter()
                .collect(),
            label: Label::Broadcast,
            send_date: NaiveDate::from_ymd_opt(2001, 5, 14),
            timestamp: 989_807_400,
            subject: "Budget".to_string(),
            is_response: true,
            response_time: 120.0,
        }
    }

    #[test]
    fn test_one_team_row_per_receiver() {
        let record = sample_record();
        let rows = record.team_rows();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.mail_id == record.id));
        assert!(rows.iter().all(|r| r.label == Label::Broadcast));
    }

    #[test]
    fn test_mail_row_carries_summary_fields() {
        let row = sample_record().mail_row();
        assert_eq!(row.epoch_time, 989_807_400);
        assert!(row.is_response);
        assert_eq!(row.response_time, 120.0);
    }

    #[test]
    fn test_label_strings() {
        assert_eq!(Label::Direct.as_str(), "Direct");
        assert_eq!(Label::Broadcast.as_str(), "Broadcast");
    }
}
