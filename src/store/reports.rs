//! The four fixed analytical queries over the Enron tables.

use rusqlite::params;
use serde::Serialize;

use crate::error::Result;
use crate::store::MailStore;

/// Q1: how many mails did each person receive each day?
const DAILY_RECEIVER_COUNTS: &str = "
SELECT Receiver, Date, COUNT(MailID)
FROM EnronTeam
WHERE Receiver != ''
GROUP BY Date, Receiver
ORDER BY Date, Receiver";

/// Q2.1: who received the largest number of direct mails? (ties included)
const TOP_DIRECT_RECEIVERS: &str = "
SELECT Receiver, COUNT(MailID)
FROM EnronTeam
WHERE Label = 'Direct' AND Receiver != ''
GROUP BY Receiver
HAVING COUNT(MailID) = (
    SELECT MAX(Y.MailCount) FROM (
        SELECT COUNT(MailID) AS MailCount
        FROM EnronTeam
        WHERE Label = 'Direct' AND Receiver != ''
        GROUP BY Receiver
    ) Y
)";

/// Q2.2: who sent the largest number of broadcast mails? (ties included)
const TOP_BROADCAST_SENDERS: &str = "
SELECT Sender, COUNT(MailID)
FROM EnronTeam
WHERE Label = 'Broadcast'
GROUP BY Sender
HAVING COUNT(MailID) = (
    SELECT MAX(Y.MailCount) FROM (
        SELECT COUNT(MailID) AS MailCount
        FROM EnronTeam
        WHERE Label = 'Broadcast'
        GROUP BY Sender
    ) Y
)";

/// Q3: the five mails with the fastest response times.
const FASTEST_RESPONSES: &str = "
SELECT MailID, Subject, ResponseTime
FROM EnronMails
WHERE ResponseTime > 0 AND IfResponse = 1
ORDER BY ResponseTime
LIMIT 5";

/// One (receiver, day) mail count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyCount {
    pub receiver: String,
    /// `YYYY-MM-DD`, or `None` for mails whose send date was unparsable.
    pub date: Option<String>,
    pub count: i64,
}

/// A receiver or sender together with its mail count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressCount {
    pub address: String,
    pub count: i64,
}

/// One row of the fastest-responses report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseRow {
    pub mail_id: String,
    pub subject: String,
    pub response_time: f64,
}

/// Per-receiver-per-day mail counts, ordered by date then receiver.
pub fn daily_receiver_counts(store: &MailStore) -> Result<Vec<DailyCount>> {
    let mut statement = store.connection().prepare(DAILY_RECEIVER_COUNTS)?;
    let rows = statement.query_map(params![], |row| {
        Ok(DailyCount {
            receiver: row.get(0)?,
            date: row.get(1)?,
            count: row.get(2)?,
        })
    })?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
}

/// The receiver(s) of the most direct mails.
pub fn top_direct_receivers(store: &MailStore) -> Result<Vec<AddressCount>> {
    address_counts(store, TOP_DIRECT_RECEIVERS)
}

/// The sender(s) of the most broadcast mails.
pub fn top_broadcast_senders(store: &MailStore) -> Result<Vec<AddressCount>> {
    address_counts(store, TOP_BROADCAST_SENDERS)
}

fn address_counts(store: &MailStore, sql: &str) -> Result<Vec<AddressCount>> {
    let mut statement = store.connection().prepare(sql)?;
    let rows = statement.query_map(params![], |row| {
        Ok(AddressCount {
            address: row.get(0)?,
            count: row.get(1)?,
        })
    })?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
}

/// The five fastest responses, ascending by response time.
pub fn fastest_responses(store: &MailStore) -> Result<Vec<ResponseRow>> {
    let mut statement = store.connection().prepare(FASTEST_RESPONSES)?;
    let rows = statement.query_map(params![], |row| {
        Ok(ResponseRow {
            mail_id: row.get(0)?,
            subject: row.get(1)?,
            response_time: row.get(2)?,
        })
    })?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
}
