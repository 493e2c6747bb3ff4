//! SQLite store for normalized mail records.
//!
//! Schema:
//!
//! ```text
//! EnronTeam (MailID, Date, Sender, Receiver, Label)      PK (MailID, Receiver)
//! EnronMails(MailID, EpochTime, Subject, IfResponse, ResponseTime)  PK MailID
//! ```
//!
//! `Date` is NULL when the send date was unparsable. `IfResponse` is stored
//! as 0/1. Inserts are plain (no upsert): a primary-key collision surfaces
//! as an error to the caller.

use std::path::Path;

use rusqlite::{params, Connection};
use tracing::debug;

use crate::error::Result;
use crate::model::mail::{MailRecord, MailRow, TeamRow};

const TBL_TEAM: &str = "
CREATE TABLE IF NOT EXISTS EnronTeam (
    MailID   TEXT NOT NULL,
    Date     TEXT,
    Sender   TEXT NOT NULL,
    Receiver TEXT NOT NULL,
    Label    TEXT,
    PRIMARY KEY (MailID, Receiver)
)";

const TBL_MAILS: &str = "
CREATE TABLE IF NOT EXISTS EnronMails (
    MailID       TEXT NOT NULL PRIMARY KEY,
    EpochTime    INTEGER NOT NULL,
    Subject      TEXT,
    IfResponse   INTEGER,
    ResponseTime REAL
)";

const INSERT_TEAM: &str =
    "INSERT INTO EnronTeam (MailID, Date, Sender, Receiver, Label) VALUES (?1, ?2, ?3, ?4, ?5)";

const INSERT_MAIL: &str = "INSERT INTO EnronMails (MailID, EpochTime, Subject, IfResponse, ResponseTime) \
     VALUES (?1, ?2, ?3, ?4, ?5)";

/// Handle to the SQLite database holding both Enron tables.
///
/// Open one per run and pass it into the ingestion driver; the connection
/// closes when the store is dropped.
#[derive(Debug)]
pub struct MailStore {
    connection: Connection,
}

impl MailStore {
    /// Open (creating if needed) the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path.as_ref())?;

        // Improve insertion performance; the database is rebuildable from
        // the corpus, so durability pragmas can be relaxed.
        connection.pragma_update(None, "journal_mode", "memory")?;
        connection.pragma_update(None, "synchronous", "OFF")?;

        Self::create_tables(&connection)?;
        Ok(MailStore { connection })
    }

    /// Open an in-memory database (used by tests).
    pub fn open_in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory()?;
        Self::create_tables(&connection)?;
        Ok(MailStore { connection })
    }

    fn create_tables(connection: &Connection) -> Result<()> {
        connection.execute(TBL_TEAM, params![])?;
        connection.execute(TBL_MAILS, params![])?;
        Ok(())
    }

    /// The underlying connection, for read-only report queries.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Insert one team row. Errors on a (MailID, Receiver) collision.
    pub fn insert_team_row(&self, row: &TeamRow) -> Result<()> {
        let date = row.date.map(|d| d.format("%Y-%m-%d").to_string());
        let mut statement = self.connection.prepare_cached(INSERT_TEAM)?;
        statement.execute(params![
            row.mail_id,
            date,
            row.sender,
            row.receiver,
            row.label.as_str()
        ])?;
        Ok(())
    }

    /// Insert one mail summary row. Errors on a MailID collision.
    pub fn insert_mail_row(&self, row: &MailRow) -> Result<()> {
        let mut statement = self.connection.prepare_cached(INSERT_MAIL)?;
        statement.execute(params![
            row.mail_id,
            row.epoch_time,
            row.subject,
            row.is_response,
            row.response_time
        ])?;
        Ok(())
    }

    /// Persist a full record: one team row per deduplicated receiver plus
    /// the summary row, atomically.
    pub fn insert_record(&mut self, record: &MailRecord) -> Result<()> {
        let transaction = self.connection.transaction()?;
        {
            let mut team = transaction.prepare_cached(INSERT_TEAM)?;
            let date = record.send_date.map(|d| d.format("%Y-%m-%d").to_string());
            for receiver in &record.receivers {
                team.execute(params![
                    record.id,
                    date,
                    record.sender,
                    receiver,
                    record.label.as_str()
                ])?;
            }
            let mut mail = transaction.prepare_cached(INSERT_MAIL)?;
            mail.execute(params![
                record.id,
                record.timestamp,
                record.subject,
                record.is_response,
                record.response_time
            ])?;
        }
        transaction.commit()?;
        debug!(mail_id = %record.id, receivers = record.receivers.len(), "Stored mail");
        Ok(())
    }

    /// Row counts for the two tables, for the post-ingest summary.
    pub fn row_counts(&self) -> Result<(i64, i64)> {
        let team: i64 =
            self.connection
                .query_row("SELECT COUNT(*) FROM EnronTeam", [], |r| r.get(0))?;
        let mails: i64 =
            self.connection
                .query_row("SELECT COUNT(*) FROM EnronMails", [], |r| r.get(0))?;
        Ok((team, mails))
    }
}
