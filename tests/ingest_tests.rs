//! Integration tests for the ingestion pipeline: extraction, normalization,
//! storage, and the fixed reports.

use std::fs;
use std::path::Path;

use enronscan::ingest::ingest_directory;
use enronscan::model::mail::{Label, MailRow};
use enronscan::parser::parse_mail_file;
use enronscan::store::{reports, MailStore};

const WELL_FORMED: &str = "\
Message-ID: <10001.1075855378110.JavaMail.evans@thyme>
Date: Mon, 14 May 2001 16:39:00 -0700 (PDT)
From: phillip.allen@enron.com
To: tim.belden@enron.com
Subject: Re: Budget
Mime-Version: 1.0
Content-Type: text/plain; charset=us-ascii

Looks good, approved.

 -----Original Message-----
From: Tim Belden
Sent: Monday, May 14, 2001 8:30 AM
To: Phillip Allen
Subject: Budget

Please review the attached budget.
";

const NO_MESSAGE_ID: &str = "\
Date: Mon, 14 May 2001 10:00:00 -0700 (PDT)
From: someone@enron.com
To: other@enron.com
Subject: orphan

No id on this one.
";

fn write_corpus(dir: &Path) {
    fs::write(dir.join("good.txt"), WELL_FORMED).unwrap();
    fs::write(dir.join("orphan.txt"), NO_MESSAGE_ID).unwrap();
    // Non-.txt files are not corpus files.
    fs::write(dir.join("ignored.log"), WELL_FORMED).unwrap();
}

// ─── End to end: two files in, one record out ───────────────────────

#[test]
fn test_end_to_end_ingest() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(dir.path());

    let db_path = dir.path().join("enron.sqlite");
    let mut store = MailStore::open(&db_path).unwrap();
    let stats = ingest_directory(dir.path(), &mut store, "txt", None).unwrap();

    assert_eq!(stats.files_seen, 2);
    assert_eq!(stats.imported, 1);
    assert_eq!(stats.skipped_no_id, 1);
    assert_eq!(stats.failed, 0);

    let (team_rows, mail_rows) = store.row_counts().unwrap();
    assert_eq!(team_rows, 1);
    assert_eq!(mail_rows, 1);
}

// ─── Single-file extraction semantics ───────────────────────────────

#[test]
fn test_parse_well_formed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mail.txt");
    fs::write(&path, WELL_FORMED).unwrap();

    let record = parse_mail_file(&path).unwrap().unwrap();
    assert_eq!(record.id, "10001.1075855378110");
    assert_eq!(record.sender, "phillip.allen@enron.com");
    assert_eq!(record.label, Label::Direct);
    assert!(record.receivers.contains("tim.belden@enron.com"));
    assert!(record.is_response);
    assert_eq!(record.subject, "Budget");
    // Reply at 16:39, original at 8:30, same day and zone.
    assert_eq!(record.response_time, (8 * 3600 + 9 * 60) as f64);
    assert!(record.timestamp > 0);
}

#[test]
fn test_parse_file_without_message_id() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mail.txt");
    fs::write(&path, NO_MESSAGE_ID).unwrap();

    assert!(parse_mail_file(&path).unwrap().is_none());
}

#[test]
fn test_quoted_from_and_to_do_not_override() {
    // The quoted original's From/To appear after the real headers, so
    // first-occurrence-wins keeps the reply's values.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mail.txt");
    fs::write(&path, WELL_FORMED).unwrap();

    let record = parse_mail_file(&path).unwrap().unwrap();
    assert_eq!(record.sender, "phillip.allen@enron.com");
    assert_eq!(record.receivers.len(), 1);
}

#[test]
fn test_multiline_to_produces_broadcast() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mail.txt");
    fs::write(
        &path,
        "Message-ID: <7.42.JavaMail.evans@thyme>\n\
         Date: Mon, 14 May 2001 09:00:00 -0700 (PDT)\n\
         From: sender@enron.com\n\
         To: a@enron.com, b@enron.com,\n\
         \tc@enron.com\n\
         Subject: all hands\n",
    )
    .unwrap();

    let record = parse_mail_file(&path).unwrap().unwrap();
    assert_eq!(record.label, Label::Broadcast);
    assert_eq!(record.receivers.len(), 3);
    assert!(record.receivers.contains("c@enron.com"));
}

// ─── Malformed Message-ID is a per-file failure, not an abort ───────

#[test]
fn test_malformed_message_id_skips_file_only() {
    let dir = tempfile::tempdir().unwrap();
    write_corpus(dir.path());
    fs::write(dir.path().join("broken.txt"), "Message-ID: <garbage>\n").unwrap();

    let mut store = MailStore::open_in_memory().unwrap();
    let stats = ingest_directory(dir.path(), &mut store, "txt", None).unwrap();

    assert_eq!(stats.files_seen, 3);
    assert_eq!(stats.imported, 1);
    assert_eq!(stats.skipped_no_id, 1);
    assert_eq!(stats.failed, 1);
}

// ─── Fastest-responses report ordering ──────────────────────────────

#[test]
fn test_fastest_responses_ordering() {
    let store = MailStore::open_in_memory().unwrap();
    for (id, secs) in [("1.1", 10.0), ("2.1", 5.0), ("3.1", 20.0)] {
        store
            .insert_mail_row(&MailRow {
                mail_id: id.to_string(),
                epoch_time: 0,
                subject: "Re-less".to_string(),
                is_response: true,
                response_time: secs,
            })
            .unwrap();
    }

    let rows = reports::fastest_responses(&store).unwrap();
    let times: Vec<f64> = rows.iter().map(|r| r.response_time).collect();
    assert_eq!(times, vec![5.0, 10.0, 20.0]);
}
