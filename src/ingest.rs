//! Directory ingestion driver.
//!
//! Walks the input root recursively, runs every `.txt` file through the
//! extractor and normalizer, and writes the resulting rows into the store.
//! Files are processed sequentially in directory-walk order.
//!
//! Unlike the tool this replaces, a file that fails to parse does not abort
//! the run: the failure is logged, counted, and the walk continues. Files
//! without a `Message-ID` stay a silent skip.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{Result, ScanError};
use crate::parser;
use crate::store::MailStore;

/// Outcome of one ingestion run.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct IngestStats {
    /// Candidate files found under the root.
    pub files_seen: usize,
    /// Files that produced a stored record.
    pub imported: usize,
    /// Files dropped for lacking a Message-ID.
    pub skipped_no_id: usize,
    /// Files skipped after a per-file error (logged).
    pub failed: usize,
}

/// Ingest every matching file under `root` into `store`.
///
/// `extension` is compared against the file name's extension (no dot).
/// The optional `progress` callback receives (processed, total).
pub fn ingest_directory(
    root: &Path,
    store: &mut MailStore,
    extension: &str,
    progress: Option<&dyn Fn(u64, u64)>,
) -> Result<IngestStats> {
    if !root.is_dir() {
        return Err(ScanError::InputNotFound(root.to_path_buf()));
    }

    let files = candidate_files(root, extension);
    let total = files.len() as u64;
    info!(root = %root.display(), files = files.len(), "Starting ingest");

    let mut stats = IngestStats {
        files_seen: files.len(),
        ..IngestStats::default()
    };

    for (i, path) in files.iter().enumerate() {
        match ingest_file(path, store) {
            Ok(Some(mail_id)) => {
                stats.imported += 1;
                debug!(path = %path.display(), mail_id = %mail_id, "Imported");
            }
            Ok(None) => {
                stats.skipped_no_id += 1;
                debug!(path = %path.display(), "No Message-ID, dropped");
            }
            Err(e) => {
                stats.failed += 1;
                warn!(path = %path.display(), error = %e, "Skipping file");
            }
        }
        if let Some(cb) = progress {
            cb(i as u64 + 1, total);
        }
    }

    info!(
        imported = stats.imported,
        skipped = stats.skipped_no_id,
        failed = stats.failed,
        "Ingest finished"
    );
    Ok(stats)
}

/// Parse one file and store its rows. `Ok(None)` means no Message-ID.
fn ingest_file(path: &Path, store: &mut MailStore) -> Result<Option<String>> {
    let Some(record) = parser::parse_mail_file(path)? else {
        return Ok(None);
    };
    store.insert_record(&record)?;
    Ok(Some(record.id))
}

/// Collect the files to ingest, in walk order.
fn candidate_files(root: &Path, extension: &str) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                warn!(error = %err, "Skipping unreadable directory entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| ext == extension)
                .unwrap_or(false)
        })
        .map(|e| e.into_path())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_file(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let mut store = MailStore::open_in_memory().unwrap();
        let result = ingest_directory(Path::new("/no/such/dir"), &mut store, "txt", None);
        assert!(matches!(result, Err(ScanError::InputNotFound(_))));
    }

    #[test]
    fn test_only_txt_files_are_candidates() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "mail.txt", "");
        write_file(dir.path(), "notes.md", "");
        write_file(dir.path(), "noext", "");
        fs::create_dir(dir.path().join("sub")).unwrap();
        write_file(&dir.path().join("sub"), "deep.txt", "");

        let files = candidate_files(dir.path(), "txt");
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_per_file_failure_does_not_abort() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "good.txt",
            "Message-ID: <1.2.JavaMail.evans@thyme>\nFrom: a@x.com\nTo: b@x.com\n",
        );
        write_file(dir.path(), "bad.txt", "Message-ID: <broken>\n");

        let mut store = MailStore::open_in_memory().unwrap();
        let stats = ingest_directory(dir.path(), &mut store, "txt", None).unwrap();
        assert_eq!(stats.files_seen, 2);
        assert_eq!(stats.imported, 1);
        assert_eq!(stats.failed, 1);
    }
}
