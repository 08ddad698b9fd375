//! The append-only submission log.
//!
//! Each checklist category owns one CSV file under
//! `<data_dir>/submissions/<category>/log.csv`. The file gets a header on
//! first write and is only ever appended to after that; replacing the
//! equipment list never rewrites history. One submission is one row, with
//! the per-item statuses encoded as a JSON object in a single column so the
//! column set cannot drift between uploads.
//!
//! Appends are serialized by a lock and each row is built in memory and
//! written with a single call, so rows from concurrent requests never
//! interleave.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Local};
use log::info;

use crate::checklist::validator::{ValidatedMaintenance, ValidatedSubmission};
use crate::error::Result;

/// Column layout shared by every category's log.
const HEADER: [&str; 5] = ["submitted_at", "submitted_by", "appliance", "statuses", "notes"];

const LOG_FILE_NAME: &str = "log.csv";

/// Timestamps match the ISO form the old paper-to-spreadsheet workflow used.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A checklist category, naming the directory its log lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    PostJob,
    MaintenanceNight,
}

impl Category {
    pub fn dir_name(self) -> &'static str {
        match self {
            Category::PostJob => "post_job",
            Category::MaintenanceNight => "maintenance_night",
        }
    }
}

/// Handle to the per-category submission logs.
pub struct SubmissionLog {
    root: PathBuf,
    append_lock: Mutex<()>,
}

impl SubmissionLog {
    /// A log rooted at the submissions directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            append_lock: Mutex::new(()),
        }
    }

    /// Path of the log file for `category`.
    pub fn path_for(&self, category: Category) -> PathBuf {
        self.root.join(category.dir_name()).join(LOG_FILE_NAME)
    }

    /// Append a validated post-job checklist as one row.
    ///
    /// An I/O failure here is fatal to the request; the caller reports it
    /// to the user instead of pretending the submission was saved.
    pub fn append(
        &self,
        submission: &ValidatedSubmission,
        submitted_by: &str,
        submitted_at: DateTime<Local>,
    ) -> Result<PathBuf> {
        let statuses = serde_json::to_string(submission.statuses())?;
        self.append_row(
            Category::PostJob,
            submitted_at,
            submitted_by,
            submission.appliance(),
            &statuses,
            submission.notes(),
        )
    }

    /// Append a validated maintenance-night checklist as one row.
    pub fn append_maintenance(
        &self,
        submission: &ValidatedMaintenance,
        submitted_by: &str,
        submitted_at: DateTime<Local>,
    ) -> Result<PathBuf> {
        let statuses = serde_json::to_string(submission.statuses())?;
        self.append_row(
            Category::MaintenanceNight,
            submitted_at,
            submitted_by,
            submission.appliance(),
            &statuses,
            submission.notes(),
        )
    }

    fn append_row(
        &self,
        category: Category,
        submitted_at: DateTime<Local>,
        submitted_by: &str,
        appliance: &str,
        statuses: &str,
        notes: &str,
    ) -> Result<PathBuf> {
        let _guard = self
            .append_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let path = self.path_for(category);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        let needs_header = file.metadata()?.len() == 0;

        let timestamp = submitted_at.format(TIMESTAMP_FORMAT).to_string();
        let mut buf = Vec::new();
        {
            let mut writer = csv::Writer::from_writer(&mut buf);
            if needs_header {
                writer.write_record(HEADER)?;
            }
            writer.write_record([
                timestamp.as_str(),
                submitted_by,
                appliance,
                statuses,
                notes,
            ])?;
            writer.flush()?;
        }
        file.write_all(&buf)?;

        info!(
            "{} checklist appended for {} by {}",
            category.dir_name(),
            appliance,
            submitted_by
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::Path;
    use std::sync::Arc;
    use std::thread;

    use chrono::TimeZone;
    use common::model::checklist::EquipmentStatus;
    use tempfile::TempDir;

    use super::*;
    use crate::checklist::validator::validate;
    use crate::roster::store::tests::roster_with_equipment;

    fn sample_submission(notes: &str) -> ValidatedSubmission {
        let roster = roster_with_equipment(&[("Pumper 1", "Hose A"), ("Pumper 1", "Hose B")]);
        let mut map = BTreeMap::new();
        map.insert("Hose A".to_string(), EquipmentStatus::ReadyForUse);
        map.insert("Hose B".to_string(), EquipmentStatus::DamagedOrLost);
        validate(&roster, "Pumper 1", &map, Some(notes)).unwrap()
    }

    fn timestamp() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 7, 18, 30, 0).unwrap()
    }

    fn read_log(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
        let mut reader = csv::Reader::from_path(path).unwrap();
        let header = reader
            .headers()
            .unwrap()
            .iter()
            .map(str::to_string)
            .collect();
        let rows = reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect();
        (header, rows)
    }

    #[test]
    fn first_append_writes_header_once() {
        let dir = TempDir::new().unwrap();
        let log = SubmissionLog::new(dir.path().join("submissions"));
        let submission = sample_submission("replaced fitting");

        log.append(&submission, "janedoe", timestamp()).unwrap();
        log.append(&submission, "alexscott", timestamp()).unwrap();

        let (header, rows) = read_log(&log.path_for(Category::PostJob));
        assert_eq!(header, HEADER.to_vec());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "2026-08-07T18:30:00");
        assert_eq!(rows[0][1], "janedoe");
        assert_eq!(rows[1][1], "alexscott");
    }

    #[test]
    fn row_round_trips_every_field() {
        let dir = TempDir::new().unwrap();
        let log = SubmissionLog::new(dir.path().join("submissions"));
        let submission = sample_submission("replaced fitting, ordered spare");

        log.append(&submission, "janedoe", timestamp()).unwrap();

        let (_, rows) = read_log(&log.path_for(Category::PostJob));
        let row = &rows[0];
        assert_eq!(row[2], "Pumper 1");
        assert_eq!(row[4], "replaced fitting, ordered spare");

        let statuses: BTreeMap<String, EquipmentStatus> = serde_json::from_str(&row[3]).unwrap();
        assert_eq!(statuses, *submission.statuses());
    }

    #[test]
    fn categories_use_separate_files() {
        let dir = TempDir::new().unwrap();
        let log = SubmissionLog::new(dir.path().join("submissions"));

        let post_job = log.path_for(Category::PostJob);
        let maintenance = log.path_for(Category::MaintenanceNight);
        assert!(post_job.ends_with("submissions/post_job/log.csv"));
        assert!(maintenance.ends_with("submissions/maintenance_night/log.csv"));
        assert_ne!(post_job, maintenance);
    }

    #[test]
    fn concurrent_appends_never_interleave() {
        let dir = TempDir::new().unwrap();
        let log = Arc::new(SubmissionLog::new(dir.path().join("submissions")));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let log = Arc::clone(&log);
                thread::spawn(move || {
                    let submission = sample_submission("replaced fitting");
                    log.append(&submission, &format!("member{i}"), timestamp())
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let (header, rows) = read_log(&log.path_for(Category::PostJob));
        assert_eq!(header, HEADER.to_vec());
        assert_eq!(rows.len(), 8);
        for row in &rows {
            assert_eq!(row.len(), HEADER.len());
            let parsed: BTreeMap<String, EquipmentStatus> =
                serde_json::from_str(&row[3]).unwrap();
            assert_eq!(parsed.len(), 2);
        }
    }

    #[test]
    fn append_failure_is_surfaced() {
        let dir = TempDir::new().unwrap();
        // A file where the category directory should be makes create_dir_all fail.
        let blocker = dir.path().join("submissions");
        fs::write(&blocker, b"not a directory").unwrap();

        let log = SubmissionLog::new(dir.path().join("submissions"));
        let submission = sample_submission("replaced fitting");
        let err = log.append(&submission, "janedoe", timestamp()).unwrap_err();
        assert!(!err.is_client_error());
    }
}
