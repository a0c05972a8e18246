//! Late check-in audit trail
//!
//! Append-only, one `pilot_id;checked in late` line per event. Entries are
//! never read back or rewritten. A failed append is an error for the
//! caller because the log is the only record of lateness.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{error, info};

use crate::error::{Result, ScheduleError};

/// Marker written next to the pilot id
pub const LATE_MARKER: &str = "checked in late";

/// Sink for late check-in events
pub trait LateCheckinLog {
    /// Append one late check-in entry for `pilot_id`
    fn record_late(&self, pilot_id: &str) -> Result<()>;
}

/// Appends late check-ins to a `;`-delimited file
///
/// The file is opened in append mode per entry, so earlier lines are never
/// touched. Appends are serialized through a mutex: at most one writer at
/// a time even when the log is shared.
#[derive(Debug)]
pub struct FileLateCheckinLog {
    path: PathBuf,
    writer_lock: Mutex<()>,
}

impl FileLateCheckinLog {
    /// Log appending to `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer_lock: Mutex::new(()),
        }
    }

    /// Location of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, pilot_id: &str) -> io::Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(file);
        writer.write_record([pilot_id, LATE_MARKER])?;
        writer.flush()
    }
}

impl LateCheckinLog for FileLateCheckinLog {
    fn record_late(&self, pilot_id: &str) -> Result<()> {
        let _guard = self
            .writer_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Err(source) = self.append(pilot_id) {
            error!(
                pilot_id,
                path = %self.path.display(),
                error = %source,
                "Failed to append late check-in"
            );
            return Err(ScheduleError::LogWriteFailure {
                pilot_id: pilot_id.to_string(),
                source,
            });
        }

        info!(pilot_id, path = %self.path.display(), "Late check-in recorded");
        Ok(())
    }
}

/// Keeps late check-ins in memory, in arrival order
#[derive(Debug, Default)]
pub struct MemoryLateCheckinLog {
    entries: Mutex<Vec<(String, String)>>,
}

impl MemoryLateCheckinLog {
    /// Empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of `(pilot_id, marker)` entries
    pub fn entries(&self) -> Vec<(String, String)> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LateCheckinLog for MemoryLateCheckinLog {
    fn record_late(&self, pilot_id: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((pilot_id.to_string(), LATE_MARKER.to_string()));
        Ok(())
    }
}
