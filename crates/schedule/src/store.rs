//! Schedule store
//!
//! Built once from `;`-delimited rows and read-only afterwards. Records are
//! keyed by pilot id; a later row for the same id replaces an earlier one.
//!
//! Rows that cannot be parsed are handled per [`MalformedRecordPolicy`].
//! Under `Skip` the pilot id of a bad row is remembered so that looking it
//! up reports `MalformedRecord` instead of pretending the pilot is unknown.

use pilotops_core::MalformedRecordPolicy;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{Result, ScheduleError};
use crate::record::{PilotRecord, ScheduledStart};

/// A schedule row that was left out of the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// 1-based line in the source
    pub line: u64,
    /// First field of the row, if non-empty
    pub pilot_id: Option<String>,
    /// Why the row was rejected
    pub reason: String,
}

impl RejectedRecord {
    fn to_error(&self) -> ScheduleError {
        ScheduleError::MalformedRecord {
            line: self.line,
            pilot_id: self.pilot_id.clone(),
            reason: self.reason.clone(),
        }
    }
}

/// Pilot records keyed by pilot id
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    records: BTreeMap<String, PilotRecord>,
    /// Ids whose last row was malformed
    rejected_ids: BTreeMap<String, RejectedRecord>,
    /// Every rejected row, in source order
    rejected: Vec<RejectedRecord>,
}

impl Schedule {
    /// Build a schedule from already-parsed records; later duplicates win
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = PilotRecord>,
    {
        let mut schedule = Self::default();
        for record in records {
            schedule.insert(record);
        }
        schedule
    }

    /// Load the schedule file at `path`
    pub fn load<P: AsRef<Path>>(path: P, policy: MalformedRecordPolicy) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let schedule = Self::from_reader(file, policy)?;

        info!(
            path = %path.display(),
            pilots = schedule.len(),
            rejected = schedule.rejected.len(),
            "Flight schedule loaded"
        );
        Ok(schedule)
    }

    /// Read schedule rows from any reader
    pub fn from_reader<R: Read>(reader: R, policy: MalformedRecordPolicy) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        let mut schedule = Schedule::default();

        for row in csv_reader.byte_records() {
            let row = row?;
            let line = row.position().map(|pos| pos.line()).unwrap_or(0);
            let leading_id = row
                .get(0)
                .and_then(|field| std::str::from_utf8(field).ok())
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string);

            let parsed = match csv::StringRecord::from_byte_record(row) {
                Ok(row) => {
                    if row.iter().all(|field| field.trim().is_empty()) {
                        continue;
                    }
                    let fields: Vec<&str> = row.iter().collect();
                    PilotRecord::from_fields(&fields).map_err(|reason| RejectedRecord {
                        line,
                        pilot_id: fields
                            .first()
                            .filter(|id| !id.is_empty())
                            .map(|id| id.to_string()),
                        reason,
                    })
                }
                Err(_) => Err(RejectedRecord {
                    line,
                    pilot_id: leading_id,
                    reason: "row is not valid UTF-8".to_string(),
                }),
            };

            match parsed {
                Ok(record) => schedule.insert(record),
                Err(rejected) => match policy {
                    MalformedRecordPolicy::Halt => return Err(rejected.to_error()),
                    MalformedRecordPolicy::Skip => schedule.reject(rejected),
                },
            }
        }

        Ok(schedule)
    }

    fn insert(&mut self, record: PilotRecord) {
        self.rejected_ids.remove(&record.pilot_id);
        if let Some(previous) = self.records.insert(record.pilot_id.clone(), record) {
            debug!(pilot_id = %previous.pilot_id, "Duplicate pilot id, later record wins");
        }
    }

    fn reject(&mut self, rejected: RejectedRecord) {
        warn!(
            line = rejected.line,
            pilot_id = rejected.pilot_id.as_deref().unwrap_or("-"),
            reason = %rejected.reason,
            "Skipping malformed schedule record"
        );
        if let Some(pilot_id) = &rejected.pilot_id {
            self.records.remove(pilot_id);
            self.rejected_ids.insert(pilot_id.clone(), rejected.clone());
        }
        self.rejected.push(rejected);
    }

    /// Record for `pilot_id`, if present and well-formed
    pub fn lookup(&self, pilot_id: &str) -> Option<&PilotRecord> {
        self.records.get(pilot_id)
    }

    /// Record for `pilot_id`, or the reason there is none
    ///
    /// Returns `MalformedRecord` when the pilot's row was rejected at load
    /// and `UnknownPilot` when the id never appeared.
    pub fn require(&self, pilot_id: &str) -> Result<&PilotRecord> {
        if let Some(record) = self.records.get(pilot_id) {
            return Ok(record);
        }
        match self.rejected_ids.get(pilot_id) {
            Some(rejected) => Err(rejected.to_error()),
            None => Err(ScheduleError::UnknownPilot(pilot_id.to_string())),
        }
    }

    /// When `pilot_id` is scheduled to fly
    pub fn scheduled_start(&self, pilot_id: &str) -> Result<&ScheduledStart> {
        self.require(pilot_id).map(|record| &record.scheduled_start)
    }

    /// All records, ordered by pilot id
    pub fn iter(&self) -> impl Iterator<Item = &PilotRecord> {
        self.records.values()
    }

    /// Rows left out at load time, in source order
    pub fn rejected(&self) -> &[RejectedRecord] {
        &self.rejected
    }

    /// Number of pilots in the schedule
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the schedule has no pilots
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROSTER: &str = "\
P1;Amelia Earhart;FL100;40.0,-73.0;2024-06-01 14:00:00;2024-06-01 18:00:00
P2;Charles Lindbergh;FL200;40.1,-73.1;2024-06-01 09:00:00;2024-06-01 12:00:00
P3;Bessie Coleman;FL100;41.9,-87.6;2024-06-02 07:30:00;2024-06-02 09:00:00
";

    fn load(text: &str, policy: MalformedRecordPolicy) -> Result<Schedule> {
        Schedule::from_reader(text.as_bytes(), policy)
    }

    #[test]
    fn test_load_roster() {
        let schedule = load(ROSTER, MalformedRecordPolicy::Skip).unwrap();

        assert_eq!(schedule.len(), 3);
        assert!(schedule.rejected().is_empty());

        let p2 = schedule.lookup("P2").unwrap();
        assert_eq!(p2.name, "Charles Lindbergh");
        assert_eq!(p2.flight_id, "FL200");
        assert_eq!(p2.scheduled_start.as_str(), "2024-06-01 09:00:00");
    }

    #[test]
    fn test_iter_sorted_by_pilot_id() {
        let text = "Z9;Z;F;0,0;d 10:00:00;e\nA1;A;F;0,0;d 11:00:00;e\nM5;M;F;0,0;d 12:00:00;e\n";
        let schedule = load(text, MalformedRecordPolicy::Skip).unwrap();
        let ids: Vec<&str> = schedule.iter().map(|r| r.pilot_id.as_str()).collect();
        assert_eq!(ids, vec!["A1", "M5", "Z9"]);
    }

    #[test]
    fn test_duplicate_id_last_wins() {
        let text = "P1;First;FL1;0,0;2024-06-01 10:00:00;x\nP1;Second;FL2;0,0;2024-06-01 11:00:00;x\n";
        let schedule = load(text, MalformedRecordPolicy::Skip).unwrap();
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.lookup("P1").unwrap().name, "Second");
    }

    #[test]
    fn test_unknown_pilot() {
        let schedule = load(ROSTER, MalformedRecordPolicy::Skip).unwrap();
        assert!(schedule.lookup("X99").is_none());
        assert!(matches!(
            schedule.require("X99"),
            Err(ScheduleError::UnknownPilot(id)) if id == "X99"
        ));
    }

    #[test]
    fn test_skip_malformed_rows() {
        let text = "\
P1;Amelia;FL100;40.0,-73.0;2024-06-01 14:00:00;2024-06-01 18:00:00
P2;Charles;FL200;not-a-coordinate;2024-06-01 09:00:00;2024-06-01 12:00:00
P3;Bessie;FL300
P4;Wilbur;FL400;35.0,-75.0;2024-06-01 09:00:00;2024-06-01 10:00:00
";
        let schedule = load(text, MalformedRecordPolicy::Skip).unwrap();

        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.rejected().len(), 2);
        assert_eq!(schedule.rejected()[0].line, 2);
        assert_eq!(schedule.rejected()[0].pilot_id.as_deref(), Some("P2"));
        assert_eq!(schedule.rejected()[1].line, 3);

        match schedule.require("P3") {
            Err(ScheduleError::MalformedRecord { line, pilot_id, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(pilot_id.as_deref(), Some("P3"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(schedule.require("P4").is_ok());
    }

    #[test]
    fn test_halt_on_malformed_row() {
        let text = "P1;A;F;0,0;2024-06-01 10:00:00;x\nP2;B;F;0,0;10:00;x\n";
        match load(text, MalformedRecordPolicy::Halt) {
            Err(ScheduleError::MalformedRecord { line, pilot_id, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(pilot_id.as_deref(), Some("P2"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_later_valid_row_clears_rejection() {
        let text = "P1;A;F;bad;2024-06-01 10:00:00;x\nP1;A;F;1,1;2024-06-01 10:00:00;x\n";
        let schedule = load(text, MalformedRecordPolicy::Skip).unwrap();
        assert!(schedule.require("P1").is_ok());
        assert_eq!(schedule.rejected().len(), 1);
    }

    #[test]
    fn test_later_malformed_row_replaces_record() {
        let text = "P1;A;F;1,1;2024-06-01 10:00:00;x\nP1;A;F;bad;2024-06-01 10:00:00;x\n";
        let schedule = load(text, MalformedRecordPolicy::Skip).unwrap();
        assert!(schedule.lookup("P1").is_none());
        assert!(matches!(
            schedule.require("P1"),
            Err(ScheduleError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_blank_lines_ignored() {
        let text = "\nP1;A;F;1,1;2024-06-01 10:00:00;x\n\n   \nP2;B;F;1,1;2024-06-01 11:00:00;x\n";
        let schedule = load(text, MalformedRecordPolicy::Halt).unwrap();
        assert_eq!(schedule.len(), 2);
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "P1;A;F;1,1;2024-06-01 10:00:00;2024-06-01 12:00:00\r\n";
        let schedule = load(text, MalformedRecordPolicy::Halt).unwrap();
        assert_eq!(
            schedule.lookup("P1").unwrap().scheduled_end,
            "2024-06-01 12:00:00"
        );
    }

    #[test]
    fn test_invalid_utf8_row_rejected() {
        let mut bytes = b"P1;A;F;1,1;2024-06-01 10:00:00;x\n".to_vec();
        bytes.extend_from_slice(b"P2;Old;F;1,1;2024-06-01 09:00:00;x\n");
        bytes.extend_from_slice(b"P2;\xff\xfe;F;1,1;2024-06-01 10:00:00;x\n");
        let schedule = Schedule::from_reader(bytes.as_slice(), MalformedRecordPolicy::Skip).unwrap();

        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.rejected().len(), 1);
        assert_eq!(schedule.rejected()[0].line, 3);
        assert_eq!(schedule.rejected()[0].pilot_id.as_deref(), Some("P2"));

        // The earlier valid P2 row is replaced by the unreadable one
        assert!(schedule.lookup("P2").is_none());
        assert!(matches!(
            schedule.require("P2"),
            Err(ScheduleError::MalformedRecord { line: 3, .. })
        ));
    }

    #[test]
    fn test_scheduled_start_query() {
        let schedule = load(ROSTER, MalformedRecordPolicy::Skip).unwrap();
        assert_eq!(
            schedule.scheduled_start("P3").unwrap().as_str(),
            "2024-06-02 07:30:00"
        );
        assert!(schedule.scheduled_start("nobody").is_err());
    }

    #[test]
    fn test_from_records() {
        let loaded = load(ROSTER, MalformedRecordPolicy::Skip).unwrap();
        let rebuilt = Schedule::from_records(loaded.iter().cloned());
        assert_eq!(rebuilt.len(), loaded.len());
        assert!(rebuilt.rejected().is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join(format!("pilotops_missing_{}.csv", uuid::Uuid::new_v4()));
        assert!(matches!(
            Schedule::load(&path, MalformedRecordPolicy::Skip),
            Err(ScheduleError::Io(_))
        ));
    }
}
