//! End-to-end tests over on-disk schedule and late check-in files
//!
//! These tests verify the desk's three questions against a real roster file:
//! - When a pilot is scheduled to fly
//! - Whether a check-in is on time, with late check-ins appended to disk
//! - Whether two pilots' departures conflict

use pilotops_schedule::{
    detect_conflict, process_checkin, validate, CheckInOutcome, ClockTime, ConflictOutcome,
    FileLateCheckinLog, MalformedRecordPolicy, Schedule, ScheduleError,
};
use std::path::PathBuf;

fn temp_path(prefix: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{}_{}.csv", prefix, uuid::Uuid::new_v4()))
}

fn write_roster(rows: &str) -> PathBuf {
    let path = temp_path("integration_roster");
    std::fs::write(&path, rows).unwrap();
    path
}

#[test]
fn test_checkin_scenario_with_file_log() {
    let roster = write_roster("P1;Amelia Earhart;FL100;40.0,-73.0;2024-06-01 14:00:00;2024-06-01 18:00:00\n");
    let late_path = temp_path("integration_late");

    let schedule = Schedule::load(&roster, MalformedRecordPolicy::Skip).unwrap();
    let log = FileLateCheckinLog::new(&late_path);

    // On time: exactly one hour before, nothing written
    assert!(validate("13:00:00"));
    let on_time = ClockTime::parse("13:00:00").unwrap();
    assert_eq!(
        process_checkin("P1", &schedule, on_time, &log).unwrap(),
        CheckInOutcome::OnTime
    );
    assert!(!late_path.exists());

    // Late: one entry appended
    let late = ClockTime::parse("13:30:00").unwrap();
    assert_eq!(
        process_checkin("P1", &schedule, late, &log).unwrap(),
        CheckInOutcome::Late
    );
    assert_eq!(
        std::fs::read_to_string(&late_path).unwrap(),
        "P1;checked in late\n"
    );

    // Late again: appended, not overwritten
    process_checkin("P1", &schedule, late, &log).unwrap();
    assert_eq!(
        std::fs::read_to_string(&late_path).unwrap(),
        "P1;checked in late\nP1;checked in late\n"
    );

    std::fs::remove_file(&roster).ok();
    std::fs::remove_file(&late_path).ok();
}

#[test]
fn test_invalid_time_never_reaches_processor() {
    for input in ["25:00:00", "9:00:00", "12:60:00", "noon"] {
        assert!(!validate(input));
        assert!(matches!(
            ClockTime::parse(input),
            Err(ScheduleError::InvalidTimeFormat(_))
        ));
    }
}

#[test]
fn test_late_checkin_with_unwritable_log_fails() {
    let roster = write_roster("P1;A;FL1;0,0;2024-06-01 08:00:00;2024-06-01 09:00:00\n");
    let schedule = Schedule::load(&roster, MalformedRecordPolicy::Skip).unwrap();
    let log = FileLateCheckinLog::new(std::env::temp_dir());

    let result = process_checkin("P1", &schedule, ClockTime::parse("07:59:00").unwrap(), &log);
    assert!(matches!(result, Err(ScheduleError::LogWriteFailure { .. })));

    std::fs::remove_file(&roster).ok();
}

#[test]
fn test_conflict_scenarios() {
    let roster = write_roster(
        "\
P1;Amelia;FL100;40.0,-73.0;2024-06-01 09:00:00;2024-06-01 12:00:00
P2;Charles;FL200;40.1,-73.1;2024-06-01 09:00:00;2024-06-01 12:00:00
P3;Bessie;FL300;40.1,-73.1;2024-06-01 10:00:00;2024-06-01 12:00:00
",
    );
    let schedule = Schedule::load(&roster, MalformedRecordPolicy::Halt).unwrap();

    let outcome = detect_conflict("P1", "P2", &schedule).unwrap();
    assert!(matches!(outcome, ConflictOutcome::Conflict(_)));
    let reverse = detect_conflict("P2", "P1", &schedule).unwrap();
    assert!(reverse.is_conflict());
    assert_eq!(outcome.distance_km(), reverse.distance_km());

    // Proximity alone is not enough
    assert!(!detect_conflict("P1", "P3", &schedule).unwrap().is_conflict());

    assert!(matches!(
        detect_conflict("P1", "X99", &schedule),
        Err(ScheduleError::UnknownPilot(_))
    ));

    std::fs::remove_file(&roster).ok();
}

#[test]
fn test_malformed_row_fails_only_its_lookup() {
    let roster = write_roster(
        "\
P1;Amelia;FL100;40.0,-73.0;2024-06-01 09:00:00;2024-06-01 12:00:00
P2;Charles;FL200;40.1
P3;Bessie;FL300;40.1,-73.1;2024-06-01 09:00:00;2024-06-01 12:00:00
",
    );

    let schedule = Schedule::load(&roster, MalformedRecordPolicy::Skip).unwrap();
    assert_eq!(schedule.len(), 2);
    assert!(schedule.scheduled_start("P1").is_ok());
    assert!(matches!(
        schedule.scheduled_start("P2"),
        Err(ScheduleError::MalformedRecord { line: 2, .. })
    ));
    assert!(matches!(
        detect_conflict("P1", "P2", &schedule),
        Err(ScheduleError::MalformedRecord { .. })
    ));
    assert!(detect_conflict("P1", "P3", &schedule).unwrap().is_conflict());

    assert!(matches!(
        Schedule::load(&roster, MalformedRecordPolicy::Halt),
        Err(ScheduleError::MalformedRecord { line: 2, .. })
    ));

    std::fs::remove_file(&roster).ok();
}
