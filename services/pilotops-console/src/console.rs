//! Interactive menu over the schedule operations.
//!
//! Presentation only: every branch calls one library operation and prints
//! its result. Errors are shown to the operator and the session continues.

use pilotops_schedule::{
    detect_conflict, process_checkin, CheckInOutcome, ClockTime, ConflictOutcome, LateCheckinLog,
    Schedule, ScheduleError,
};
use serde::Serialize;
use std::io::{self, BufRead, Write};

const MENU: &str = "Flight Control & Scheduling of Pilots
1. Show flight schedule
2. Check flight start time for a pilot
3. Pilot check in
4. Detect conflict for flights
5. Exit
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    ShowSchedule,
    ShowStart,
    CheckIn,
    DetectConflict,
    Exit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::ShowSchedule),
            "2" => Some(MenuChoice::ShowStart),
            "3" => Some(MenuChoice::CheckIn),
            "4" => Some(MenuChoice::DetectConflict),
            "5" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct ScheduleEntry<'a> {
    pilot_id: &'a str,
    name: &'a str,
    flight_id: &'a str,
    scheduled_start: &'a str,
}

#[derive(Serialize)]
struct CheckInReport<'a> {
    pilot_id: &'a str,
    checkin_time: String,
    outcome: CheckInOutcome,
}

#[derive(Serialize)]
struct ErrorReport {
    error: String,
}

pub struct Console<'a, R, W> {
    schedule: &'a Schedule,
    late_log: &'a dyn LateCheckinLog,
    input: R,
    output: W,
    json: bool,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub fn new(
        schedule: &'a Schedule,
        late_log: &'a dyn LateCheckinLog,
        input: R,
        output: W,
        json: bool,
    ) -> Self {
        Self {
            schedule,
            late_log,
            input,
            output,
            json,
        }
    }

    /// Run until the operator exits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            let Some(choice) = self.prompt(MENU)? else {
                return Ok(());
            };

            match MenuChoice::parse(&choice) {
                Some(MenuChoice::ShowSchedule) => self.show_schedule()?,
                Some(MenuChoice::ShowStart) => self.show_start()?,
                Some(MenuChoice::CheckIn) => self.check_in()?,
                Some(MenuChoice::DetectConflict) => self.detect_conflict()?,
                Some(MenuChoice::Exit) => return Ok(()),
                None => writeln!(self.output, "Incorrect choice entered")?,
            }
        }
    }

    fn show_schedule(&mut self) -> io::Result<()> {
        let schedule = self.schedule;
        if self.json {
            let entries: Vec<ScheduleEntry<'_>> = schedule
                .iter()
                .map(|record| ScheduleEntry {
                    pilot_id: &record.pilot_id,
                    name: &record.name,
                    flight_id: &record.flight_id,
                    scheduled_start: record.scheduled_start.as_str(),
                })
                .collect();
            return self.emit_json(&entries);
        }

        for record in schedule.iter() {
            writeln!(
                self.output,
                "Pilot {} name is {} they are scheduled to fly on {}",
                record.pilot_id, record.name, record.scheduled_start
            )?;
        }
        let rejected = schedule.rejected().len();
        if rejected > 0 {
            writeln!(
                self.output,
                "{} schedule record(s) could not be read and were skipped",
                rejected
            )?;
        }
        Ok(())
    }

    fn show_start(&mut self) -> io::Result<()> {
        let schedule = self.schedule;
        let Some(pilot_id) =
            self.prompt("Type the pilot id for the start date/time you want to see: ")?
        else {
            return Ok(());
        };
        let pilot_id = pilot_id.trim();

        match schedule.require(pilot_id) {
            Ok(record) if self.json => self.emit_json(&ScheduleEntry {
                pilot_id: &record.pilot_id,
                name: &record.name,
                flight_id: &record.flight_id,
                scheduled_start: record.scheduled_start.as_str(),
            }),
            Ok(record) => writeln!(
                self.output,
                "{} has a scheduled flight for {}",
                record.name, record.scheduled_start
            ),
            Err(err) => self.report_error(&err),
        }
    }

    fn check_in(&mut self) -> io::Result<()> {
        let Some(pilot_id) = self.prompt("Please enter the pilot's id for check in: ")? else {
            return Ok(());
        };
        let pilot_id = pilot_id.trim().to_string();

        let checkin_time = loop {
            let Some(input) = self.prompt("What time are they checking in? (HH:MM:SS, blank to cancel) ")?
            else {
                return Ok(());
            };
            let input = input.trim();
            if input.is_empty() {
                return writeln!(self.output, "Check-in cancelled");
            }
            match ClockTime::parse(input) {
                Ok(time) => break time,
                Err(_) => writeln!(self.output, "Incorrect format. Enter it as HH:MM:SS.")?,
            }
        };

        match process_checkin(&pilot_id, self.schedule, checkin_time, self.late_log) {
            Ok(outcome) if self.json => self.emit_json(&CheckInReport {
                pilot_id: &pilot_id,
                checkin_time: checkin_time.to_string(),
                outcome,
            }),
            Ok(CheckInOutcome::OnTime) => {
                writeln!(self.output, "You have checked in successfully")
            }
            Ok(CheckInOutcome::Late) => {
                writeln!(self.output, "You have checked in late. Late check-in logged.")
            }
            Err(err) => self.report_error(&err),
        }
    }

    fn detect_conflict(&mut self) -> io::Result<()> {
        let Some(first) = self.prompt("Please enter the first pilot's id: ")? else {
            return Ok(());
        };
        let Some(second) = self.prompt("Please enter the second pilot's id: ")? else {
            return Ok(());
        };
        let (first, second) = (first.trim(), second.trim());

        if first == second {
            return writeln!(self.output, "Please enter two different pilot ids");
        }

        match detect_conflict(first, second, self.schedule) {
            Ok(outcome) if self.json => self.emit_json(&outcome),
            Ok(ConflictOutcome::Conflict(report)) => writeln!(self.output, "{}", report),
            Ok(ConflictOutcome::Clear { .. }) => writeln!(self.output, "No conflict detected."),
            Err(err) => self.report_error(&err),
        }
    }

    fn report_error(&mut self, err: &ScheduleError) -> io::Result<()> {
        if self.json {
            self.emit_json(&ErrorReport {
                error: err.to_string(),
            })
        } else {
            writeln!(self.output, "Error: {}", err)
        }
    }

    fn emit_json<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        let line = serde_json::to_string(value)?;
        writeln!(self.output, "{}", line)
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
