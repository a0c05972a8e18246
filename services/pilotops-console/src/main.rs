//! PilotOps console
//!
//! Loads the pilot schedule once at startup and serves the flight control
//! desk menu on stdin/stdout. Logs go to stderr.

mod args;
mod console;

use anyhow::Context;
use pilotops_core::{logging, Config};
use pilotops_schedule::{FileLateCheckinLog, Schedule};
use std::io;
use std::process;

use crate::args::{parse_args, print_usage, CliArgs};
use crate::console::Console;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage();
            process::exit(2);
        }
    };

    if cli.help {
        print_usage();
        return Ok(());
    }

    let config = load_config(&cli)?;
    logging::init_from_config(&config.logging);

    let schedule = Schedule::load(&config.files.schedule, config.schedule.malformed_records)
        .with_context(|| {
            format!(
                "failed to load flight schedule from {}",
                config.files.schedule.display()
            )
        })?;
    println!("Flight schedule loaded...");

    let late_log = FileLateCheckinLog::new(&config.files.late_checkins);
    tracing::info!(
        pilots = schedule.len(),
        late_log = %late_log.path().display(),
        "Flight control desk ready"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    Console::new(&schedule, &late_log, stdin.lock(), stdout.lock(), cli.json).run()?;

    tracing::info!("Flight control desk closed");
    Ok(())
}

fn load_config(cli: &CliArgs) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to read configuration {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(schedule) = &cli.schedule {
        config.files.schedule = schedule.clone();
    }
    if let Some(late_log) = &cli.late_log {
        config.files.late_checkins = late_log.clone();
    }

    config.validate()?;
    Ok(config)
}
