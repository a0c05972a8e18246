//! Command-line flags

use std::path::PathBuf;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub schedule: Option<PathBuf>,
    pub late_log: Option<PathBuf>,
    pub json: bool,
    pub help: bool,
}

pub fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    let mut args_iter = args.iter();

    while let Some(arg) = args_iter.next() {
        match arg.as_str() {
            "--config" | "-c" => parsed.config = Some(path_value(arg, args_iter.next())?),
            "--schedule" | "-s" => parsed.schedule = Some(path_value(arg, args_iter.next())?),
            "--late-log" | "-l" => parsed.late_log = Some(path_value(arg, args_iter.next())?),
            "--json" => parsed.json = true,
            "--help" | "-h" => parsed.help = true,
            other => return Err(format!("unknown argument '{}'", other)),
        }
    }

    Ok(parsed)
}

fn path_value(flag: &str, value: Option<&String>) -> Result<PathBuf, String> {
    match value {
        Some(path) if !path.starts_with('-') => Ok(PathBuf::from(path)),
        _ => Err(format!("{} was provided without a path", flag)),
    }
}

pub fn print_usage() {
    println!("PilotOps flight control desk");
    println!();
    println!("USAGE:");
    println!("    pilotops-console [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <path>     TOML configuration file");
    println!("    -s, --schedule <path>   Pilot schedule (overrides files.schedule)");
    println!("    -l, --late-log <path>   Late check-in log (overrides files.late_checkins)");
    println!("        --json              Print operation results as JSON");
    println!("    -h, --help              Show this message");
    println!();
    println!("Log level follows RUST_LOG, falling back to logging.level.");
}
