use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::debug;

use crate::data::{Schedule, SchedulingInput};
use crate::error::{Error, Result};
use crate::schedule::build_schedule;

const APP_NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Parser)]
#[command(name = APP_NAME)]
#[command(version = VERSION)]
#[command(about = "Assigns invigilating teachers to exams", long_about = None)]
pub struct Args {
    /// Default log filter, overridden by RUST_LOG
    #[arg(long, global = true, env = "INVIGILATION_LOG", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the scheduling API over HTTP
    Serve {
        #[arg(long, env = "INVIGILATION_ADDR", default_value = "127.0.0.1:8080")]
        addr: SocketAddr,
    },
    /// Solve a JSON file of exams and teachers and print the report
    Solve {
        /// File holding `{ "exams": [...], "teachers": [...] }`
        input: PathBuf,

        /// Also print the assignment map as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Parses and validates a `{ "exams": [...], "teachers": [...] }` document.
pub fn parse_input(text: &str) -> Result<SchedulingInput> {
    let input: SchedulingInput = serde_json::from_str(text)?;
    input.validate().map_err(Error::InvalidInput)?;
    Ok(input)
}

/// Backs the `solve` subcommand.
pub fn solve_file(path: &Path) -> Result<Schedule> {
    debug!("Reading scheduling input from {}", path.display());
    let text = std::fs::read_to_string(path)?;
    let input = parse_input(&text)?;
    build_schedule(&input.exams, &input.teachers)
}

/// The text printed by `solve`: the report, then the map as JSON if asked.
pub fn render(schedule: &Schedule, json: bool) -> Result<String> {
    let mut out = schedule.report.clone();
    if json {
        if !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&serde_json::to_string_pretty(&schedule.assignments)?);
    }
    Ok(out)
}
