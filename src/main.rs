use std::process::ExitCode;

use clap::Parser;
use invigilation_planner::cli::{Args, Command, render, solve_file};
use invigilation_planner::server;
use log::error;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    match args.command {
        Command::Serve { addr } => match server::run_server(addr).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("Server failed: {e}");
                ExitCode::FAILURE
            }
        },
        Command::Solve { input, json } => match solve_file(&input) {
            Ok(schedule) => match render(&schedule, json) {
                Ok(text) => {
                    println!("{text}");
                    if schedule.success {
                        ExitCode::SUCCESS
                    } else {
                        ExitCode::from(2)
                    }
                }
                Err(e) => {
                    error!("Failed to render schedule: {e}");
                    ExitCode::FAILURE
                }
            },
            Err(e) => {
                error!("{e}");
                ExitCode::FAILURE
            }
        },
    }
}
