//! CLI entry point for masked maze generation

use clap::Parser;
use maskmaze::io::cli::{Cli, MazeRunner};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut runner = MazeRunner::new(cli);
    match runner.process() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{error}");
            ExitCode::FAILURE
        }
    }
}
