mod cli;
mod log;

use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use wincmdline::{config, display_name, quote, spawn, split, LaunchError};

use crate::cli::{Cli, Command};

/// What `launch` prints once a descriptor has been prepared.
#[derive(Debug, Serialize)]
struct LaunchReport<'a> {
    name: &'a str,
    command_line: &'a str,
    creation_flags: u32,
    detached: bool,
    pid: Option<u32>,
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, LaunchError> {
    serde_json::to_string(value).map_err(LaunchError::Encode)
}

fn run_launch(file: Option<&std::path::Path>, dry_run: bool) -> Result<(), LaunchError> {
    let launch = match file {
        Some(path) => config::load_launch(path)?,
        None => config::read_launch(std::io::stdin().lock())?,
    };

    let prepared = launch.prepare();
    let pid = if dry_run {
        None
    } else {
        Some(spawn::spawn(&prepared)?)
    };

    let report = LaunchReport {
        name: prepared.name(),
        command_line: prepared.argstring(),
        creation_flags: prepared.creation_flags(),
        detached: prepared.is_detached(),
        pid,
    };
    println!("{}", encode(&report)?);
    Ok(())
}

fn run(command: Command) -> Result<(), LaunchError> {
    match command {
        Command::Quote { args } => println!("{}", quote(&args)),
        Command::Split { cmdline } => println!("{}", encode(&split(&cmdline))?),
        Command::Name { path } => println!("{}", display_name(&path)),
        Command::Launch { file, dry_run } => run_launch(file.as_deref(), dry_run)?,
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // --help and --version land here too and are not failures.
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    log::init(cli.debug);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
