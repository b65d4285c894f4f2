//! CLI argument parsing for wincmdline.
//!
//! Commands: quote, split, name, launch
//! Flags: --debug/-d

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "wincmdline", version, about = "Windows command-line quoting and detached launching")]
pub struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the command line built from ARGS.
    Quote {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Print the arguments CMDLINE splits into, as a JSON array.
    Split { cmdline: String },
    /// Print the display name of an executable path.
    Name { path: String },
    /// Prepare and start a launch descriptor read from JSON.
    Launch {
        /// Descriptor file. Read from stdin when omitted.
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Report what would be started without starting it.
        #[arg(long)]
        dry_run: bool,
    },
}
