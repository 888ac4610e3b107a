//! Command line entry point for orion.
//!
//! Parses arguments, changes directory when `-C` is given, and routes
//! to the subcommand implementations in [`commands`]. Runtime failures
//! are printed as `fatal:` lines and turn into exit code 128, matching
//! the convention scripts expect from version control tools.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::Parser;

use crate::commands::Commands;

#[derive(Parser)]
#[command(
    name = "orion",
    about = "A minimal content-addressed version control system",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Run as if orion was started in <path>
    #[arg(short = 'C', global = true, value_name = "path")]
    change_dir: Option<PathBuf>,
}

/// Rewrite `log -<n>` into `log --max-count <n>` before clap sees it.
fn preprocess_args() -> Vec<String> {
    let args: Vec<String> = std::env::args().collect();
    let log_invocation = args.iter().any(|arg| arg == "log");
    let mut result = Vec::with_capacity(args.len());

    for arg in args {
        if log_invocation && arg.len() >= 2 && arg.starts_with('-') && !arg.starts_with("--") {
            let digits = &arg[1..];
            if digits.chars().all(|c| c.is_ascii_digit()) {
                result.push("--max-count".to_string());
                result.push(digits.to_string());
                continue;
            }
        }
        result.push(arg);
    }

    result
}

fn main() {
    let cli = match Cli::try_parse_from(preprocess_args()) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
                _ => process::exit(128),
            }
        }
    };

    if let Some(dir) = &cli.change_dir {
        if let Err(e) = std::env::set_current_dir(dir) {
            eprintln!("fatal: cannot change to '{}': {}", dir.display(), e);
            process::exit(128);
        }
    }

    match commands::run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("fatal: {e}");
            process::exit(128);
        }
    }
}
