use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;

use crate::Cli;
use super::open_repo;

#[derive(Args)]
pub struct AddArgs {
    /// Be verbose
    #[arg(short, long)]
    verbose: bool,

    /// Files or directories to add
    #[arg(value_name = "pathspec")]
    paths: Vec<PathBuf>,
}

pub fn run(args: &AddArgs, cli: &Cli) -> Result<i32> {
    if args.paths.is_empty() {
        bail!("Nothing specified, nothing added.\nMaybe you wanted to say 'orion add .'?");
    }

    let repo = open_repo(cli)?;
    let staged = repo.add(&args.paths)?;

    if args.verbose {
        let stderr = io::stderr();
        let mut err = stderr.lock();
        for path in &staged {
            writeln!(err, "add '{}'", path)?;
        }
    }

    Ok(0)
}
