use std::io::{self, Write};

use anyhow::Result;
use clap::Args;

use crate::Cli;
use super::open_repo;

#[derive(Args)]
pub struct LogArgs {
    /// Limit the number of commits to output
    #[arg(short = 'n', long = "max-count", value_name = "number", default_value_t = 10)]
    max_count: usize,
}

pub fn run(args: &LogArgs, cli: &Cli) -> Result<i32> {
    let repo = open_repo(cli)?;

    if repo.is_unborn()? {
        let branch_name = match repo.current_branch() {
            Ok(Some(name)) => name,
            _ => "main".to_string(),
        };
        let stderr = io::stderr();
        let mut err = stderr.lock();
        writeln!(
            err,
            "fatal: your current branch '{}' does not have any commits yet",
            branch_name
        )?;
        return Ok(128);
    }

    let commits = repo.log(Some(args.max_count))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (i, (oid, commit)) in commits.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "commit {}", oid.to_hex())?;
        writeln!(out, "Author: {}", commit.author.name)?;
        writeln!(out, "Date:   {}", commit.author.time.format_default())?;
        writeln!(out)?;
        for line in commit.message.lines() {
            writeln!(out, "    {}", line)?;
        }
    }

    Ok(0)
}
