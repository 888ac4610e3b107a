use std::io::{self, Write};

use anyhow::Result;
use clap::Args;

use crate::Cli;
use super::open_repo;

#[derive(Args)]
pub struct CommitArgs {
    /// Use the given message as the commit message
    #[arg(short = 'm', long = "message", value_name = "msg")]
    message: String,

    /// Override the author name for this commit
    #[arg(long, value_name = "name")]
    author: Option<String>,
}

pub fn run(args: &CommitArgs, cli: &Cli) -> Result<i32> {
    let repo = open_repo(cli)?;

    let stderr = io::stderr();
    let mut err = stderr.lock();

    let outcome = match repo.commit(&args.message, args.author.as_deref())? {
        Some(outcome) => outcome,
        None => {
            writeln!(err, "nothing to commit")?;
            return Ok(0);
        }
    };

    let hex = outcome.oid.to_hex();
    let short = &hex[..7];
    let head = match (&outcome.branch, outcome.root_commit) {
        (Some(branch), true) => format!("{branch} (root-commit)"),
        (Some(branch), false) => branch.clone(),
        (None, _) => format!("(HEAD detached at {short})"),
    };
    writeln!(err, "[{} {}] {}", head, short, outcome.summary)?;

    Ok(0)
}
