use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use orion_repository::CheckoutOutcome;

use crate::Cli;
use super::open_repo;

#[derive(Args)]
pub struct CheckoutArgs {
    /// Branch name or full commit hash
    #[arg(value_name = "target")]
    target: String,
}

pub fn run(args: &CheckoutArgs, cli: &Cli) -> Result<i32> {
    let repo = open_repo(cli)?;

    let outcome = repo.checkout(&args.target)?;

    let stderr = io::stderr();
    let mut err = stderr.lock();
    match outcome {
        CheckoutOutcome::Branch(name) => {
            writeln!(err, "Switched to branch '{}'", name)?;
        }
        CheckoutOutcome::Detached(oid) => {
            let commit = repo.odb().read_commit(&oid)?;
            let hex = oid.to_hex();
            writeln!(err, "HEAD is now at {} {}", &hex[..7], commit.summary())?;
        }
    }

    Ok(0)
}
