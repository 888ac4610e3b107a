use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use orion_repository::Repository;
use orion_utils::color::{self, Color, ColorMode};

use crate::Cli;
use super::open_repo;

#[derive(Args)]
pub struct BranchArgs {
    /// Delete a branch
    #[arg(short, long)]
    delete: bool,

    /// Show current branch
    #[arg(long)]
    show_current: bool,

    /// Branch name (for create/delete)
    name: Option<String>,
}

pub fn run(args: &BranchArgs, cli: &Cli) -> Result<i32> {
    let repo = open_repo(cli)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.show_current {
        if let Some(branch) = repo.current_branch()? {
            writeln!(out, "{}", branch)?;
        }
        return Ok(0);
    }

    if args.delete {
        let name = args
            .name
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("branch name required"))?;
        return delete_branch(&repo, name, &mut out);
    }

    if let Some(ref name) = args.name {
        repo.refs().create_branch_from_head(name)?;
        return Ok(0);
    }

    list_branches(&repo, &mut out)
}

fn delete_branch(repo: &Repository, name: &str, out: &mut impl Write) -> Result<i32> {
    let oid = repo.refs().read_branch(name)?;
    repo.refs().delete_branch(name)?;

    let was = oid
        .map(|o| o.to_hex()[..7].to_string())
        .unwrap_or_else(|| "?".to_string());
    writeln!(out, "Deleted branch {} (was {}).", name, was)?;
    Ok(0)
}

fn list_branches(repo: &Repository, out: &mut impl Write) -> Result<i32> {
    let color_on = color::use_color_stdout(ColorMode::Auto);
    let current = repo.current_branch()?;

    for branch in repo.refs().list_branches()? {
        if current.as_deref() == Some(branch.as_str()) {
            writeln!(out, "* {}", color::colorize(&branch, Color::Green, color_on))?;
        } else {
            writeln!(out, "  {}", branch)?;
        }
    }

    Ok(0)
}
