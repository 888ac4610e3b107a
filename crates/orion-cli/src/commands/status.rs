use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use orion_repository::FileStatus;
use orion_utils::color::{self, Color, ColorMode};

use crate::Cli;
use super::open_repo;

#[derive(Args)]
pub struct StatusArgs {}

pub fn run(_args: &StatusArgs, cli: &Cli) -> Result<i32> {
    let repo = open_repo(cli)?;
    let report = repo.status()?;

    let use_color = color::use_color_stdout(ColorMode::Auto);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match repo.current_branch()? {
        Some(branch) => writeln!(out, "On branch {}", branch)?,
        None => {
            if let Some(oid) = repo.head_oid()? {
                let hex = oid.to_hex();
                writeln!(out, "HEAD detached at {}", &hex[..7])?;
            } else {
                writeln!(out, "HEAD detached")?;
            }
        }
    }

    if repo.is_unborn()? {
        writeln!(out, "\nNo commits yet\n")?;
    }

    let mut staged = Vec::new();
    let mut unstaged = Vec::new();
    let mut untracked = Vec::new();
    for entry in &report.entries {
        match entry.status {
            FileStatus::NewStaged => staged.push(("new file", entry.path.as_str())),
            FileStatus::ModifiedStaged => staged.push(("modified", entry.path.as_str())),
            FileStatus::ModifiedUnstaged => unstaged.push(("modified", entry.path.as_str())),
            FileStatus::Deleted => unstaged.push(("deleted", entry.path.as_str())),
            FileStatus::Untracked => untracked.push(entry.path.as_str()),
        }
    }

    if !staged.is_empty() {
        writeln!(out, "Changes to be committed:")?;
        for (word, path) in &staged {
            let line = format!("\t{}:   {}", word, path);
            writeln!(out, "{}", color::colorize(&line, Color::Green, use_color))?;
        }
        writeln!(out)?;
    }

    if !unstaged.is_empty() {
        writeln!(out, "Changes not staged for commit:")?;
        writeln!(
            out,
            "  (use \"orion add <file>...\" to update what will be committed)"
        )?;
        for (word, path) in &unstaged {
            let line = format!("\t{}:   {}", word, path);
            writeln!(out, "{}", color::colorize(&line, Color::Red, use_color))?;
        }
        writeln!(out)?;
    }

    if !untracked.is_empty() {
        writeln!(out, "Untracked files:")?;
        writeln!(
            out,
            "  (use \"orion add <file>...\" to include in what will be committed)"
        )?;
        for path in &untracked {
            let line = format!("\t{}", path);
            writeln!(out, "{}", color::colorize(&line, Color::Red, use_color))?;
        }
        writeln!(out)?;
    }

    if staged.is_empty() && unstaged.is_empty() && untracked.is_empty() {
        writeln!(out, "nothing to commit, working tree clean")?;
    } else if staged.is_empty() {
        if !untracked.is_empty() {
            writeln!(
                out,
                "nothing added to commit but untracked files present (use \"orion add\" to track)"
            )?;
        } else {
            writeln!(out, "no changes added to commit (use \"orion add\")")?;
        }
    }

    Ok(0)
}
