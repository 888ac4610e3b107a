use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use orion_repository::{Repository, ORION_DIR};

use crate::Cli;

#[derive(Args)]
pub struct InitArgs {
    /// Be quiet, only report errors
    #[arg(short, long)]
    quiet: bool,

    /// Directory to create the repository in
    directory: Option<PathBuf>,
}

pub fn run(args: &InitArgs, _cli: &Cli) -> Result<i32> {
    let target = match &args.directory {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    if !target.exists() {
        std::fs::create_dir_all(&target)?;
    }

    let existing = target.join(ORION_DIR).join("HEAD").is_file();
    let repo = Repository::init(&target)?;

    if !args.quiet {
        let stderr = io::stderr();
        let mut err = stderr.lock();
        if existing {
            writeln!(err, "Repository already exists")?;
        } else {
            let orion_dir = std::fs::canonicalize(repo.orion_dir())
                .unwrap_or_else(|_| repo.orion_dir().to_path_buf());
            let mut display_path = orion_dir.display().to_string();
            if !display_path.ends_with('/') {
                display_path.push('/');
            }
            writeln!(err, "Initialized empty orion repository in {}", display_path)?;
        }
    }

    Ok(0)
}
