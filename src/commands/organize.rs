//! # Organize Command Implementation
//!
//! This module implements the `organize` subcommand, which moves each
//! repository directory into the category directory its name patterns map
//! to. With `--dry-run` the intended moves are reported without touching
//! the filesystem; a subsequent real run performs exactly the moves the
//! dry run predicted.

use anyhow::Result;
use clap::Args;

use org_workspace::categorize::Categorizer;
use org_workspace::config::Config;

/// Move repositories into their correct category directories
#[derive(Args, Debug)]
pub struct OrganizeArgs {
    /// Preview the moves without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,
}

/// Execute the `organize` command.
pub fn execute(config: &Config, args: OrganizeArgs) -> Result<()> {
    println!("Organizing repositories into categories...");
    println!();

    let categorizer = Categorizer::new(config.categories()?)?;
    let results = categorizer.organize_repositories(&config.base_dir, args.dry_run)?;

    println!();
    let prefix = if args.dry_run { "(DRY RUN) " } else { "" };
    println!("Organization {}complete!", prefix);
    println!("  - Moved: {}", results.moved);
    for err in &results.errors {
        println!("  - Error: {}", err);
    }
    Ok(())
}
