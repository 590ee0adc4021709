//! # Update Command Implementation
//!
//! This module implements the `update` subcommand, one full reconciliation
//! pass over the workspace:
//!
//! 1. Fetch/compare/pull every enabled repository, tallying outcomes.
//! 2. Diff the remote listing for repositories not yet cloned locally.
//! 3. Regenerate the metadata document.
//!
//! Per-repository failures are reported in the summary and never abort the
//! pass; re-running the command is always safe.

use anyhow::Result;
use clap::Args;
use console::style;

use org_workspace::config::Config;
use org_workspace::metadata::MetadataStore;
use org_workspace::updater::Updater;

/// Update all enabled repositories and check for new ones
#[derive(Args, Debug)]
pub struct UpdateArgs {}

/// Execute the `update` command.
pub fn execute(config: &Config, _args: UpdateArgs) -> Result<()> {
    println!("{}", "=".repeat(50));
    println!("Updating {} Repositories", config.org);
    println!("{}", "=".repeat(50));
    println!();

    let updater = Updater::new(config);

    println!("Updating existing repositories...");
    let results = updater.update_all()?;

    println!("\nUpdate Summary:");
    println!("  - Updated: {}", results.updated);
    println!("  - Up-to-date: {}", results.up_to_date);
    println!("  - Failed: {}", results.failed);
    if results.no_upstream > 0 {
        println!("  - No upstream: {}", results.no_upstream);
    }
    if results.skipped > 0 {
        println!("  - Disabled (skipped): {}", results.skipped);
    }

    println!("\nChecking for new repositories...");
    let new_repos = updater.check_new_repos()?;

    if new_repos.is_empty() {
        println!("  No new repositories found.");
    } else {
        println!("  Found {} new repository/repositories:", new_repos.len());
        for name in &new_repos {
            println!("    - {}", name);
        }
    }

    println!("\nRegenerating metadata...");
    MetadataStore::new(config).generate()?;

    println!("\n{}", "=".repeat(50));
    println!("{} Update complete!", style("✅").green());
    println!("{}", "=".repeat(50));
    Ok(())
}
