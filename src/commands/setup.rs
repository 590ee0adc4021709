//! # Setup Command Implementation
//!
//! This module implements the `setup` subcommand: the one-shot bootstrap of
//! a fresh workspace. It clones every non-archived repository of the
//! organization into the `unsorted` staging directory, organizes the clones
//! into category directories, generates the metadata document, and records
//! intra-organization dependencies.
//!
//! The command prompts for confirmation before touching the network; the
//! `--yes` flag skips the prompt for unattended use. Re-running setup is
//! safe: existing clones are skipped, and metadata regeneration is
//! additive.

use anyhow::Result;
use clap::Args;
use console::style;
use dialoguer::Confirm;

use org_workspace::categorize::Categorizer;
use org_workspace::config::Config;
use org_workspace::github::{GithubApi, RepoLister};
use org_workspace::metadata::MetadataStore;
use org_workspace::updater::Updater;

/// Clone and organize all of the organization's repositories
#[derive(Args, Debug)]
pub struct SetupArgs {
    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

/// Execute the `setup` command.
pub fn execute(config: &Config, args: SetupArgs) -> Result<()> {
    println!("{}", "=".repeat(50));
    println!("{} Repository Collection Setup", config.org);
    println!("{}", "=".repeat(50));
    println!();
    println!(
        "This will clone all non-archived {} repositories",
        config.org
    );
    println!("and organize them into categories.");
    println!();

    if !args.yes {
        let proceed = Confirm::new()
            .with_prompt("Continue?")
            .default(false)
            .interact()?;
        if !proceed {
            return Ok(());
        }
    }

    println!("\nStep 1/4: Cloning repositories...");
    let api = GithubApi::new(config.org.clone(), config.token.clone());
    let names: Vec<String> = api.fetch_all_repos().into_iter().map(|r| r.name).collect();
    let updater = Updater::new(config);
    let cloned = updater.clone_missing(&names, None)?;
    println!(
        "  - Cloned: {}, already present: {}, failed: {}",
        cloned.cloned, cloned.skipped, cloned.failed
    );

    println!("\nStep 2/4: Organizing into categories...");
    let categorizer = Categorizer::new(config.categories()?)?;
    let organized = categorizer.organize_repositories(&config.base_dir, false)?;
    println!("  - Moved: {}", organized.moved);
    for err in &organized.errors {
        println!("  - Error: {}", err);
    }

    println!("\nStep 3/4: Generating metadata...");
    MetadataStore::new(config).generate()?;

    println!("\nStep 4/4: Refreshing dependencies...");
    MetadataStore::new(config).refresh_dependencies()?;

    println!("\n{}", "=".repeat(50));
    println!("{} Setup Complete!", style("✅").green());
    println!("{}", "=".repeat(50));
    Ok(())
}
