//! # Refresh-Deps Command Implementation
//!
//! This module implements the `refresh-deps` subcommand (alias
//! `refresh-dependencies`), which re-scans every local repository's
//! `Cargo.toml` and records dependencies on sibling organization
//! repositories in the metadata document.

use anyhow::Result;
use clap::Args;

use org_workspace::config::{Config, METADATA_FILE};
use org_workspace::metadata::MetadataStore;

/// Refresh intra-organization dependency information in the metadata
#[derive(Args, Debug)]
pub struct RefreshDepsArgs {}

/// Execute the `refresh-deps` command.
pub fn execute(config: &Config, _args: RefreshDepsArgs) -> Result<()> {
    println!("Refreshing intra-org dependencies...");

    MetadataStore::new(config).refresh_dependencies()?;

    println!("✓ Refreshed dependencies in {}", METADATA_FILE);
    Ok(())
}
