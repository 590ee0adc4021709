//! # Metadata Command Implementation
//!
//! This module implements the `metadata` subcommand, which regenerates the
//! workspace metadata document from a fresh filesystem scan. Regeneration
//! is additive: operator-set fields survive, only categories and counts are
//! recomputed.

use anyhow::Result;
use clap::Args;

use org_workspace::config::{Config, METADATA_FILE};
use org_workspace::metadata::MetadataStore;

/// Regenerate the workspace metadata document
#[derive(Args, Debug)]
pub struct MetadataArgs {}

/// Execute the `metadata` command.
pub fn execute(config: &Config, _args: MetadataArgs) -> Result<()> {
    MetadataStore::new(config).generate()?;
    println!("✓ Generated {}", METADATA_FILE);
    Ok(())
}
