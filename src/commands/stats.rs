//! # Stats Command Implementation
//!
//! This module implements the `stats` subcommand, which prints per-category
//! repository counts from the metadata document. Category labels are
//! humanized for display: the numeric ordering prefix is stripped, dashes
//! become spaces, and the first letter is capitalized.

use anyhow::Result;
use clap::Args;

use org_workspace::config::Config;
use org_workspace::metadata::MetadataStore;

/// Display per-category repository statistics
#[derive(Args, Debug)]
pub struct StatsArgs {}

/// Execute the `stats` command.
pub fn execute(config: &Config, _args: StatsArgs) -> Result<()> {
    println!("Repository Statistics:");
    println!();

    let metadata = MetadataStore::new(config).load()?;
    let mut total = 0;

    for (category, stat) in &metadata.categories {
        println!("  - {}: {} repos", humanize(category), stat.count);
        total += stat.count;
    }

    println!();
    println!("  Total: {} repositories", total);
    Ok(())
}

/// `01-async-core` → `Async core`.
fn humanize(category: &str) -> String {
    let stripped = category
        .split_once('-')
        .filter(|(prefix, _)| prefix.chars().all(|c| c.is_ascii_digit()))
        .map(|(_, rest)| rest)
        .unwrap_or(category);
    let spaced = stripped.replace('-', " ");

    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => spaced,
    }
}
