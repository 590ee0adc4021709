//! # Repository Flag Commands
//!
//! This module implements the `disable`, `enable`, and `list-disabled`
//! subcommands, the operator's interface to the per-repository enabled
//! flag. Disabled repositories are retained on disk but excluded from
//! update and clone passes, which makes them safe to remove locally.

use anyhow::Result;
use clap::Args;

use org_workspace::config::Config;
use org_workspace::metadata::MetadataStore;

/// Disable a repository
#[derive(Args, Debug)]
pub struct DisableArgs {
    /// Repository name
    pub name: String,
}

/// Enable a repository
#[derive(Args, Debug)]
pub struct EnableArgs {
    /// Repository name
    pub name: String,
}

/// List all disabled repositories
#[derive(Args, Debug)]
pub struct ListDisabledArgs {}

/// Execute the `disable` command.
pub fn disable(config: &Config, args: DisableArgs) -> Result<()> {
    MetadataStore::new(config).disable_repository(&args.name)?;
    println!(
        "✓ Disabled {} (will be skipped in updates and can be removed)",
        args.name
    );
    Ok(())
}

/// Execute the `enable` command.
pub fn enable(config: &Config, args: EnableArgs) -> Result<()> {
    MetadataStore::new(config).enable_repository(&args.name)?;
    println!("✓ Enabled {} (will be included in updates)", args.name);
    Ok(())
}

/// Execute the `list-disabled` command.
pub fn list_disabled(config: &Config, _args: ListDisabledArgs) -> Result<()> {
    let disabled = MetadataStore::new(config).disabled_repositories()?;

    if disabled.is_empty() {
        println!("No disabled repositories.");
    } else {
        println!("Disabled repositories:");
        for name in &disabled {
            println!("  - {}", name);
        }
        println!();
        println!("Total: {}", disabled.len());
    }
    Ok(())
}
