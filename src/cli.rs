//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;

use org_workspace::config::{self, Config};

use crate::commands;

/// Org Workspace - clone, update, and categorize an organization's repositories
#[derive(Parser, Debug)]
#[command(name = "org-workspace")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Workspace root directory containing the category directories
    #[arg(long, global = true, value_name = "DIR", default_value = ".")]
    dir: PathBuf,

    /// GitHub organization whose repositories are managed
    #[arg(
        long,
        global = true,
        value_name = "ORG",
        env = "ORG_WORKSPACE_ORG",
        default_value = "socketry"
    )]
    org: String,

    /// GitHub API token (falls back to GITHUB_TOKEN, then GH_TOKEN)
    #[arg(long, global = true, value_name = "TOKEN")]
    token: Option<String>,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clone and organize all of the organization's repositories
    Setup(commands::setup::SetupArgs),

    /// Update all enabled repositories and check for new ones
    Update(commands::update::UpdateArgs),

    /// Move repositories into their correct category directories
    Organize(commands::organize::OrganizeArgs),

    /// Refresh intra-organization dependency information in the metadata
    #[command(alias = "refresh-dependencies")]
    RefreshDeps(commands::refresh_deps::RefreshDepsArgs),

    /// Display per-category repository statistics
    Stats(commands::stats::StatsArgs),

    /// Regenerate the workspace metadata document
    Metadata(commands::metadata::MetadataArgs),

    /// Disable a repository (skipped in updates, safe to remove locally)
    Disable(commands::repos::DisableArgs),

    /// Enable a repository (included in updates again)
    Enable(commands::repos::EnableArgs),

    /// List all disabled repositories
    ListDisabled(commands::repos::ListDisabledArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::from_env(Env::default().default_filter_or(&self.log_level)).init();

        // The only environment reads live here at the entry point; library
        // code receives the resolved values through Config.
        let token = config::resolve_token(self.token);
        let config = Config::new(self.dir, self.org, token);

        match self.command {
            Commands::Setup(args) => commands::setup::execute(&config, args),
            Commands::Update(args) => commands::update::execute(&config, args),
            Commands::Organize(args) => commands::organize::execute(&config, args),
            Commands::RefreshDeps(args) => commands::refresh_deps::execute(&config, args),
            Commands::Stats(args) => commands::stats::execute(&config, args),
            Commands::Metadata(args) => commands::metadata::execute(&config, args),
            Commands::Disable(args) => commands::repos::disable(&config, args),
            Commands::Enable(args) => commands::repos::enable(&config, args),
            Commands::ListDisabled(args) => commands::repos::list_disabled(&config, args),
        }
    }
}
