//! # Organization Workspace Library
//!
//! This library provides the core functionality for keeping a local working
//! copy of one GitHub organization's repositories: discovering remote
//! repositories, cloning missing ones, pulling updates for enabled local
//! clones, classifying repositories into category directories by name
//! pattern, and maintaining the persistent workspace metadata record. It is
//! designed to be used by the `org-workspace` command-line tool but can be
//! embedded in other applications.
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: the workspace root, organization name,
//!   API token, and the cached category rules from `categories.json`.
//! - **Scanning (`scan`)**: discovers which workspace directories are git
//!   repositories and which category directory each currently lives in.
//! - **Categorization (`categorize`)**: maps repository names to category
//!   labels via ordered regex rules, and moves misplaced directories.
//! - **Gateways (`git`, `github`)**: the system-git subprocess boundary and
//!   the paginated organization listing from the hosting API, both behind
//!   traits so the reconciler can be tested without a network.
//! - **Metadata (`metadata`)**: the durable JSON record of category,
//!   enabled flag, dependency list, and timestamps per repository. The only
//!   cross-run state in the system; every mutation is a full
//!   load-mutate-save with an atomic write.
//! - **Reconciliation (`updater`)**: the update pass over enabled
//!   repositories, the new-repository check, and missing-clone staging.
//!
//! ## Execution Flow
//!
//! A typical `update` invocation: scan the workspace, filter to enabled
//! repositories through the metadata store, fetch/compare/pull each one
//! sequentially while stamping `last_pull_at`, diff the remote listing for
//! new repositories, then regenerate the metadata document. Every step is
//! idempotent or additive, so re-running after any failure is safe.

pub mod categorize;
pub mod config;
pub mod error;
pub mod git;
pub mod github;
pub mod metadata;
pub mod scan;
pub mod updater;
