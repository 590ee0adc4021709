//! # Metadata Store
//!
//! The single durable source of truth for the workspace: one pretty-printed
//! JSON document at `.workspace_metadata.json` recording, per repository,
//! its category, enabled flag, description, intra-organization dependency
//! list, and remote/local timestamps.
//!
//! ## Persistence discipline
//!
//! Every mutating operation is a full load-mutate-save cycle. Saves are
//! atomic (write to a temp file in the same directory, then rename), so the
//! file is valid JSON after every write. There is no cross-process lock:
//! concurrent invocations against one workspace are last-writer-wins, which
//! is accepted for this single-operator tool.
//!
//! ## Regeneration is additive
//!
//! [`MetadataStore::generate`] recomputes only what the filesystem can tell
//! it: the category counts and each repository's current category. Fields an
//! operator or a previous pass set (`description`, `enabled`, dependencies,
//! timestamps) survive regeneration untouched; `enabled`/`description`/
//! `dependencies` are merely seeded with their defaults when absent.
//! Entries for repositories that have disappeared from disk are retained
//! (the disable-then-delete workflow depends on them) but logged as orphans.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::scan::{self, LocalRepo};

/// Per-category statistics in the metadata document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub count: usize,
}

/// Per-repository metadata. All fields optional: absent fields are left
/// untouched by every operation that does not explicitly set them, and stay
/// absent in the serialized document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_pull_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_pushed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_updated_at: Option<DateTime<Utc>>,
}

impl RepoMeta {
    /// Default-enabled policy: only an explicit `false` disables a
    /// repository. Every component that reads the flag goes through here.
    pub fn is_enabled(&self) -> bool {
        self.enabled != Some(false)
    }
}

/// The whole metadata document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryStat>,
    #[serde(default)]
    pub repositories: BTreeMap<String, RepoMeta>,
}

impl Metadata {
    /// Whether `name` participates in update/clone passes. A name with no
    /// entry at all is enabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.repositories.get(name).is_none_or(RepoMeta::is_enabled)
    }
}

/// Load/merge/persist interface over the metadata document.
pub struct MetadataStore<'a> {
    config: &'a Config,
}

impl<'a> MetadataStore<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Parse the metadata file, or return an empty document if none exists
    /// yet.
    pub fn load(&self) -> Result<Metadata> {
        let path = self.config.metadata_file();
        if !path.exists() {
            return Ok(Metadata::default());
        }
        let content = std::fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|e| Error::MetadataParse {
            path,
            message: e.to_string(),
        })
    }

    /// Persist the document as pretty-printed JSON, atomically
    /// (write-temp-then-rename in the workspace root).
    pub fn save(&self, metadata: &Metadata) -> Result<()> {
        let path = self.config.metadata_file();
        let dir = path.parent().unwrap_or(Path::new("."));
        std::fs::create_dir_all(dir)?;

        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut file, metadata)?;
        file.write_all(b"\n")?;
        file.persist(&path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }

    /// Recompute category counts and per-repository categories from a fresh
    /// scan, seed defaults for newly seen repositories, stamp
    /// `generated_at`, persist, and return the document.
    pub fn generate(&self) -> Result<Metadata> {
        let repos = scan::find_all_repos(&self.config.base_dir)?;
        let mut metadata = self.load()?;

        metadata.categories.clear();
        for repo in &repos {
            metadata
                .categories
                .entry(repo.category.clone())
                .or_default()
                .count += 1;

            let entry = metadata.repositories.entry(repo.name.clone()).or_default();
            entry.category = Some(repo.category.clone());
            entry.enabled = Some(entry.is_enabled());
            entry.description.get_or_insert_with(String::new);
            entry.dependencies.get_or_insert_with(Vec::new);
        }

        for name in metadata.repositories.keys() {
            if !repos.iter().any(|r| &r.name == name) {
                warn!("metadata entry for {} has no repository on disk", name);
            }
        }

        metadata.generated_at = Some(Utc::now());
        metadata.org = Some(self.config.org.clone());

        self.save(&metadata)?;
        Ok(metadata)
    }

    /// Scanner results filtered down to repositories whose stored flag is
    /// not explicitly `false`.
    pub fn enabled_repositories(&self) -> Result<Vec<LocalRepo>> {
        let metadata = self.load()?;
        let mut repos = scan::find_all_repos(&self.config.base_dir)?;
        repos.retain(|repo| metadata.is_enabled(&repo.name));
        Ok(repos)
    }

    /// Sorted names of explicitly disabled repositories.
    pub fn disabled_repositories(&self) -> Result<Vec<String>> {
        let metadata = self.load()?;
        Ok(metadata
            .repositories
            .iter()
            .filter(|(_, meta)| !meta.is_enabled())
            .map(|(name, _)| name.clone())
            .collect())
    }

    pub fn disable_repository(&self, name: &str) -> Result<()> {
        self.set_enabled(name, false)
    }

    pub fn enable_repository(&self, name: &str) -> Result<()> {
        self.set_enabled(name, true)
    }

    fn set_enabled(&self, name: &str, enabled: bool) -> Result<()> {
        let mut metadata = self.load()?;
        metadata
            .repositories
            .entry(name.to_string())
            .or_default()
            .enabled = Some(enabled);
        self.save(&metadata)
    }

    /// Set only the timestamp fields actually supplied, leaving the others
    /// untouched. Creates the entry if absent.
    pub fn update_repo_timestamps(
        &self,
        name: &str,
        last_pull_at: Option<DateTime<Utc>>,
        remote_pushed_at: Option<DateTime<Utc>>,
        remote_updated_at: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let mut metadata = self.load()?;
        let entry = metadata.repositories.entry(name.to_string()).or_default();

        if let Some(at) = last_pull_at {
            entry.last_pull_at = Some(at);
        }
        if let Some(at) = remote_pushed_at {
            entry.remote_pushed_at = Some(at);
        }
        if let Some(at) = remote_updated_at {
            entry.remote_updated_at = Some(at);
        }

        self.save(&metadata)
    }

    /// Scan each local repository's `Cargo.toml` for dependencies on
    /// sibling organization repositories and record them.
    ///
    /// Only repositories with a manifest are touched; a repository without
    /// one keeps whatever dependency list it had. The stored list is
    /// deduplicated, sorted, and never contains the repository itself.
    pub fn refresh_dependencies(&self) -> Result<Metadata> {
        let repos = scan::find_all_repos(&self.config.base_dir)?;
        let org_names: Vec<&str> = repos.iter().map(|r| r.name.as_str()).collect();

        let mut metadata = self.load()?;
        for repo in &repos {
            let manifest = repo.path.join("Cargo.toml");
            if !manifest.is_file() {
                continue;
            }
            let mut deps = match manifest_dependencies(&manifest) {
                Ok(deps) => deps,
                Err(e) => {
                    warn!("skipping manifest for {}: {}", repo.name, e);
                    continue;
                }
            };
            deps.retain(|d| d != &repo.name && org_names.contains(&d.as_str()));
            deps.sort();
            deps.dedup();
            metadata.repositories.entry(repo.name.clone()).or_default().dependencies =
                Some(deps);
        }

        metadata.generated_at = Some(Utc::now());
        self.save(&metadata)?;
        Ok(metadata)
    }
}

/// Names declared under `[dependencies]` and `[dev-dependencies]`.
fn manifest_dependencies(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    let manifest: toml::Value = content.parse().map_err(|e: toml::de::Error| {
        Error::MetadataParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    let mut deps = Vec::new();
    for table in ["dependencies", "dev-dependencies"] {
        if let Some(section) = manifest.get(table).and_then(|v| v.as_table()) {
            deps.extend(section.keys().cloned());
        }
    }
    Ok(deps)
}
