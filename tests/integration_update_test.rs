//!
//! Full reconciliation pass against real git repositories: bare upstreams,
//! local clones one commit behind, and an update pass that must pull both
//! back to the upstream ref.
//!
//! Requires the `git` binary; gated behind the `integration-tests` feature
//! like the rest of the E2E suite.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_fs::TempDir;

use org_workspace::config::Config;
use org_workspace::git::SystemGit;
use org_workspace::github::{RemoteRepo, RepoLister};
use org_workspace::metadata::MetadataStore;
use org_workspace::updater::Updater;

struct EmptyLister;

impl RepoLister for EmptyLister {
    fn fetch_all_repos(&self) -> Vec<RemoteRepo> {
        Vec::new()
    }
}

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .unwrap();
    assert!(status.success(), "git {:?} failed in {:?}", args, dir);
}

fn rev_parse(dir: &Path, rev: &str) -> String {
    let output = Command::new("git")
        .args(["rev-parse", rev])
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

/// Create a bare upstream named `<name>.git` under `remotes`, clone it into
/// `workspace/<category>/<name>`, then push one more commit to the upstream
/// so the clone is behind.
fn stale_clone(remotes: &Path, workspace: &Path, category: &str, name: &str) {
    let seed = remotes.join(format!("{}-seed", name));
    fs::create_dir_all(&seed).unwrap();
    git(&seed, &["init", "--quiet", "-b", "main"]);
    git(&seed, &["config", "user.email", "test@example.com"]);
    git(&seed, &["config", "user.name", "Test"]);
    fs::write(seed.join("README.md"), "v1").unwrap();
    git(&seed, &["add", "."]);
    git(&seed, &["commit", "--quiet", "-m", "initial"]);

    let bare = format!("{}.git", name);
    let seed_dir = format!("{}-seed", name);
    git(remotes, &["clone", "--bare", "--quiet", &seed_dir, &bare]);
    let bare_url = remotes.join(&bare);
    let bare_url = bare_url.to_str().unwrap();

    let category_dir = workspace.join(category);
    fs::create_dir_all(&category_dir).unwrap();
    git(&category_dir, &["clone", "--quiet", bare_url, name]);

    // Advance the upstream by one commit; the clone is now stale.
    git(&seed, &["remote", "add", "bare", bare_url]);
    fs::write(seed.join("README.md"), "v2").unwrap();
    git(&seed, &["add", "."]);
    git(&seed, &["commit", "--quiet", "-m", "second"]);
    git(&seed, &["push", "--quiet", "bare", "main"]);
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_update_pass_pulls_stale_clones() {
    let temp = TempDir::new().unwrap();
    let remotes = temp.path().join("remotes");
    let workspace = temp.path().join("workspace");
    fs::create_dir_all(&remotes).unwrap();
    fs::create_dir_all(&workspace).unwrap();

    stale_clone(&remotes, &workspace, "01-async-core", "async");
    stale_clone(&remotes, &workspace, "02-http-web", "async-http");

    let config = Config::new(&workspace, "acme", None);
    let updater = Updater::with_collaborators(&config, Box::new(SystemGit), Box::new(EmptyLister));

    let summary = updater.update_all().unwrap();
    assert_eq!(summary.updated, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.skipped, 0);

    // Each clone's local ref now equals its upstream ref.
    for (category, name) in [("01-async-core", "async"), ("02-http-web", "async-http")] {
        let clone = workspace.join(category).join(name);
        assert_eq!(rev_parse(&clone, "HEAD"), rev_parse(&clone, "@{u}"));
    }

    // A second pass finds everything up to date.
    let summary = updater.update_all().unwrap();
    assert_eq!(summary.updated, 0);
    assert_eq!(summary.up_to_date, 2);

    // Every attempted repository was stamped.
    let metadata = MetadataStore::new(&config).load().unwrap();
    assert!(metadata.repositories["async"].last_pull_at.is_some());
    assert!(metadata.repositories["async-http"].last_pull_at.is_some());
}

#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_update_pass_skips_disabled_clone() {
    let temp = TempDir::new().unwrap();
    let remotes = temp.path().join("remotes");
    let workspace = temp.path().join("workspace");
    fs::create_dir_all(&remotes).unwrap();
    fs::create_dir_all(&workspace).unwrap();

    stale_clone(&remotes, &workspace, "01-async-core", "async");
    stale_clone(&remotes, &workspace, "01-async-core", "async-actor");

    let config = Config::new(&workspace, "acme", None);
    MetadataStore::new(&config)
        .disable_repository("async-actor")
        .unwrap();

    let updater = Updater::with_collaborators(&config, Box::new(SystemGit), Box::new(EmptyLister));
    let summary = updater.update_all().unwrap();

    assert_eq!(summary.updated, 1);
    assert_eq!(summary.skipped, 1);

    // The disabled clone is still behind its upstream.
    let stale = workspace.join("01-async-core/async-actor");
    assert_ne!(rev_parse(&stale, "HEAD"), rev_parse(&stale, "@{u}"));
}
