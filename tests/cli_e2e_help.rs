//!
//! These tests invoke the actual CLI binary and validate its behavior
//! from a user's perspective.

mod common;

use common::prelude::*;

/// Test that --help flag shows help information
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_help_lists_commands() {
    let mut cmd = cargo_bin_cmd!("org-workspace");

    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("setup"))
        .stdout(predicate::str::contains("update"))
        .stdout(predicate::str::contains("organize"))
        .stdout(predicate::str::contains("refresh-deps"))
        .stdout(predicate::str::contains("list-disabled"));
}

/// Test that an unknown command exits non-zero with usage output
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_unknown_command_fails() {
    let mut cmd = cargo_bin_cmd!("org-workspace");

    cmd.arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

/// Test that disable without a repository name exits non-zero
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_disable_requires_name() {
    let mut cmd = cargo_bin_cmd!("org-workspace");

    cmd.arg("disable")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

/// Test the refresh-dependencies spelling is accepted as an alias
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_refresh_dependencies_alias() {
    let fixture = TestFixture::new();

    fixture
        .cmd()
        .arg("refresh-dependencies")
        .assert()
        .success()
        .stdout(predicate::str::contains("Refreshing intra-org dependencies"));
}
