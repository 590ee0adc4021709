//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures and helper functions to reduce
//! duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_categories(configs::CATEGORIES);
//!     fixture.cmd().arg("stats").assert().success();
//! }
//! ```

use assert_fs::prelude::*;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    pub use super::TestFixture;
}

/// Common workspace documents for testing.
#[allow(dead_code)]
pub mod configs {
    /// Category rules matching the worked examples in the test suite.
    pub const CATEGORIES: &str = r#"{
  "01-async-core": ["^async$", "^async-(actor|bus)$"],
  "02-http-web": ["^async-http"]
}"#;
}

/// A temporary workspace with helpers for laying out category directories
/// and fake repositories.
pub struct TestFixture {
    pub temp: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    pub fn new() -> Self {
        Self {
            temp: assert_fs::TempDir::new().unwrap(),
        }
    }

    /// Write a `categories.json` at the workspace root.
    pub fn with_categories(self, content: &str) -> Self {
        self.temp
            .child("categories.json")
            .write_str(content)
            .unwrap();
        self
    }

    /// Create a fake repository: a directory with a `.git` marker.
    pub fn with_repo(self, category: &str, name: &str) -> Self {
        self.temp
            .child(category)
            .child(name)
            .child(".git")
            .create_dir_all()
            .unwrap();
        self
    }

    /// A command pointed at this workspace.
    pub fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("org-workspace");
        cmd.arg("--dir").arg(self.temp.path()).arg("--org").arg("acme");
        cmd
    }

    /// Parse the workspace metadata file.
    pub fn metadata(&self) -> serde_json::Value {
        let content =
            std::fs::read_to_string(self.temp.path().join(".workspace_metadata.json")).unwrap();
        serde_json::from_str(&content).unwrap()
    }
}
