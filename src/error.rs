//! # Error Handling
//!
//! This module defines the centralized error handling mechanism for the
//! `org-workspace` application. It uses the `thiserror` library to create a
//! comprehensive `Error` enum that covers all anticipated failure modes,
//! providing clear and descriptive error messages.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum that represents all possible errors that can
//!   occur within the application. Each variant corresponds to a specific
//!   type of error and includes contextual information to aid in debugging.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the application to simplify function signatures.
//!
//! Per-repository failures during batch operations (a clone that fails, a
//! pull that fails, a directory that cannot be moved) are deliberately NOT
//! represented here: they are tallied into result summaries so that batch
//! processing continues. The variants below are the genuinely fatal cases.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for org-workspace operations
#[derive(Error, Debug)]
pub enum Error {
    /// An error occurred while parsing the `categories.json` rules file.
    #[error("Categories file parsing error: {}: {message}", .path.display())]
    CategoriesParse { path: PathBuf, message: String },

    /// A category pattern failed to compile as a regular expression.
    ///
    /// Includes the category label and the offending pattern so the operator
    /// can fix the rules file.
    #[error("Invalid pattern for category {category}: {pattern}: {source}")]
    Pattern {
        category: String,
        pattern: String,
        source: regex::Error,
    },

    /// The workspace metadata file exists but could not be parsed.
    #[error("Metadata file parsing error: {}: {message}", .path.display())]
    MetadataParse { path: PathBuf, message: String },

    /// A request against the hosting API failed.
    ///
    /// Surfaced by the GitHub client's per-page fetch; the pagination loop
    /// catches it, logs a truncation warning, and degrades to "no more
    /// pages" rather than propagating it further.
    #[error("GitHub API request failed: {url}: {message}")]
    Api { url: String, message: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;
