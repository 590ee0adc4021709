//! # Remote Repository Lister
//!
//! A minimal blocking client for the GitHub "list organization
//! repositories" endpoint. Pages through the listing at a fixed page size
//! until a page comes back empty, filtering out archived repositories on
//! each page before accumulating.
//!
//! A transport, HTTP, or parse failure on a page is a distinct condition
//! from a genuine end-of-results page: it stops pagination and logs an
//! explicit warning that the listing may be truncated. It is never
//! propagated to callers; a partial listing degrades the current pass and
//! the operator re-runs the command.
//!
//! Authorization uses an optional bearer token. Token resolution happens at
//! the process entry point ([`crate::config::resolve_token`]); anonymous
//! calls work with a lower rate limit.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{Error, Result};

const API_ROOT: &str = "https://api.github.com";
const PER_PAGE: usize = 100;
const USER_AGENT: &str = concat!("org-workspace/", env!("CARGO_PKG_VERSION"));

/// One non-archived repository as reported by the hosting API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepo {
    pub name: String,
    pub clone_url: String,
    pub pushed_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Raw per-repository API payload; only the fields we read.
#[derive(Debug, Deserialize)]
struct ApiRepo {
    name: String,
    clone_url: String,
    pushed_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    archived: bool,
}

/// Trait for listing an organization's repositories - allows mocking in
/// tests.
pub trait RepoLister {
    /// Fetch all non-archived repositories, following pagination to
    /// exhaustion. Failures degrade to a (possibly truncated) partial
    /// listing, never an error.
    fn fetch_all_repos(&self) -> Vec<RemoteRepo>;
}

/// GitHub implementation of [`RepoLister`].
pub struct GithubApi {
    org: String,
    token: Option<String>,
    agent: ureq::Agent,
}

impl GithubApi {
    pub fn new(org: impl Into<String>, token: Option<String>) -> Self {
        Self {
            org: org.into(),
            token,
            agent: ureq::AgentBuilder::new()
                .timeout(std::time::Duration::from_secs(30))
                .build(),
        }
    }

    fn fetch_page(&self, page: usize) -> Result<Vec<ApiRepo>> {
        let url = format!(
            "{}/orgs/{}/repos?per_page={}&page={}",
            API_ROOT, self.org, PER_PAGE, page
        );

        let mut request = self
            .agent
            .get(&url)
            .set("Accept", "application/vnd.github+json")
            .set("User-Agent", USER_AGENT);
        if let Some(token) = &self.token {
            request = request.set("Authorization", &format!("Bearer {}", token));
        }

        let response = request.call().map_err(|e| Error::Api {
            url: url.clone(),
            message: e.to_string(),
        })?;

        response.into_json().map_err(|e| Error::Api {
            url,
            message: format!("invalid response body: {}", e),
        })
    }
}

impl RepoLister for GithubApi {
    fn fetch_all_repos(&self) -> Vec<RemoteRepo> {
        let mut repos = Vec::new();

        for page in 1.. {
            // Emptiness is checked on the raw page: a page holding only
            // archived repositories is not the end of the listing.
            let raw = match self.fetch_page(page) {
                Ok(raw) => raw,
                Err(e) => {
                    log::warn!(
                        "stopping repository listing for {} early, results may be truncated: {}",
                        self.org,
                        e
                    );
                    break;
                }
            };
            if raw.is_empty() {
                break;
            }
            repos.extend(filter_page(raw));
        }

        repos
    }
}

/// Drop archived repositories and strip the payload down to the descriptor
/// the rest of the system uses.
fn filter_page(raw: Vec<ApiRepo>) -> Vec<RemoteRepo> {
    raw.into_iter()
        .filter(|r| !r.archived)
        .map(|r| RemoteRepo {
            name: r.name,
            clone_url: r.clone_url,
            pushed_at: r.pushed_at,
            updated_at: r.updated_at,
        })
        .collect()
}
