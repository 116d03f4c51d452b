use serde::{Deserialize, Serialize};

use crate::error::RankError;

/// Catalog entries in document order, each with its key. The key is only
/// used in log lines.
pub type Catalog = Vec<(String, CatalogEntry)>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub owner: Option<String>,
    pub repo: Option<String>,
}

impl CatalogEntry {
    #[cfg(test)]
    pub fn new(owner: &str, repo: &str) -> Self {
        CatalogEntry {
            owner: Some(owner.to_string()),
            repo: Some(repo.to_string()),
        }
    }

    /// Owner and repository name, if the entry carries both
    pub fn coordinates(&self) -> Option<(&str, &str)> {
        match (self.owner.as_deref(), self.repo.as_deref()) {
            (Some(owner), Some(repo)) if !owner.is_empty() && !repo.is_empty() => {
                Some((owner, repo))
            }
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Repository {
    pub name: String,
    pub full_name: Option<String>,
    pub html_url: Option<String>,
    pub stargazers_count: Option<u64>,
    pub forks: Option<u64>,
    pub watchers: Option<u64>,
    pub subscribers_count: Option<u64>,
    pub archived: Option<bool>,
    pub description: Option<String>,
}

/// Raw body of `GET /repos/{owner}/{repo}`. Error payloads share the shape
/// but carry only `message` (and `documentation_url`).
#[derive(Deserialize, Debug, Default)]
pub struct RepositoryPayload {
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub html_url: Option<String>,
    pub stargazers_count: Option<u64>,
    pub forks: Option<u64>,
    pub watchers: Option<u64>,
    pub subscribers_count: Option<u64>,
    pub archived: Option<bool>,
    pub description: Option<String>,
    pub message: Option<String>,
}

impl RepositoryPayload {
    /// Returns the repository, or the API's error message when there is no name.
    pub fn into_repository(self) -> Result<Repository, Option<String>> {
        match self.name {
            Some(name) if !name.is_empty() => Ok(Repository {
                name,
                full_name: self.full_name,
                html_url: self.html_url,
                stargazers_count: self.stargazers_count,
                forks: self.forks,
                watchers: self.watchers,
                subscribers_count: self.subscribers_count,
                archived: self.archived,
                description: self.description,
            }),
            _ => Err(self.message),
        }
    }
}

#[derive(Debug)]
pub enum FetchOutcome {
    Found(Repository),
    /// The response parsed but named no repository (404, rate limit, ...)
    Missing {
        slug: String,
        status: u16,
        message: Option<String>,
    },
    Failed(RankError),
    /// The catalog entry had no owner/repo pair, so nothing was fetched
    Skipped { key: String },
}

impl FetchOutcome {
    pub fn into_repository(self) -> Option<Repository> {
        match self {
            FetchOutcome::Found(repo) => Some(repo),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, FetchOutcome::Found(_))
    }

    /// Why this outcome is left out of the ranking, if it is.
    pub fn drop_reason(&self) -> Option<String> {
        match self {
            FetchOutcome::Found(_) => None,
            FetchOutcome::Missing {
                slug,
                status,
                message,
            } => Some(format!(
                "{} answered {} ({})",
                slug,
                status,
                message.as_deref().unwrap_or("no message")
            )),
            FetchOutcome::Failed(error) => Some(error.to_string()),
            FetchOutcome::Skipped { key } => {
                Some(format!("catalog entry {} (no owner/repo)", key))
            }
        }
    }
}
