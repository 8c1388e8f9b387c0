//! Domain records produced by the GraphQL collaborator

use chrono::{DateTime, Utc};
use std::fmt;

/// Identity of the user whose stats are collected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    /// Opaque GraphQL node id, compared against commit authors
    pub id: String,
    pub created_at: DateTime<Utc>,
}

/// Head of a repository's default branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchRef {
    /// Commit count reported by the API; the cache freshness signal
    pub total_commit_count: u64,
}

/// One repository record from an edge listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryEdge {
    /// `owner/name`
    pub identity: String,
    pub is_fork: bool,
    pub created_at: DateTime<Utc>,
    /// `None` when the repository is empty
    pub default_branch: Option<BranchRef>,
    /// Language name and byte size, largest first
    pub languages: Vec<(String, u64)>,
}

impl RepositoryEdge {
    /// Split `owner/name` into `(owner, name)`.
    pub fn owner_and_name(&self) -> Option<(&str, &str)> {
        self.identity
            .split_once('/')
            .filter(|(owner, name)| !owner.is_empty() && !name.is_empty())
    }
}

/// Repository affiliations accepted by the owned-repository listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affiliation {
    Owner,
    Collaborator,
    OrganizationMember,
}

impl Affiliation {
    /// Every affiliation, in the order the listing requests them
    pub fn all() -> &'static [Self] {
        &[Self::Owner, Self::Collaborator, Self::OrganizationMember]
    }
}

impl fmt::Display for Affiliation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Owner => "OWNER",
            Self::Collaborator => "COLLABORATOR",
            Self::OrganizationMember => "ORGANIZATION_MEMBER",
        };
        write!(f, "{}", name)
    }
}

/// A single page of a cursor-paginated listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Cursor for the following page, `None` on the last page
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_cursor: None,
        }
    }
}

/// One commit from a default-branch history page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Linked account id of the author; `None` for unlinked authors
    pub author_id: Option<String>,
    pub additions: u64,
    pub deletions: u64,
}

/// History slice of the default branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryPage {
    pub total_count: u64,
    pub commits: Page<CommitRecord>,
}

/// One page of the per-repository commit query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitPage {
    pub is_fork: bool,
    pub created_at: DateTime<Utc>,
    pub languages: Vec<(String, u64)>,
    /// `None` when the repository has no default branch
    pub history: Option<HistoryPage>,
}
