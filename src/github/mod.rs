//! GitHub GraphQL collaborator
//!
//! The reconciliation core only sees the [`GithubApi`] trait; the HTTP
//! transport lives in [`client`] and can be swapped for a scripted fake in
//! tests.

mod client;
pub mod counters;
#[cfg(test)]
pub(crate) mod fake;
pub mod pagination;
mod types;
mod wire;

pub use client::{ClientOptions, GithubClient};
pub use counters::{QueryCounters, QueryKind};
pub use pagination::{collect_edges, commit_pages, organization_pages, repository_pages};
pub use types::{
    Affiliation, BranchRef, CommitPage, CommitRecord, HistoryPage, Page, RepositoryEdge,
    UserIdentity,
};

use crate::error::StatcardResult;
use async_trait::async_trait;

/// Remote source of user, repository and commit data
///
/// Every listing method fetches exactly one page; callers drive the cursor
/// through [`pagination`].
#[async_trait]
pub trait GithubApi: Send + Sync {
    /// Resolve the account id and creation date for a login
    async fn user_identity(&self, login: &str) -> StatcardResult<UserIdentity>;

    /// One page of repositories the user is affiliated with
    async fn repository_page(
        &self,
        login: &str,
        affiliations: &[Affiliation],
        cursor: Option<&str>,
    ) -> StatcardResult<Page<RepositoryEdge>>;

    /// One page of organizations, flattened to their repositories
    async fn organization_page(
        &self,
        login: &str,
        cursor: Option<&str>,
    ) -> StatcardResult<Page<RepositoryEdge>>;

    /// One page of a repository's default-branch history
    async fn commit_page(
        &self,
        name: &str,
        owner: &str,
        cursor: Option<&str>,
    ) -> StatcardResult<CommitPage>;
}
