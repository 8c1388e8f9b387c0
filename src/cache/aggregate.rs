//! Per-repository commit and language aggregation

use super::policy::Policy;
use super::store::RepoCacheEntry;
use crate::error::{StatcardError, StatcardResult};
use crate::github::{commit_pages, GithubApi};
use futures_util::TryStreamExt;
use std::collections::BTreeMap;
use tracing::debug;

/// Walks a repository's default-branch history and tallies the owner's
/// contributions.
pub struct RepositoryAggregator<'a> {
    api: &'a dyn GithubApi,
    policy: &'a Policy,
}

impl<'a> RepositoryAggregator<'a> {
    pub fn new(api: &'a dyn GithubApi, policy: &'a Policy) -> Self {
        Self { api, policy }
    }

    /// Aggregate one repository.
    ///
    /// Only commits whose linked author id equals `owner_id` are counted.
    /// Languages come from the first page. Any failed page fails the whole
    /// repository; partial totals are never returned.
    pub async fn aggregate(
        &self,
        name: &str,
        owner: &str,
        owner_id: &str,
    ) -> StatcardResult<RepoCacheEntry> {
        let mut pages = std::pin::pin!(commit_pages(self.api, name, owner, None));
        let mut entry = RepoCacheEntry::default();
        let mut page_count = 0usize;

        while let Some(page) = pages.try_next().await? {
            page_count += 1;

            if page_count == 1 {
                if self.policy.is_stale_fork(page.is_fork, page.created_at) {
                    debug!("{}/{} is a fork from before the cutoff, not aggregating", owner, name);
                    return Ok(empty_entry());
                }
                if page.history.is_none() {
                    debug!("{}/{} has no default branch", owner, name);
                    return Ok(empty_entry());
                }
                entry.languages = Some(
                    self.policy
                        .normalize_sizes(page.languages.iter().map(|(n, s)| (n.as_str(), *s))),
                );
            }

            // The default branch vanished mid-walk
            let Some(history) = page.history else {
                return Err(StatcardError::MissingField {
                    operation: format!("commit history for {}/{}", owner, name),
                    field: "history",
                });
            };
            entry.total_commits = history.total_count;

            for commit in history.commits.items {
                if commit.author_id.as_deref() == Some(owner_id) {
                    entry.commits += 1;
                    entry.additions += commit.additions;
                    entry.deletions += commit.deletions;
                }
            }
        }

        debug!(
            "Aggregated {}/{} over {} page(s): {} of {} commits by owner",
            owner, name, page_count, entry.commits, entry.total_commits
        );
        Ok(entry)
    }
}

fn empty_entry() -> RepoCacheEntry {
    RepoCacheEntry {
        languages: Some(BTreeMap::new()),
        ..RepoCacheEntry::default()
    }
}
