//! Flat summary derived from the cache

use crate::cache::CacheInstance;
use crate::github::UserIdentity;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Numbers shown on the card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Whole days since the account was created
    pub account_age: i64,
    pub repo_count: usize,
    pub commits: u64,
    pub additions: u64,
    pub deletions: u64,
    pub languages: BTreeMap<String, u64>,
}

impl Summary {
    /// Additions minus deletions; negative when more lines were removed
    pub fn net_lines(&self) -> i128 {
        i128::from(self.additions) - i128::from(self.deletions)
    }
}

/// Fold the cache into a summary as of `now`.
pub fn project(cache: &CacheInstance, user: &UserIdentity, now: DateTime<Utc>) -> Summary {
    let (commits, additions, deletions) = cache.entries.values().fold(
        (0u64, 0u64, 0u64),
        |(commits, additions, deletions), entry| {
            (
                commits + entry.commits,
                additions + entry.additions,
                deletions + entry.deletions,
            )
        },
    );

    Summary {
        account_age: (now - user.created_at).num_days(),
        repo_count: cache.entries.len(),
        commits,
        additions,
        deletions,
        languages: cache.language_totals.clone(),
    }
}
