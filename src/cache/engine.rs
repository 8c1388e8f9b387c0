//! Incremental reconciliation of repository edges into the cache
//!
//! Each edge is either skipped (stale fork, empty repository, repeated
//! within the run), recognised as unchanged (cached `totalCommits` matches
//! the branch head count), or re-aggregated. Language totals are adjusted
//! by each entry's recorded contribution and never rebuilt from entries.

use super::aggregate::RepositoryAggregator;
use super::fingerprint::Fingerprinter;
use super::policy::Policy;
use super::store::CacheInstance;
use crate::github::{GithubApi, RepositoryEdge};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, warn};

/// What happened to the edges of one reconciliation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Forks created before the cutoff
    pub stale_forks: usize,
    /// Repositories without a default branch
    pub empty: usize,
    /// Edges already seen earlier in the same run
    pub duplicates: usize,
    /// Cached entries still matching the head commit count
    pub fresh: usize,
    /// Entries written from a new aggregation
    pub refreshed: usize,
    /// Identities whose aggregation failed; their entries are untouched
    pub failed: Vec<String>,
}

impl ReconcileReport {
    pub fn processed(&self) -> usize {
        self.fresh + self.refreshed + self.failed.len()
    }
}

/// Callback invoked with each edge identity before it is reconciled
pub type EdgeObserver<'a> = &'a (dyn Fn(&str) + Sync);

/// Applies repository edges to a [`CacheInstance`] in order
pub struct CacheEngine<'a> {
    aggregator: RepositoryAggregator<'a>,
    fingerprinter: &'a Fingerprinter,
    policy: &'a Policy,
    observer: Option<EdgeObserver<'a>>,
}

impl<'a> CacheEngine<'a> {
    pub fn new(api: &'a dyn GithubApi, fingerprinter: &'a Fingerprinter, policy: &'a Policy) -> Self {
        Self {
            aggregator: RepositoryAggregator::new(api, policy),
            fingerprinter,
            policy,
            observer: None,
        }
    }

    /// Report each edge to `observer` as reconciliation reaches it.
    pub fn with_observer(mut self, observer: EdgeObserver<'a>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Reconcile `edges` into `cache` for the owner `user_id`.
    ///
    /// A repository whose aggregation fails keeps its previous entry and
    /// contributes nothing to the totals; the run always continues.
    ///
    /// Languages: an unchanged entry folds the edge's inline languages only
    /// when it has none recorded yet, and a refreshed entry replaces its
    /// previous language contribution in the totals.
    pub async fn reconcile(
        &self,
        user_id: &str,
        cache: &mut CacheInstance,
        edges: &[RepositoryEdge],
    ) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        let mut seen = HashSet::new();

        for edge in edges {
            if let Some(observe) = self.observer {
                observe(&edge.identity);
            }

            if self.policy.is_stale_fork(edge.is_fork, edge.created_at) {
                debug!("Skipping {}: fork created {}", edge.identity, edge.created_at);
                report.stale_forks += 1;
                continue;
            }

            let Some(branch) = edge.default_branch else {
                debug!("Skipping {}: no default branch", edge.identity);
                report.empty += 1;
                continue;
            };

            let key = self.fingerprinter.fingerprint(&edge.identity);
            if !seen.insert(key.clone()) {
                debug!("Skipping {}: already reconciled in this run", edge.identity);
                report.duplicates += 1;
                continue;
            }

            if let Some(existing) = cache.entries.get(&key) {
                if existing.total_commits == branch.total_commit_count {
                    let needs_languages = existing.languages.is_none();
                    if needs_languages && !edge.languages.is_empty() {
                        let languages = self.normalized(edge);
                        cache.fold_languages(&languages);
                        if let Some(entry) = cache.entries.get_mut(&key) {
                            entry.languages = Some(languages);
                        }
                        debug!("{} unchanged, recorded its languages", edge.identity);
                    } else {
                        debug!("{} unchanged", edge.identity);
                    }
                    report.fresh += 1;
                    continue;
                }
            }

            let Some((owner, name)) = edge.owner_and_name() else {
                warn!("Skipping {}: identity is not owner/name", edge.identity);
                report.failed.push(edge.identity.clone());
                continue;
            };

            match self.aggregator.aggregate(name, owner, user_id).await {
                Ok(entry) => {
                    let previous = cache
                        .entries
                        .get(&key)
                        .and_then(|e| e.languages.clone());
                    if let Some(previous) = previous {
                        cache.unfold_languages(&previous);
                    }
                    if let Some(languages) = &entry.languages {
                        cache.fold_languages(languages);
                    }
                    debug!(
                        "Cached {}: {} commits, +{} -{}",
                        edge.identity, entry.commits, entry.additions, entry.deletions
                    );
                    cache.entries.insert(key, entry);
                    report.refreshed += 1;
                }
                Err(e) => {
                    warn!(
                        "An error occurred while caching values for {}: {}. This repository will be skipped",
                        edge.identity, e
                    );
                    report.failed.push(edge.identity.clone());
                }
            }
        }

        info!(
            "Reconciled {} repositories: {} refreshed, {} unchanged, {} failed",
            report.processed(),
            report.refreshed,
            report.fresh,
            report.failed.len()
        );
        report
    }

    fn normalized(&self, edge: &RepositoryEdge) -> BTreeMap<String, u64> {
        self.policy
            .normalize_sizes(edge.languages.iter().map(|(n, s)| (n.as_str(), *s)))
    }
}
