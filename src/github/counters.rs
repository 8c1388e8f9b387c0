//! Per-client query counters

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Kinds of GraphQL query the client issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    UserInfo,
    Edges,
    OrgEdges,
    RepoInfo,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UserInfo => "user info",
            Self::Edges => "repository listing",
            Self::OrgEdges => "organization listing",
            Self::RepoInfo => "commit history",
        };
        write!(f, "{}", name)
    }
}

/// Snapshot of how many queries of each kind were issued
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryCounters {
    pub user_info: u64,
    pub edges: u64,
    pub org_edges: u64,
    pub repo_info: u64,
}

impl QueryCounters {
    pub fn total(&self) -> u64 {
        self.user_info + self.edges + self.org_edges + self.repo_info
    }
}

impl fmt::Display for QueryCounters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "userInfo={} edges={} org-edges={} repoInfo={}",
            self.user_info, self.edges, self.org_edges, self.repo_info
        )
    }
}

/// Counters owned by one client; `&self` access so the client stays `Sync`
#[derive(Debug, Default)]
pub struct QueryTally {
    user_info: AtomicU64,
    edges: AtomicU64,
    org_edges: AtomicU64,
    repo_info: AtomicU64,
}

impl QueryTally {
    pub fn record(&self, kind: QueryKind) {
        let counter = match kind {
            QueryKind::UserInfo => &self.user_info,
            QueryKind::Edges => &self.edges,
            QueryKind::OrgEdges => &self.org_edges,
            QueryKind::RepoInfo => &self.repo_info,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> QueryCounters {
        QueryCounters {
            user_info: self.user_info.load(Ordering::Relaxed),
            edges: self.edges.load(Ordering::Relaxed),
            org_edges: self.org_edges.load(Ordering::Relaxed),
            repo_info: self.repo_info.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_counts_per_kind() {
        let tally = QueryTally::default();
        tally.record(QueryKind::Edges);
        tally.record(QueryKind::Edges);
        tally.record(QueryKind::RepoInfo);

        let counters = tally.snapshot();
        assert_eq!(counters.edges, 2);
        assert_eq!(counters.repo_info, 1);
        assert_eq!(counters.user_info, 0);
        assert_eq!(counters.total(), 3);
    }

    #[test]
    fn counters_display() {
        let counters = QueryCounters {
            user_info: 1,
            edges: 2,
            org_edges: 3,
            repo_info: 4,
        };
        assert_eq!(
            counters.to_string(),
            "userInfo=1 edges=2 org-edges=3 repoInfo=4"
        );
    }
}
