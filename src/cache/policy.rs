//! Fork-age cutoff and language accounting rules

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Forks created before this instant are ignored (2024-06-01T00:00:00Z)
pub fn default_fork_cutoff() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Languages whose bytes are accounted under another name
pub const DEFAULT_MERGED_LANGUAGES: &[(&str, &str)] = &[("Jupyter Notebook", "Python")];

/// Languages that never contribute to totals
pub const DEFAULT_DROPPED_LANGUAGES: &[&str] = &["HTML"];

/// Accounting rules applied to every repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Forks created before this instant are skipped
    pub fork_cutoff: DateTime<Utc>,

    /// Language names excluded from totals
    pub drop: Vec<String>,

    /// Language name -> bucket its bytes are added to
    pub merge: BTreeMap<String, String>,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            fork_cutoff: default_fork_cutoff(),
            drop: DEFAULT_DROPPED_LANGUAGES
                .iter()
                .map(|name| name.to_string())
                .collect(),
            merge: DEFAULT_MERGED_LANGUAGES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }
}

impl Policy {
    /// Whether a repository is a fork old enough to be ignored
    pub fn is_stale_fork(&self, is_fork: bool, created_at: DateTime<Utc>) -> bool {
        is_fork && created_at < self.fork_cutoff
    }

    /// Accounting name for a language, `None` when it is dropped
    pub fn normalize<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        if self.drop.iter().any(|d| d == name) {
            return None;
        }
        Some(self.merge.get(name).map(String::as_str).unwrap_or(name))
    }

    /// Normalize a language breakdown into a name -> bytes map.
    ///
    /// Merged names add into their target bucket.
    pub fn normalize_sizes<'s, I>(&self, sizes: I) -> BTreeMap<String, u64>
    where
        I: IntoIterator<Item = (&'s str, u64)>,
    {
        let mut normalized = BTreeMap::new();
        for (name, size) in sizes {
            if let Some(bucket) = self.normalize(name) {
                *normalized.entry(bucket.to_string()).or_insert(0) += size;
            }
        }
        normalized
    }
}
