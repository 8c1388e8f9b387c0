//! Incremental repository statistics cache
//!
//! Keeps one entry per repository, keyed by a salted fingerprint of its
//! `owner/name`, plus a running per-language byte total.
//!
//! # Per-repository decisions
//!
//! | Condition | Action |
//! |-----------|--------|
//! | Fork created before the cutoff | skip, no entry, no languages |
//! | No default branch | skip |
//! | Cached `totalCommits` equals head count | keep entry, record languages if missing |
//! | Otherwise | re-aggregate, replace entry and its language contribution |
//! | Aggregation failed | keep previous entry, log, continue |
//!
//! Entries are never evicted.

mod aggregate;
mod engine;
mod fingerprint;
mod policy;
mod store;

pub use aggregate::RepositoryAggregator;
pub use engine::{CacheEngine, EdgeObserver, ReconcileReport};
pub use fingerprint::Fingerprinter;
pub use policy::{
    default_fork_cutoff, Policy, DEFAULT_DROPPED_LANGUAGES, DEFAULT_MERGED_LANGUAGES,
};
pub use store::{CacheInstance, CacheStore, RepoCacheEntry, CACHE_VERSION};
