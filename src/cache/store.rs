//! Cache document and its on-disk persistence
//!
//! The whole document is read once at start and replaced wholesale at the
//! end of a run. A missing or unreadable file is an empty cache.

use crate::error::{CacheFormatError, StatcardError, StatcardResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Current on-disk schema version. Documents without a tag are version 0.
pub const CACHE_VERSION: u32 = 2;

/// Cached statistics for one repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepoCacheEntry {
    /// Lines added by the owner's commits
    pub additions: u64,
    /// Lines deleted by the owner's commits
    pub deletions: u64,
    /// Commits attributed to the owner
    pub commits: u64,
    /// Default-branch commit count reported by the API
    pub total_commits: u64,
    /// Normalized language sizes folded into the totals for this entry.
    /// `None` for entries written before languages were tracked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<BTreeMap<String, u64>>,
}

/// The persisted cache document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheInstance {
    #[serde(default)]
    pub version: u32,

    /// Fingerprint -> entry
    #[serde(rename = "edges", default)]
    pub entries: BTreeMap<String, RepoCacheEntry>,

    /// Accumulated language bytes across entries
    #[serde(rename = "languages", default)]
    pub language_totals: BTreeMap<String, u64>,
}

impl Default for CacheInstance {
    fn default() -> Self {
        Self {
            version: CACHE_VERSION,
            entries: BTreeMap::new(),
            language_totals: BTreeMap::new(),
        }
    }
}

impl CacheInstance {
    /// Parse a persisted document, migrating older schema versions.
    pub fn from_json(content: &str) -> Result<Self, CacheFormatError> {
        let cache: CacheInstance = serde_json::from_str(content)?;
        cache.migrate()
    }

    fn migrate(mut self) -> Result<Self, CacheFormatError> {
        match self.version {
            CACHE_VERSION => Ok(self),
            v if v > CACHE_VERSION => Err(CacheFormatError::NewerVersion {
                found: v,
                supported: CACHE_VERSION,
            }),
            v => {
                // Missing numeric fields were defaulted to 0 on parse
                debug!(
                    "Migrating cache from schema version {} to {} ({} entries)",
                    v,
                    CACHE_VERSION,
                    self.entries.len()
                );
                self.version = CACHE_VERSION;
                Ok(self)
            }
        }
    }

    /// Add language bytes into the totals.
    pub fn fold_languages(&mut self, sizes: &BTreeMap<String, u64>) {
        for (name, size) in sizes {
            *self.language_totals.entry(name.clone()).or_insert(0) += size;
        }
    }

    /// Remove language bytes previously folded in; empty buckets are dropped.
    pub fn unfold_languages(&mut self, sizes: &BTreeMap<String, u64>) {
        for (name, size) in sizes {
            if let Some(total) = self.language_totals.get_mut(name) {
                *total = total.saturating_sub(*size);
                if *total == 0 {
                    self.language_totals.remove(name);
                }
            }
        }
    }
}

/// Reads and writes the cache document at a fixed path
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document. `Ok(None)` when no file exists.
    pub async fn try_load(&self) -> StatcardResult<Option<CacheInstance>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            StatcardError::io(format!("reading cache file {}", self.path.display()), e)
        })?;

        CacheInstance::from_json(&content)
            .map(Some)
            .map_err(|source| StatcardError::CacheCorrupt {
                path: self.path.clone(),
                source,
            })
    }

    /// Read the document, starting empty when it is missing or unreadable.
    pub async fn load(&self) -> CacheInstance {
        match self.try_load().await {
            Ok(Some(cache)) => {
                debug!(
                    "Loaded {} cached repositories from {}",
                    cache.entries.len(),
                    self.path.display()
                );
                cache
            }
            Ok(None) => {
                debug!("No cache at {}, starting empty", self.path.display());
                CacheInstance::default()
            }
            Err(e) => {
                warn!("{}. Starting with an empty cache", e);
                CacheInstance::default()
            }
        }
    }

    /// Load, or start empty when a flush is requested.
    pub async fn load_or_flush(&self, flush: bool) -> CacheInstance {
        if flush {
            info!("Cache flush requested, ignoring {}", self.path.display());
            return CacheInstance::default();
        }
        self.load().await
    }

    /// Replace the document on disk.
    ///
    /// Writes a sibling temp file and renames it over the target so a failed
    /// write never leaves a truncated cache.
    pub async fn save(&self, cache: &CacheInstance) -> StatcardResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                StatcardError::io(format!("creating cache directory {}", parent.display()), e)
            })?;
        }

        let mut content = serde_json::to_string_pretty(cache)?;
        content.push('\n');

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)
            .await
            .map_err(|e| StatcardError::io(format!("writing cache file {}", tmp.display()), e))?;
        fs::rename(&tmp, &self.path).await.map_err(|e| {
            StatcardError::io(format!("replacing cache file {}", self.path.display()), e)
        })?;

        debug!(
            "Saved {} cached repositories to {}",
            cache.entries.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Delete the document. Returns whether a file was removed.
    pub async fn clear(&self) -> StatcardResult<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path).await.map_err(|e| {
            StatcardError::io(format!("removing cache file {}", self.path.display()), e)
        })?;
        Ok(true)
    }
}
