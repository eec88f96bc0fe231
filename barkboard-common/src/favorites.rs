//! Favorite-dog set with file persistence
//!
//! Client-side favorite state: a set of dog ids, empty at first use,
//! flipped by toggle actions, persisted across sessions. The set has no
//! relationship to the record batch lifecycle; an id can stay favorited
//! after its record leaves the feed.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::Result;

/// Set of favorited dog ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet {
    ids: BTreeSet<String>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Flip one id's membership; returns the new state (true = favorited)
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    /// All favorited ids in sorted order
    pub fn ids(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// File-backed favorites persistence in the data folder
///
/// Contract: `load()` returns the last saved set, `save()` replaces it.
/// Loading is tolerant: a missing or unreadable file is an empty set, so
/// first launch and a corrupted file behave the same way.
#[derive(Debug, Clone)]
pub struct FavoriteStore {
    path: PathBuf,
}

impl FavoriteStore {
    pub fn new(data_folder: &Path) -> Self {
        Self {
            path: data_folder.join("favorites.json"),
        }
    }

    pub fn load(&self) -> FavoriteSet {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return FavoriteSet::new(),
        };
        match serde_json::from_str(&content) {
            Ok(set) => set,
            Err(e) => {
                warn!("Ignoring malformed favorites file {:?}: {}", self.path, e);
                FavoriteSet::new()
            }
        }
    }

    pub fn save(&self, set: &FavoriteSet) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(set)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

// ========================================
// Tests
// ========================================
