use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Persistence for the favorite set: one JSON array of identifiers in
/// a single file, rewritten whole on every change.
#[derive(Debug, Clone)]
pub struct FavoriteStore {
    path: PathBuf,
}

impl FavoriteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the stored set. A missing or malformed file is an empty
    /// set, never an error.
    pub fn load(&self) -> BTreeSet<String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("No favorites file at {}: {}", self.path.display(), e);
                return BTreeSet::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(set) => set,
            Err(e) => {
                warn!(
                    "Ignoring malformed favorites file {}: {}",
                    self.path.display(),
                    e
                );
                BTreeSet::new()
            }
        }
    }

    pub fn save(&self, favorites: &BTreeSet<String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(favorites)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

/// The in-memory favorite set, kept in sync with its store after every
/// toggle.
#[derive(Debug)]
pub struct Favorites {
    set: BTreeSet<String>,
    store: FavoriteStore,
}

impl Favorites {
    pub fn load(store: FavoriteStore) -> Self {
        let set = store.load();
        debug!("Loaded {} favorite(s)", set.len());
        Self { set, store }
    }

    /// Add the id if absent, remove it if present. Returns true when
    /// the id is favorited after the toggle.
    pub fn toggle(&mut self, id: &str) -> bool {
        let now_favorited = if self.set.contains(id) {
            self.set.remove(id);
            false
        } else {
            self.set.insert(id.to_string());
            true
        };

        if let Err(e) = self.store.save(&self.set) {
            warn!("Failed to persist favorites: {:#}", e);
        }

        now_favorited
    }

    pub fn contains(&self, id: &str) -> bool {
        self.set.contains(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.set.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}
