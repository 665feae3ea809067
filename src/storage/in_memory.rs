// In-memory asteroid store with an optional JSON snapshot on disk
use crate::error::StoreError;
use crate::models::{sample_asteroids, Asteroid};
use crate::storage::AsteroidStore;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreSnapshot {
    last_id: u64,
    asteroids: Vec<Asteroid>,
}

impl StoreSnapshot {
    fn insert_samples(&mut self) -> usize {
        let samples = sample_asteroids();
        let added = samples.len();
        for asteroid in samples {
            self.last_id += 1;
            self.asteroids.push(asteroid.with_id(self.last_id));
        }
        added
    }

    /// Every stored asteroid carries an id and no two share one.
    fn check_ids(&self) -> Result<(), StoreError> {
        let mut seen = HashSet::new();
        for asteroid in &self.asteroids {
            let id = asteroid.id().ok_or_else(|| {
                StoreError::CorruptSnapshot(format!("asteroid {} has no id", asteroid.name()))
            })?;
            if !seen.insert(id) {
                return Err(StoreError::CorruptSnapshot(format!("id {} is used more than once", id)));
            }
        }
        Ok(())
    }
}

pub struct InMemoryAsteroidStore {
    state: RwLock<StoreSnapshot>,
    storage_path: Option<PathBuf>,
}

impl Default for InMemoryAsteroidStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAsteroidStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreSnapshot::default()),
            storage_path: None,
        }
    }

    /// Empty store bootstrapped with the sample asteroids.
    pub fn with_sample_data() -> Self {
        let mut snapshot = StoreSnapshot::default();
        snapshot.insert_samples();
        Self {
            state: RwLock::new(snapshot),
            storage_path: None,
        }
    }

    /// Store backed by a JSON snapshot; loads existing contents and rewrites the file after every save.
    pub fn open(storage_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_path = storage_path.as_ref().to_path_buf();
        let snapshot = Self::load_from_disk(&storage_path)?;
        tracing::info!(
            "💾 Loaded {} asteroids from {}",
            snapshot.asteroids.len(),
            storage_path.display()
        );

        Ok(Self {
            state: RwLock::new(snapshot),
            storage_path: Some(storage_path),
        })
    }

    /// Adds the sample asteroids when the store is empty. Returns how many were added.
    pub fn seed_sample_data(&self) -> Result<usize, StoreError> {
        let mut state = self.write();
        if !state.asteroids.is_empty() {
            return Ok(0);
        }

        let previous_last_id = state.last_id;
        let added = state.insert_samples();
        if let Some(path) = &self.storage_path {
            if let Err(e) = Self::save_to_disk(path, &state) {
                state.asteroids.clear();
                state.last_id = previous_last_id;
                return Err(e);
            }
        }

        tracing::info!("🌱 Seeded {} sample asteroids", added);
        Ok(added)
    }

    pub fn len(&self) -> usize {
        self.read().asteroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreSnapshot> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreSnapshot> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn load_from_disk(path: &Path) -> Result<StoreSnapshot, StoreError> {
        if !path.exists() {
            return Ok(StoreSnapshot::default());
        }

        let content = fs::read_to_string(path)?;
        let mut snapshot: StoreSnapshot = serde_json::from_str(&content)?;
        snapshot.check_ids()?;
        let highest = snapshot.asteroids.iter().filter_map(|a| a.id()).max().unwrap_or(0);
        snapshot.last_id = snapshot.last_id.max(highest);
        Ok(snapshot)
    }

    fn save_to_disk(path: &Path, snapshot: &StoreSnapshot) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(snapshot)?;
        fs::write(path, content)?;
        Ok(())
    }
}

impl AsteroidStore for InMemoryAsteroidStore {
    fn find_all(&self) -> Vec<Asteroid> {
        self.read().asteroids.clone()
    }

    fn find_by_id(&self, id: u64) -> Option<Asteroid> {
        self.read().asteroids.iter().find(|a| a.id() == Some(id)).cloned()
    }

    fn save(&self, asteroid: &Asteroid) -> Result<Asteroid, StoreError> {
        if let Some(id) = asteroid.id() {
            return Err(StoreError::AlreadyPersisted(id));
        }

        let mut state = self.write();
        state.last_id += 1;
        let stored = asteroid.with_id(state.last_id);
        state.asteroids.push(stored.clone());

        if let Some(path) = &self.storage_path {
            if let Err(e) = Self::save_to_disk(path, &state) {
                // Keep memory and disk in step: the save did not happen.
                state.asteroids.pop();
                state.last_id -= 1;
                return Err(e);
            }
        }

        tracing::debug!("💾 Stored asteroid {} as #{}", stored.name(), state.last_id);
        Ok(stored)
    }
}
