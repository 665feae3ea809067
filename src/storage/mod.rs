// Storage module - asteroid persistence contract and the in-memory store
pub mod in_memory;

pub use in_memory::InMemoryAsteroidStore;

use crate::error::StoreError;
use crate::models::{Asteroid, ResourceType};

/// CRUD and query contract for persisted asteroids.
///
/// Implementations must be safe to share between one writer (discovery) and
/// many readers: readers never see a half-written asteroid, every `save`
/// gets its own increasing id, and `find_all` is a consistent snapshot.
pub trait AsteroidStore: Send + Sync {
    fn find_all(&self) -> Vec<Asteroid>;

    /// Persists an asteroid that has no id yet and returns the copy carrying the new id.
    fn save(&self, asteroid: &Asteroid) -> Result<Asteroid, StoreError>;

    fn find_by_id(&self, id: u64) -> Option<Asteroid> {
        self.find_all().into_iter().find(|a| a.id() == Some(id))
    }

    fn find_by_name(&self, name: &str) -> Option<Asteroid> {
        self.find_all().into_iter().find(|a| a.name() == name)
    }

    fn find_in_range(&self, max_distance: f64) -> Vec<Asteroid> {
        self.find_all()
            .into_iter()
            .filter(|a| a.distance_in_light_years() <= max_distance)
            .collect()
    }

    fn find_with_resource(&self, resource: ResourceType) -> Vec<Asteroid> {
        self.find_all()
            .into_iter()
            .filter(|a| a.has_resource(resource))
            .collect()
    }
}
