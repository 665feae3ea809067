// Catalog - read side queries over the asteroid store
use crate::error::LookupError;
use crate::market::PriceTable;
use crate::models::{Asteroid, ResourceType};
use crate::operations::ValuationEngine;
use crate::storage::AsteroidStore;
use std::sync::Arc;

pub struct AsteroidCatalog {
    store: Arc<dyn AsteroidStore>,
    valuation: Arc<ValuationEngine>,
}

impl AsteroidCatalog {
    pub fn new(store: Arc<dyn AsteroidStore>, valuation: Arc<ValuationEngine>) -> Self {
        Self { store, valuation }
    }

    pub fn all(&self) -> Vec<Asteroid> {
        self.store.find_all()
    }

    pub fn by_id(&self, id: u64) -> Result<Asteroid, LookupError> {
        self.store.find_by_id(id).ok_or(LookupError::IdNotFound(id))
    }

    pub fn by_name(&self, name: &str) -> Result<Asteroid, LookupError> {
        self.store
            .find_by_name(name)
            .ok_or_else(|| LookupError::NameNotFound(name.to_string()))
    }

    pub fn in_range(&self, max_distance: f64) -> Vec<Asteroid> {
        self.store.find_in_range(max_distance)
    }

    pub fn with_resource(&self, resource: ResourceType) -> Vec<Asteroid> {
        self.store.find_with_resource(resource)
    }

    pub fn profitable(&self, min_value: i64) -> Vec<Asteroid> {
        self.valuation.profitable(self.store.find_all(), min_value)
    }

    pub fn value_of(&self, id: u64) -> Result<(Asteroid, i64), LookupError> {
        let asteroid = self.by_id(id)?;
        let value = self.valuation.total_value(&asteroid);
        Ok((asteroid, value))
    }

    pub fn market_prices(&self) -> PriceTable {
        self.valuation.market().all_prices()
    }

    pub fn valuation(&self) -> &ValuationEngine {
        &self.valuation
    }
}
