// Valuation - credit worth of an asteroid's resources at current market prices
use crate::market::MarketPriceProvider;
use crate::models::Asteroid;
use std::sync::Arc;

pub struct ValuationEngine {
    market: Arc<dyn MarketPriceProvider>,
}

impl ValuationEngine {
    pub fn new(market: Arc<dyn MarketPriceProvider>) -> Self {
        Self { market }
    }

    pub fn market(&self) -> &dyn MarketPriceProvider {
        self.market.as_ref()
    }

    /// Sum of quantity × unit price over the resources present on the asteroid.
    /// Saturates at `i64::MAX` instead of overflowing on extreme prices.
    pub fn total_value(&self, asteroid: &Asteroid) -> i64 {
        asteroid
            .resources()
            .iter()
            .map(|(resource, quantity)| i64::from(*quantity).saturating_mul(self.market.price_for(*resource)))
            .fold(0i64, i64::saturating_add)
    }

    /// Keeps the asteroids worth at least `min_value`, in input order.
    pub fn profitable(&self, asteroids: impl IntoIterator<Item = Asteroid>, min_value: i64) -> Vec<Asteroid> {
        asteroids
            .into_iter()
            .filter(|asteroid| self.total_value(asteroid) >= min_value)
            .collect()
    }

    /// Pairs every asteroid with its value, most valuable first. Ties keep their input order.
    pub fn rank_by_value(&self, asteroids: impl IntoIterator<Item = Asteroid>) -> Vec<(Asteroid, i64)> {
        let mut ranked: Vec<(Asteroid, i64)> = asteroids
            .into_iter()
            .map(|asteroid| {
                let value = self.total_value(&asteroid);
                (asteroid, value)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}
