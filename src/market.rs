// Market price provider - unit prices per resource kind
use crate::models::ResourceType;
use std::collections::BTreeMap;

pub type PriceTable = BTreeMap<ResourceType, i64>;

pub trait MarketPriceProvider: Send + Sync {
    /// Current unit price in credits. Kinds the market does not trade are worth 0.
    fn price_for(&self, resource: ResourceType) -> i64;

    fn all_prices(&self) -> PriceTable;
}

/// Fixed price list, usually loaded from the `[market.prices]` config table.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticMarket {
    prices: PriceTable,
}

impl StaticMarket {
    pub fn new(prices: PriceTable) -> Self {
        Self { prices }
    }

    pub fn default_prices() -> PriceTable {
        BTreeMap::from([
            (ResourceType::Iron, 15),
            (ResourceType::Gold, 120),
            (ResourceType::Platinum, 300),
            (ResourceType::Kryptonite, 1500),
        ])
    }
}

impl Default for StaticMarket {
    fn default() -> Self {
        Self::new(Self::default_prices())
    }
}

impl MarketPriceProvider for StaticMarket {
    fn price_for(&self, resource: ResourceType) -> i64 {
        self.prices.get(&resource).copied().unwrap_or(0)
    }

    fn all_prices(&self) -> PriceTable {
        self.prices.clone()
    }
}
