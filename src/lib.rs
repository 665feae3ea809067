// Asteroid Mining Discovery Library
// Probability-gated asteroid discovery, pluggable generation strategies and resource valuation

pub mod models;
pub mod client;
pub mod generator;
pub mod storage;
pub mod market;
pub mod operations;
pub mod prospector;
pub mod config;
pub mod error;
pub mod verbosity;

// Re-export commonly used types
pub use models::{Asteroid, ResourceMap, ResourceType, RiskProfile};
pub use generator::{AsteroidFactory, AsteroidGenerator, GeneratorMode};
pub use storage::{AsteroidStore, InMemoryAsteroidStore};
pub use market::{MarketPriceProvider, StaticMarket};
pub use operations::{AsteroidCatalog, DiscoveryService, ScanReport, ValuationEngine};
pub use prospector::Prospector;
pub use config::AsteroidMiningConfig;
pub use error::{AppError, DiscoveryError, GenerationError, LookupError};
