// Prospector - wires configuration into the discovery and query services
use crate::client::{ChatCompletionsClient, TextGenerator};
use crate::config::{AsteroidMiningConfig, StorageConfig};
use crate::error::{AppError, ConfigError, StoreError, TextGenerationError};
use crate::generator::{
    source_for, AsteroidFactory, AsteroidGenerator, FullAiGenerator, GeneratorMode,
    HybridGenerator, ProceduralGenerator,
};
use crate::market::StaticMarket;
use crate::operations::{AsteroidCatalog, DiscoveryService, ValuationEngine};
use crate::storage::{AsteroidStore, InMemoryAsteroidStore};
use std::sync::Arc;

// Random stream per consumer, so a seeded run is reproducible end to end.
const FACTORY_STREAM: u64 = 0;
const GENERATOR_STREAM: u64 = 1;
const DISCOVERY_STREAM: u64 = 2;

pub struct Prospector {
    pub discovery: DiscoveryService,
    pub catalog: AsteroidCatalog,
}

impl Prospector {
    /// Builds everything the configuration asks for, including the storage and the
    /// text-generation client when an AI mode is selected.
    pub fn from_config(config: &AsteroidMiningConfig) -> Result<Self, AppError> {
        config.validate()?;

        let store: Arc<dyn AsteroidStore> = open_store(&config.storage)?;
        let text_client: Option<Arc<dyn TextGenerator>> = if config.generator.mode.uses_text_generation() {
            let client = ChatCompletionsClient::new(&config.llm).map_err(|e| match e {
                TextGenerationError::MissingApiKey(_) | TextGenerationError::InvalidApiKey(_) => {
                    AppError::Config(ConfigError::Invalid(e.to_string()))
                }
                other => AppError::TextGeneration(other),
            })?;
            Some(Arc::new(client))
        } else {
            None
        };

        Self::assemble(config, store, text_client)
    }

    /// Builds the services around an existing store and text generator.
    pub fn assemble(
        config: &AsteroidMiningConfig,
        store: Arc<dyn AsteroidStore>,
        text_client: Option<Arc<dyn TextGenerator>>,
    ) -> Result<Self, AppError> {
        let seed = config.discovery.seed;
        let generator = build_generator(config.generator.mode, seed, text_client)?;
        tracing::info!("🪨 Asteroid generation mode: {}", generator.mode());

        let discovery = DiscoveryService::new(
            generator,
            Arc::clone(&store),
            config.discovery.discovery_rate,
            source_for(seed, DISCOVERY_STREAM),
        );

        let market = Arc::new(StaticMarket::new(config.market.prices.clone()));
        let valuation = Arc::new(ValuationEngine::new(market));
        let catalog = AsteroidCatalog::new(store, valuation);

        Ok(Self { discovery, catalog })
    }
}

/// Picks the one generation strategy used for the lifetime of the process.
pub fn build_generator(
    mode: GeneratorMode,
    seed: Option<u64>,
    text_client: Option<Arc<dyn TextGenerator>>,
) -> Result<Arc<dyn AsteroidGenerator>, ConfigError> {
    let factory = Arc::new(AsteroidFactory::new(source_for(seed, FACTORY_STREAM)));

    let generator: Arc<dyn AsteroidGenerator> = match (mode, text_client) {
        (GeneratorMode::Procedural, _) => Arc::new(ProceduralGenerator::new(factory)),
        (GeneratorMode::Hybrid, Some(client)) => Arc::new(HybridGenerator::new(
            client,
            factory,
            source_for(seed, GENERATOR_STREAM),
        )),
        (GeneratorMode::FullAi, Some(client)) => Arc::new(FullAiGenerator::new(client)),
        (mode, None) => {
            return Err(ConfigError::Invalid(format!(
                "generator mode {} needs a text generation client",
                mode
            )));
        }
    };

    Ok(generator)
}

pub fn open_store(storage: &StorageConfig) -> Result<Arc<InMemoryAsteroidStore>, StoreError> {
    let store = match &storage.path {
        Some(path) => InMemoryAsteroidStore::open(path)?,
        None => InMemoryAsteroidStore::new(),
    };

    if storage.seed_sample_data {
        store.seed_sample_data()?;
    }

    Ok(Arc::new(store))
}
