use crate::error::ConfigError;
use crate::generator::GeneratorMode;
use crate::market::{PriceTable, StaticMarket};
use crate::operations::DEFAULT_DISCOVERY_RATE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config/asteroid_mining.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidMiningConfig {
    pub discovery: DiscoveryConfig,
    pub generator: GeneratorConfig,
    pub llm: LlmConfig,
    pub market: MarketConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Probability that a single scan finds an asteroid (0.0 to 1.0)
    pub discovery_rate: f64,
    /// Seed for every random source; unset means OS entropy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// procedural, hybrid or full-ai
    pub mode: GeneratorMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API, without the /chat/completions suffix
    pub base_url: String,
    pub model: String,
    /// Environment variable holding the API key; unset for servers without auth
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Append every request and response to api_debug.log
    #[serde(default)]
    pub api_logging: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Unit price in credits per resource kind
    pub prices: PriceTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON snapshot file; unset keeps asteroids in memory only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Bootstrap the sample asteroids into an empty store
    pub seed_sample_data: bool,
}

impl Default for AsteroidMiningConfig {
    fn default() -> Self {
        Self {
            discovery: DiscoveryConfig {
                discovery_rate: DEFAULT_DISCOVERY_RATE,
                seed: None,
            },
            generator: GeneratorConfig {
                mode: GeneratorMode::Procedural,
            },
            llm: LlmConfig {
                base_url: "https://api.openai.com/v1".to_string(),
                model: "gpt-4o-mini".to_string(),
                api_key_env: Some("OPENAI_API_KEY".to_string()),
                temperature: 0.9,
                timeout_seconds: 30,
                api_logging: false,
            },
            market: MarketConfig {
                prices: StaticMarket::default_prices(),
            },
            storage: StorageConfig {
                path: Some("data/asteroids.json".to_string()),
                seed_sample_data: true,
            },
        }
    }
}

impl AsteroidMiningConfig {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load_or_create(config_path: &str) -> Result<Self, ConfigError> {
        if Path::new(config_path).exists() {
            tracing::info!("📋 Loading configuration from {}", config_path);
            let config_str = fs::read_to_string(config_path)?;
            let config: AsteroidMiningConfig = toml::from_str(&config_str)?;
            Ok(config)
        } else {
            tracing::info!("📋 Creating default configuration at {}", config_path);
            let config = AsteroidMiningConfig::default();
            config.save(config_path)?;
            tracing::info!("💡 Edit {} to customize discovery behavior", config_path);
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self, config_path: &str) -> Result<(), ConfigError> {
        if let Some(parent) = Path::new(config_path).parent() {
            fs::create_dir_all(parent)?;
        }

        let config_str = toml::to_string_pretty(self)?;
        fs::write(config_path, config_str)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rate = self.discovery.discovery_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err(invalid("discovery_rate must be between 0.0 and 1.0"));
        }

        if let Some((resource, price)) = self.market.prices.iter().find(|(_, price)| **price < 0) {
            return Err(invalid(&format!("price for {} must not be negative (got {})", resource, price)));
        }

        if self.generator.mode.uses_text_generation() {
            if self.llm.base_url.trim().is_empty() {
                return Err(invalid("llm.base_url is required for AI generation"));
            }
            if self.llm.model.trim().is_empty() {
                return Err(invalid("llm.model is required for AI generation"));
            }
        }

        if self.llm.timeout_seconds == 0 {
            return Err(invalid("llm.timeout_seconds must be greater than 0"));
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        tracing::info!("📋 Configuration Summary:");
        tracing::info!("   🔭 Discovery rate: {:.1}%", self.discovery.discovery_rate * 100.0);
        tracing::info!("   🪨 Generator mode: {}", self.generator.mode);
        if self.generator.mode.uses_text_generation() {
            tracing::info!("   🤖 Model: {} at {}", self.llm.model, self.llm.base_url);
        }
        match &self.storage.path {
            Some(path) => tracing::info!("   💾 Storage: {}", path),
            None => tracing::info!("   💾 Storage: in memory"),
        }
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid(message.to_string())
}
