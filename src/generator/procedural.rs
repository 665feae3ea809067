use crate::error::GenerationError;
use crate::generator::{AsteroidFactory, AsteroidGenerator, GeneratorMode};
use crate::models::Asteroid;
use async_trait::async_trait;
use std::sync::Arc;

pub const NAME_PREFIX: &str = "Asteroid";

/// Fully local generation. Never fails.
pub struct ProceduralGenerator {
    factory: Arc<AsteroidFactory>,
}

impl ProceduralGenerator {
    pub fn new(factory: Arc<AsteroidFactory>) -> Self {
        Self { factory }
    }
}

#[async_trait]
impl AsteroidGenerator for ProceduralGenerator {
    fn mode(&self) -> GeneratorMode {
        GeneratorMode::Procedural
    }

    async fn generate(&self) -> Result<Asteroid, GenerationError> {
        let name = format!("{} {}", NAME_PREFIX, self.factory.token(6));
        tracing::debug!("🪨 Procedural asteroid named {}", name);
        Ok(self.factory.create_with_name(name))
    }
}
