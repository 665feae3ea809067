// Generator module - pluggable asteroid generation strategies
pub mod factory;
pub mod full_ai;
pub mod hybrid;
pub mod procedural;

pub use factory::AsteroidFactory;
pub use full_ai::FullAiGenerator;
pub use hybrid::HybridGenerator;
pub use procedural::ProceduralGenerator;

use crate::error::GenerationError;
use crate::models::Asteroid;
use async_trait::async_trait;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Upper bound (exclusive) for generated distances.
pub const MAX_DISTANCE_LIGHT_YEARS: f64 = 100.0;
/// Upper bound (exclusive) for generated resource quantities.
pub const MAX_RESOURCE_AMOUNT: u32 = 100_000;
/// Longest name accepted from a machine generator.
pub const MAX_NAME_LENGTH: usize = 25;

const TOKEN_ALPHABET: &[u8] = b"0123456789abcdef";

/// Produces one new, unpersisted asteroid.
#[async_trait]
pub trait AsteroidGenerator: Send + Sync {
    fn mode(&self) -> GeneratorMode;

    async fn generate(&self) -> Result<Asteroid, GenerationError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeneratorMode {
    #[default]
    Procedural,
    Hybrid,
    FullAi,
}

impl GeneratorMode {
    pub fn uses_text_generation(&self) -> bool {
        !matches!(self, GeneratorMode::Procedural)
    }
}

impl fmt::Display for GeneratorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeneratorMode::Procedural => "procedural",
            GeneratorMode::Hybrid => "hybrid",
            GeneratorMode::FullAi => "full-ai",
        };
        f.write_str(name)
    }
}

/// Injected randomness. Every factory, generator and discovery service owns one.
pub type RandomSource = Box<dyn RngCore + Send>;

/// Deterministic source; different `stream`s of the same seed never overlap.
pub fn seeded_source(seed: u64, stream: u64) -> RandomSource {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(stream);
    Box::new(rng)
}

pub fn entropy_source() -> RandomSource {
    Box::new(ChaCha8Rng::from_os_rng())
}

/// `seed` set: deterministic stream, otherwise OS entropy.
pub fn source_for(seed: Option<u64>, stream: u64) -> RandomSource {
    match seed {
        Some(seed) => seeded_source(seed, stream),
        None => entropy_source(),
    }
}

/// A random source that can be used through `&self`. The lock is never held across an await.
pub struct SharedRandom {
    source: Mutex<RandomSource>,
}

impl SharedRandom {
    pub fn new(source: RandomSource) -> Self {
        Self {
            source: Mutex::new(source),
        }
    }

    pub fn with<T>(&self, f: impl FnOnce(&mut dyn RngCore) -> T) -> T {
        let mut guard = self.source.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut **guard)
    }
}

/// Short lowercase hex token, e.g. `3fa9c1`.
pub fn random_token(rng: &mut dyn RngCore, len: usize) -> String {
    (0..len)
        .map(|_| TOKEN_ALPHABET[rng.random_range(0..TOKEN_ALPHABET.len())] as char)
        .collect()
}
