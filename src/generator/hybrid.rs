use crate::client::{PromptRequest, TextGenerator};
use crate::error::GenerationError;
use crate::generator::{
    random_token, AsteroidFactory, AsteroidGenerator, GeneratorMode, RandomSource, SharedRandom,
    MAX_NAME_LENGTH,
};
use crate::models::Asteroid;
use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;
use thiserror::Error;

pub const THEMES: [&str; 17] = [
    "ancient", "cybernetic", "gaseous", "crystalline", "volcanic",
    "frozen", "radioactive", "gazy", "rocky", "dusty", "dark",
    "shiny", "volatile", "cloudy", "botanic", "wild", "exotic",
];

pub const MAX_NAME_TOKENS: usize = 3;

const NAMING_INSTRUCTION: &str = "You are a planetary naming expert.
Rules:
- Provide ONLY the name, no sentences, no punctuation.
- Example: 'Ceres-Alpha', 'Aris-Centurion', 'X-99-Eris', or 'Alpha-Lumina-V2'.
- Avoid common suffixes like '-Alpha', '-Prime', '-Major' or '-One'.
- Avoid common prefixes like 'Astraeus-' or 'Umbra-'.
- Avoid repetition.";

const NAMING_PROMPT: &str = "Generate one creative asteroid name that sounds scientific, mystic and/or sci-fi and has a {theme} vibe.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameRejection {
    #[error("name is empty")]
    Empty,
    #[error("name has {0} characters")]
    TooLong(usize),
    #[error("name has {0} parts")]
    TooManyParts(usize),
    #[error("name contains '{0}'")]
    ForbiddenCharacter(char),
}

/// Checks a machine-suggested name. Surrounding whitespace is ignored.
pub fn validate_name(candidate: &str) -> Result<String, NameRejection> {
    let name = candidate.trim();
    if name.is_empty() {
        return Err(NameRejection::Empty);
    }

    let length = name.chars().count();
    if length > MAX_NAME_LENGTH {
        return Err(NameRejection::TooLong(length));
    }

    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == ' '))
    {
        return Err(NameRejection::ForbiddenCharacter(c));
    }

    let parts = name
        .split(|c: char| c == '-' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .count();
    if parts > MAX_NAME_TOKENS {
        return Err(NameRejection::TooManyParts(parts));
    }

    Ok(name.to_string())
}

/// Text generation names the asteroid; everything structured comes from the factory.
/// A bad name is replaced locally, a failing service is not.
pub struct HybridGenerator {
    client: Arc<dyn TextGenerator>,
    factory: Arc<AsteroidFactory>,
    random: SharedRandom,
}

impl HybridGenerator {
    pub fn new(client: Arc<dyn TextGenerator>, factory: Arc<AsteroidFactory>, source: RandomSource) -> Self {
        Self {
            client,
            factory,
            random: SharedRandom::new(source),
        }
    }

    fn fallback_name(&self, theme: &str) -> String {
        let token = self.random.with(|rng| random_token(rng, 6));
        format!("{} asteroid {}", theme, token)
    }
}

#[async_trait]
impl AsteroidGenerator for HybridGenerator {
    fn mode(&self) -> GeneratorMode {
        GeneratorMode::Hybrid
    }

    async fn generate(&self) -> Result<Asteroid, GenerationError> {
        let theme = self.random.with(|rng| THEMES[rng.random_range(0..THEMES.len())]);
        let request = PromptRequest::new(NAMING_INSTRUCTION, NAMING_PROMPT).param("theme", theme);

        let suggestion = self.client.complete(&request).await?;
        let name = match validate_name(&suggestion) {
            Ok(name) => name,
            Err(rejection) => {
                let fallback = self.fallback_name(theme);
                tracing::warn!(
                    "⚠️ Rejected generated name {:?} ({}), using {}",
                    suggestion,
                    rejection,
                    fallback
                );
                fallback
            }
        };

        Ok(self.factory.create_with_name(name))
    }
}
