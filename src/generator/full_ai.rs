use crate::client::{PromptRequest, TextGenerator};
use crate::error::GenerationError;
use crate::generator::{
    AsteroidGenerator, GeneratorMode, MAX_DISTANCE_LIGHT_YEARS, MAX_NAME_LENGTH,
    MAX_RESOURCE_AMOUNT,
};
use crate::models::{Asteroid, ResourceMap, ResourceType, RiskProfile};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;

const ASTEROID_INSTRUCTION: &str = "You are a planetary naming expert. Create realistic but creative asteroid data.
Rules:
- The name should look similar to these: 'Ceres-Alpha', 'Aris-Centurion', 'X-99-Eris', or 'Alpha-Lumina-V2'.
- The name has at most 25 characters.
- Avoid common suffixes like '-Alpha', '-Prime', '-Major' or '-One'.
- Avoid common prefixes like 'Astraeus-' or 'Umbra-'.
- Avoid repetition.
- distanceInLightYears is a number between 0 and 100.
- Resource amounts are whole numbers between 0 and 100000; leave out resources the asteroid does not have.
- Reply with a single JSON object and nothing else.";

const ASTEROID_PROMPT: &str = "Generate one unique asteroid.
Use a random sci-fi theme.
Ensure the resource amounts are realistic.
Valid resource types are: {resourceTypes}
Valid risk profiles are: {riskProfiles}
{format}";

const RESPONSE_FORMAT: &str = r#"Respond with JSON in exactly this shape:
{"name": "string", "riskProfile": "SAFE|CAUTION|VOLATILE|LETHAL", "distanceInLightYears": 12.5, "resources": {"IRON": 1200}}"#;

/// The asteroid as described by the text generator, before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AsteroidDraft {
    name: String,
    risk_profile: RiskProfile,
    distance_in_light_years: f64,
    resources: BTreeMap<String, i64>,
}

/// Lets the text generator describe the whole asteroid. Nothing is defaulted:
/// an unreachable service and an unusable reply both come back as errors.
pub struct FullAiGenerator {
    client: Arc<dyn TextGenerator>,
}

impl FullAiGenerator {
    pub fn new(client: Arc<dyn TextGenerator>) -> Self {
        Self { client }
    }

    fn request() -> PromptRequest {
        let risk_profiles = RiskProfile::ALL
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        PromptRequest::new(ASTEROID_INSTRUCTION, ASTEROID_PROMPT)
            .param("resourceTypes", ResourceType::catalog_names())
            .param("riskProfiles", risk_profiles)
            .param("format", RESPONSE_FORMAT)
            .json()
    }
}

#[async_trait]
impl AsteroidGenerator for FullAiGenerator {
    fn mode(&self) -> GeneratorMode {
        GeneratorMode::FullAi
    }

    async fn generate(&self) -> Result<Asteroid, GenerationError> {
        let reply = self.client.complete(&Self::request()).await?;
        tracing::debug!("🤖 Asteroid description received: {}", reply);
        parse_asteroid(&reply)
    }
}

/// Turns a structured reply into an unpersisted asteroid.
pub fn parse_asteroid(raw: &str) -> Result<Asteroid, GenerationError> {
    let json = extract_json(raw);
    let draft: AsteroidDraft = serde_json::from_str(json)
        .map_err(|e| GenerationError::malformed(e.to_string(), raw))?;

    let name = draft.name.trim();
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(GenerationError::malformed(
            format!("name '{}' is longer than {} characters", name, MAX_NAME_LENGTH),
            raw,
        ));
    }

    if !(0.0..=MAX_DISTANCE_LIGHT_YEARS).contains(&draft.distance_in_light_years) {
        return Err(GenerationError::malformed(
            format!("distance {} is outside 0..={}", draft.distance_in_light_years, MAX_DISTANCE_LIGHT_YEARS),
            raw,
        ));
    }

    let mut resources = ResourceMap::new();
    for (kind, amount) in draft.resources {
        let resource = kind
            .parse::<ResourceType>()
            .map_err(|e| GenerationError::malformed(e, raw))?;
        if !(0..=i64::from(MAX_RESOURCE_AMOUNT)).contains(&amount) {
            return Err(GenerationError::malformed(
                format!("{} amount {} is outside 0..={}", resource, amount, MAX_RESOURCE_AMOUNT),
                raw,
            ));
        }
        // Range checked above, fits in u32.
        resources.insert(resource, amount as u32);
    }

    Asteroid::new(name, draft.risk_profile, resources, draft.distance_in_light_years)
        .map_err(|e| GenerationError::malformed(e.to_string(), raw))
}

// Replies sometimes arrive wrapped in a markdown code fence.
fn extract_json(raw: &str) -> &str {
    let trimmed = raw.trim();
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}
