use crate::generator::{
    random_token, RandomSource, SharedRandom, MAX_DISTANCE_LIGHT_YEARS, MAX_RESOURCE_AMOUNT,
};
use crate::models::{Asteroid, ResourceMap, ResourceType, RiskProfile};
use rand::{Rng, RngCore};

/// Composes asteroids from a name plus procedurally generated attributes.
///
/// Naming stays with the generators; distance, risk and resources are
/// produced here so every strategy that needs them shares one distribution.
pub struct AsteroidFactory {
    random: SharedRandom,
}

impl AsteroidFactory {
    pub fn new(source: RandomSource) -> Self {
        Self {
            random: SharedRandom::new(source),
        }
    }

    pub fn create_with_name(&self, name: impl Into<String>) -> Asteroid {
        let name = name.into();
        self.random.with(|rng| {
            let distance = rng.random_range(0.0..MAX_DISTANCE_LIGHT_YEARS);
            let risk = RiskProfile::ALL[rng.random_range(0..RiskProfile::ALL.len())];
            let resources = random_resources(rng);
            Asteroid::from_parts(name, risk, resources, distance)
        })
    }

    pub fn token(&self, len: usize) -> String {
        self.random.with(|rng| random_token(rng, len))
    }
}

// Each kind is a coin flip; quantities start at 1 so a present kind is never empty.
fn random_resources(rng: &mut dyn RngCore) -> ResourceMap {
    let mut resources = ResourceMap::new();
    for resource in ResourceType::ALL {
        if rng.random_bool(0.5) {
            continue;
        }
        resources.insert(resource, rng.random_range(1..MAX_RESOURCE_AMOUNT));
    }
    resources
}
