use crate::error::InvalidAsteroid;
use crate::models::{ResourceType, RiskProfile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resource quantities keyed by kind. A kind that is absent has no deposit.
pub type ResourceMap = BTreeMap<ResourceType, u32>;

/// An asteroid as an immutable value.
///
/// `id` is `None` until the asteroid is handed to an [`AsteroidStore`](crate::storage::AsteroidStore),
/// which returns a copy carrying the assigned identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "AsteroidRecord")]
pub struct Asteroid {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<u64>,
    name: String,
    risk_profile: RiskProfile,
    resources: ResourceMap,
    distance_in_light_years: f64,
}

/// Wire shape of an asteroid; converted through `Asteroid::new` so stored data obeys the same rules.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AsteroidRecord {
    #[serde(default)]
    id: Option<u64>,
    name: String,
    risk_profile: RiskProfile,
    #[serde(default)]
    resources: ResourceMap,
    distance_in_light_years: f64,
}

impl TryFrom<AsteroidRecord> for Asteroid {
    type Error = InvalidAsteroid;

    fn try_from(record: AsteroidRecord) -> Result<Self, Self::Error> {
        let asteroid = Asteroid::new(
            record.name,
            record.risk_profile,
            record.resources,
            record.distance_in_light_years,
        )?;
        Ok(match record.id {
            Some(id) => asteroid.with_id(id),
            None => asteroid,
        })
    }
}

impl Asteroid {
    /// Builds an unpersisted asteroid, rejecting values that break the model invariants.
    /// Zero quantities are dropped since an absent kind already means "none".
    pub fn new(
        name: impl Into<String>,
        risk_profile: RiskProfile,
        resources: ResourceMap,
        distance_in_light_years: f64,
    ) -> Result<Self, InvalidAsteroid> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InvalidAsteroid::EmptyName);
        }
        if !distance_in_light_years.is_finite() || distance_in_light_years < 0.0 {
            return Err(InvalidAsteroid::Distance(distance_in_light_years));
        }

        Ok(Self::from_parts(name, risk_profile, resources, distance_in_light_years))
    }

    pub(crate) fn from_parts(
        name: String,
        risk_profile: RiskProfile,
        mut resources: ResourceMap,
        distance_in_light_years: f64,
    ) -> Self {
        resources.retain(|_, quantity| *quantity > 0);
        Self {
            id: None,
            name,
            risk_profile,
            resources,
            distance_in_light_years,
        }
    }

    /// Derived copy carrying a store-assigned identifier.
    pub fn with_id(&self, id: u64) -> Self {
        Self {
            id: Some(id),
            ..self.clone()
        }
    }

    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn risk_profile(&self) -> RiskProfile {
        self.risk_profile
    }

    pub fn resources(&self) -> &ResourceMap {
        &self.resources
    }

    pub fn distance_in_light_years(&self) -> f64 {
        self.distance_in_light_years
    }

    pub fn quantity_of(&self, resource: ResourceType) -> u32 {
        self.resources.get(&resource).copied().unwrap_or(0)
    }

    pub fn has_resource(&self, resource: ResourceType) -> bool {
        self.resources.contains_key(&resource)
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// The four asteroids a fresh store is bootstrapped with when sample data is enabled.
pub fn sample_asteroids() -> Vec<Asteroid> {
    vec![
        Asteroid::from_parts(
            "Ceres-Alpha".to_string(),
            RiskProfile::Safe,
            BTreeMap::from([(ResourceType::Iron, 500), (ResourceType::Gold, 10)]),
            2.5,
        ),
        Asteroid::from_parts(
            "X-99-Eris".to_string(),
            RiskProfile::Caution,
            BTreeMap::from([(ResourceType::Kryptonite, 5), (ResourceType::Platinum, 5)]),
            15.1,
        ),
        Asteroid::from_parts(
            "Alpha-Lumina-V2".to_string(),
            RiskProfile::Volatile,
            BTreeMap::from([
                (ResourceType::Iron, 500),
                (ResourceType::Platinum, 1),
                (ResourceType::Gold, 2),
            ]),
            5.7,
        ),
        Asteroid::from_parts(
            "Aris-Centurion".to_string(),
            RiskProfile::Lethal,
            BTreeMap::from([(ResourceType::Kryptonite, 1500)]),
            25.3,
        ),
    ]
}
