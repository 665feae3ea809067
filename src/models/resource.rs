// Resource catalog - closed sets of extractable materials and risk levels
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Extractable materials found on asteroids.
///
/// Serialized through its catalog name so it works as a map key in both JSON and TOML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ResourceType {
    Iron,
    Gold,
    Platinum,
    Kryptonite,
}

impl ResourceType {
    pub const ALL: [ResourceType; 4] = [
        ResourceType::Iron,
        ResourceType::Gold,
        ResourceType::Platinum,
        ResourceType::Kryptonite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Iron => "IRON",
            ResourceType::Gold => "GOLD",
            ResourceType::Platinum => "PLATINUM",
            ResourceType::Kryptonite => "KRYPTONITE",
        }
    }

    /// Comma separated list of every resource name, as shown to text generators.
    pub fn catalog_names() -> String {
        Self::ALL
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown resource type '{}' (expected one of {})", s, Self::catalog_names()))
    }
}

impl TryFrom<String> for ResourceType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ResourceType> for String {
    fn from(resource: ResourceType) -> Self {
        resource.as_str().to_string()
    }
}

/// Danger classification for mining operations, ordered from safest to most dangerous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskProfile {
    Safe,
    Caution,
    Volatile,
    Lethal,
}

impl RiskProfile {
    pub const ALL: [RiskProfile; 4] = [
        RiskProfile::Safe,
        RiskProfile::Caution,
        RiskProfile::Volatile,
        RiskProfile::Lethal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskProfile::Safe => "SAFE",
            RiskProfile::Caution => "CAUTION",
            RiskProfile::Volatile => "VOLATILE",
            RiskProfile::Lethal => "LETHAL",
        }
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown risk profile '{}'", s))
    }
}
