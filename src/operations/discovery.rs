// Discovery - probability-gated deep-space scans
use crate::error::DiscoveryError;
use crate::generator::{AsteroidGenerator, RandomSource, SharedRandom};
use crate::models::Asteroid;
use crate::storage::AsteroidStore;
use rand::Rng;
use std::sync::Arc;

pub const DEFAULT_DISCOVERY_RATE: f64 = 0.7;

/// Outcome of several scans run back to back.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub attempts: usize,
    pub discovered: Vec<Asteroid>,
    /// The failure that ended the run early, if any.
    pub failure: Option<DiscoveryError>,
}

impl ScanReport {
    pub fn empty_scans(&self) -> usize {
        self.attempts - self.discovered.len() - usize::from(self.failure.is_some())
    }
}

pub struct DiscoveryService {
    generator: Arc<dyn AsteroidGenerator>,
    store: Arc<dyn AsteroidStore>,
    discovery_rate: f64,
    random: SharedRandom,
}

impl DiscoveryService {
    /// `discovery_rate` is the chance that one scan finds something; it is clamped to `[0, 1]`.
    pub fn new(
        generator: Arc<dyn AsteroidGenerator>,
        store: Arc<dyn AsteroidStore>,
        discovery_rate: f64,
        source: RandomSource,
    ) -> Self {
        let clamped = if discovery_rate.is_nan() { 0.0 } else { discovery_rate.clamp(0.0, 1.0) };
        if clamped != discovery_rate {
            tracing::warn!("⚠️ Discovery rate {} clamped to {}", discovery_rate, clamped);
        }

        Self {
            generator,
            store,
            discovery_rate: clamped,
            random: SharedRandom::new(source),
        }
    }

    pub fn discovery_rate(&self) -> f64 {
        self.discovery_rate
    }

    /// One scan. `Ok(None)` means the scan found nothing; `Err` means the scan itself broke.
    pub async fn discover_new_asteroid(&self) -> Result<Option<Asteroid>, DiscoveryError> {
        let roll: f64 = self.random.with(|rng| rng.random());
        if roll >= self.discovery_rate {
            tracing::info!("🔭 Scan complete, nothing found (roll {:.3} ≥ {:.3})", roll, self.discovery_rate);
            return Ok(None);
        }

        let asteroid = self.generator.generate().await?;
        let stored = self.store.save(&asteroid)?;
        tracing::info!(
            "☄️ Discovered {} #{} via {} generation",
            stored.name(),
            stored.id().unwrap_or_default(),
            self.generator.mode()
        );
        Ok(Some(stored))
    }

    /// Runs up to `attempts` scans, stopping at the first failure.
    pub async fn scan(&self, attempts: usize) -> ScanReport {
        let mut report = ScanReport::default();

        for _ in 0..attempts {
            report.attempts += 1;
            match self.discover_new_asteroid().await {
                Ok(Some(asteroid)) => report.discovered.push(asteroid),
                Ok(None) => {}
                Err(e) => {
                    report.failure = Some(e);
                    break;
                }
            }
        }

        report
    }
}
