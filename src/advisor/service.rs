//! Recommendation service.
//!
//! Combines the deterministic engine with the optional external advisor.
//! Every submitted snapshot gets a generation number and its rule-based result
//! is published immediately, so a valid recommendation is always available.
//! External advice is computed in the background and only replaces the
//! published result if no newer snapshot arrived in the meantime.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;

use crate::config::AdvisorConfig;
use crate::error::{AdvisorError, AdvisorResult};
use crate::recommendations::{recommend, suitable_plants, Advisory, AdvisorySource, PlantSuggestions};
use crate::snapshot::ReadingSnapshot;

use super::capability::{AdvisorCapability, AdvisorMode, CapabilityState};
use super::client::TextGenerator;
use super::parser::parse_advice;
use super::prompt::build_prompt;

/// A published recommendation for one snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Submission number of the snapshot this was computed from
    pub generation: u64,
    pub source: AdvisorySource,
    pub snapshot: ReadingSnapshot,
    pub advisories: Vec<Advisory>,
    pub plants: PlantSuggestions,
}

impl Recommendation {
    /// Rule-based recommendation for a snapshot
    pub fn deterministic(generation: u64, snapshot: ReadingSnapshot) -> Self {
        Self {
            generation,
            source: AdvisorySource::Rules,
            advisories: recommend(&snapshot),
            plants: suitable_plants(&snapshot),
            snapshot,
        }
    }
}

/// Result of `submit`
#[derive(Debug)]
pub struct Submission {
    /// Rule-based result, already published
    pub recommendation: Recommendation,
    /// Background external consultation, if one was started
    pub pending: Option<JoinHandle<()>>,
}

pub struct RecommendationService<G> {
    generator: G,
    capability: AdvisorCapability,
    timeout: Duration,
    generation: AtomicU64,
    latest: RwLock<Option<Recommendation>>,
}

impl<G: TextGenerator> RecommendationService<G> {
    pub fn new(generator: G, mode: AdvisorMode, timeout: Duration) -> Self {
        Self {
            generator,
            capability: AdvisorCapability::new(mode),
            timeout,
            generation: AtomicU64::new(0),
            latest: RwLock::new(None),
        }
    }

    pub fn from_config(generator: G, config: &AdvisorConfig) -> Self {
        Self::new(generator, config.mode, config.timeout)
    }

    pub fn capability(&self) -> &AdvisorCapability {
        &self.capability
    }

    /// Initialize the external advisor. Safe to call repeatedly.
    pub async fn initialize(&self) -> CapabilityState {
        self.capability.initialize(&self.generator).await
    }

    /// Advisories for a snapshot: external advice when available, otherwise
    /// (or on any failure) the rule-based list.
    pub async fn advise(&self, snapshot: &ReadingSnapshot) -> (AdvisorySource, Vec<Advisory>) {
        if !self.capability.is_available() || !snapshot.is_complete() {
            return (AdvisorySource::Rules, recommend(snapshot));
        }

        match self.consult(snapshot).await {
            Ok(advisory) => (AdvisorySource::External, vec![advisory]),
            Err(e) => {
                tracing::warn!("External advisor failed, using rule-based advice: {}", e);
                (AdvisorySource::Rules, recommend(snapshot))
            }
        }
    }

    /// One round trip to the external advisor
    async fn consult(&self, snapshot: &ReadingSnapshot) -> AdvisorResult<Advisory> {
        let prompt = build_prompt(snapshot)?;
        let raw = tokio::time::timeout(self.timeout, self.generator.generate(&prompt))
            .await
            .map_err(|_| AdvisorError::Timeout(self.timeout))??;
        let advice = parse_advice(&raw, &prompt)?;
        Ok(advice.into_advisory())
    }

    /// Most recently published recommendation
    pub fn latest(&self) -> Option<Recommendation> {
        self.latest
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Generation number of the newest submitted snapshot
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Publish unless a newer snapshot has been submitted since.
    fn publish(&self, recommendation: Recommendation) -> bool {
        let mut latest = self.latest.write().unwrap_or_else(|e| e.into_inner());
        if recommendation.generation != self.current_generation() {
            tracing::debug!(
                "Discarding stale recommendation for generation {}",
                recommendation.generation
            );
            return false;
        }
        *latest = Some(recommendation);
        true
    }

    /// Replace the current snapshot.
    ///
    /// Publishes the rule-based result before returning. When the external
    /// advisor is available a background task consults it and publishes its
    /// answer if this snapshot is still the latest. Must be called from within
    /// a tokio runtime.
    pub fn submit(self: &Arc<Self>, snapshot: ReadingSnapshot) -> Submission {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let recommendation = Recommendation::deterministic(generation, snapshot);
        self.publish(recommendation.clone());

        let pending = if self.capability.is_available() && snapshot.is_complete() {
            let service = Arc::clone(self);
            let plants = recommendation.plants.clone();
            Some(tokio::spawn(async move {
                let (source, advisories) = service.advise(&snapshot).await;
                if source == AdvisorySource::External {
                    service.publish(Recommendation {
                        generation,
                        source,
                        snapshot,
                        advisories,
                        plants,
                    });
                }
            }))
        } else {
            None
        };

        Submission {
            recommendation,
            pending,
        }
    }
}
