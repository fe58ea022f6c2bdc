//! External advisor capability.
//!
//! Tracks the initialization lifecycle of the text-generation service and the
//! user's mode choice. The external path is only taken when the mode is
//! `Assisted` and the lifecycle has reached `Ready`.

use std::str::FromStr;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::error::AdvisorResult;

use super::client::TextGenerator;

/// Initialization lifecycle of the external advisor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum CapabilityState {
    Uninitialized,
    Initializing,
    Ready,
    Failed(String),
}

/// User-selected advice mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisorMode {
    /// Rule-based advice only
    Basic,
    /// Use the external advisor when it is ready
    Assisted,
}

impl FromStr for AdvisorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(AdvisorMode::Basic),
            "assisted" | "ai" => Ok(AdvisorMode::Assisted),
            other => Err(format!("unknown advisor mode '{}'", other)),
        }
    }
}

/// Snapshot of the capability for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityReport {
    pub mode: AdvisorMode,
    #[serde(flatten)]
    pub state: CapabilityState,
    /// True when the external path would be used for the next snapshot
    pub available: bool,
}

#[derive(Debug)]
struct Inner {
    state: CapabilityState,
    mode: AdvisorMode,
}

/// Shared capability object
#[derive(Debug)]
pub struct AdvisorCapability {
    inner: RwLock<Inner>,
}

impl AdvisorCapability {
    pub fn new(mode: AdvisorMode) -> Self {
        Self {
            inner: RwLock::new(Inner {
                state: CapabilityState::Uninitialized,
                mode,
            }),
        }
    }

    // A panic while holding the lock leaves plain data behind, so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn state(&self) -> CapabilityState {
        self.read().state.clone()
    }

    pub fn mode(&self) -> AdvisorMode {
        self.read().mode
    }

    pub fn set_mode(&self, mode: AdvisorMode) {
        let mut inner = self.write();
        if inner.mode != mode {
            tracing::info!("Advisor mode {:?} -> {:?}", inner.mode, mode);
            inner.mode = mode;
        }
    }

    /// Whether the external path may be used right now
    pub fn is_available(&self) -> bool {
        let inner = self.read();
        inner.mode == AdvisorMode::Assisted && inner.state == CapabilityState::Ready
    }

    pub fn report(&self) -> CapabilityReport {
        let inner = self.read();
        CapabilityReport {
            mode: inner.mode,
            state: inner.state.clone(),
            available: inner.mode == AdvisorMode::Assisted && inner.state == CapabilityState::Ready,
        }
    }

    /// Move to `Initializing` if not already initializing or ready.
    /// Returns false when another initialization owns the transition.
    pub fn begin_initialization(&self) -> bool {
        let mut inner = self.write();
        match inner.state {
            CapabilityState::Uninitialized | CapabilityState::Failed(_) => {
                inner.state = CapabilityState::Initializing;
                tracing::info!("Initializing external advisor");
                true
            }
            CapabilityState::Initializing | CapabilityState::Ready => false,
        }
    }

    /// Record the outcome of an initialization started with `begin_initialization`.
    pub fn finish_initialization(&self, outcome: AdvisorResult<()>) {
        let mut inner = self.write();
        if inner.state != CapabilityState::Initializing {
            tracing::debug!("Ignoring initialization outcome in state {:?}", inner.state);
            return;
        }
        inner.state = match outcome {
            Ok(()) => {
                tracing::info!("External advisor ready");
                CapabilityState::Ready
            }
            Err(e) => {
                tracing::warn!("External advisor unavailable: {}", e);
                CapabilityState::Failed(e.to_string())
            }
        };
    }

    /// Run the full lifecycle against a generator. No-op when already
    /// initializing or ready.
    pub async fn initialize<G: TextGenerator>(&self, generator: &G) -> CapabilityState {
        if self.begin_initialization() {
            let outcome = generator.warm_up().await;
            self.finish_initialization(outcome);
        }
        self.state()
    }
}

impl Default for AdvisorCapability {
    fn default() -> Self {
        Self::new(AdvisorMode::Basic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdvisorError;

    #[test]
    fn test_lifecycle_success() {
        let capability = AdvisorCapability::new(AdvisorMode::Assisted);
        assert_eq!(capability.state(), CapabilityState::Uninitialized);
        assert!(!capability.is_available());

        assert!(capability.begin_initialization());
        assert_eq!(capability.state(), CapabilityState::Initializing);
        assert!(!capability.begin_initialization());
        assert!(!capability.is_available());

        capability.finish_initialization(Ok(()));
        assert_eq!(capability.state(), CapabilityState::Ready);
        assert!(capability.is_available());
        assert!(!capability.begin_initialization());
    }

    #[test]
    fn test_failure_allows_retry() {
        let capability = AdvisorCapability::new(AdvisorMode::Assisted);
        assert!(capability.begin_initialization());
        capability.finish_initialization(Err(AdvisorError::Status(503)));
        assert!(matches!(capability.state(), CapabilityState::Failed(reason) if reason.contains("503")));
        assert!(!capability.is_available());
        assert!(capability.begin_initialization());
    }

    #[test]
    fn test_basic_mode_gates_ready_advisor() {
        let capability = AdvisorCapability::new(AdvisorMode::Basic);
        capability.begin_initialization();
        capability.finish_initialization(Ok(()));
        assert!(!capability.is_available());
        capability.set_mode(AdvisorMode::Assisted);
        assert!(capability.is_available());
        assert!(capability.report().available);
    }

    #[test]
    fn test_stray_outcome_ignored() {
        let capability = AdvisorCapability::default();
        capability.finish_initialization(Ok(()));
        assert_eq!(capability.state(), CapabilityState::Uninitialized);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Assisted".parse::<AdvisorMode>(), Ok(AdvisorMode::Assisted));
        assert_eq!(" basic ".parse::<AdvisorMode>(), Ok(AdvisorMode::Basic));
        assert!("turbo".parse::<AdvisorMode>().is_err());
    }

    #[test]
    fn test_report_serialization() {
        let capability = AdvisorCapability::new(AdvisorMode::Assisted);
        capability.begin_initialization();
        capability.finish_initialization(Err(AdvisorError::EmptyResponse));
        let json = serde_json::to_value(capability.report()).unwrap();
        assert_eq!(json["mode"], "assisted");
        assert_eq!(json["state"], "failed");
        assert_eq!(json["available"], false);
        assert!(json["reason"].is_string());
    }
}
