//! Advisory records produced by the recommendation engine and the external advisor.

use serde::{Deserialize, Serialize};

use crate::classify::Status;

/// One piece of actionable guidance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    /// Good is used for positive feedback
    pub severity: Status,
    pub title: String,
    pub message: String,
    pub action: String,
    /// Static per-rule annotation in [0, 1], not a statistical estimate
    pub confidence: f64,
}

impl Advisory {
    pub fn new(
        severity: Status,
        title: impl Into<String>,
        message: impl Into<String>,
        action: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            severity,
            title: title.into(),
            message: message.into(),
            action: action.into(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// Which path produced a set of advisories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisorySource {
    /// Deterministic rule table
    Rules,
    /// External text-generation service
    External,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_is_clamped() {
        let a = Advisory::new(Status::Good, "t", "m", "a", 1.7);
        assert_eq!(a.confidence, 1.0);
        let b = Advisory::new(Status::Good, "t", "m", "a", -0.2);
        assert_eq!(b.confidence, 0.0);
    }

    #[test]
    fn test_serialized_severity_is_lowercase() {
        let a = Advisory::new(Status::Critical, "t", "m", "a", 0.9);
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["severity"], "critical");
    }
}
