//! Deterministic recommendation engine.

use crate::snapshot::ReadingSnapshot;

use super::advisory::Advisory;
use super::rules::{no_data_advisory, optimal_advisory, AdvisoryRule, MAX_RULE_ADVISORIES, RULES};

/// Evaluate the rule table against a snapshot.
///
/// Any missing reading short-circuits to a single Critical "No Sensor Data"
/// advisory. Otherwise every matching rule contributes one advisory in table
/// order, capped at [`MAX_RULE_ADVISORIES`]. If nothing fires the result is a
/// single Good advisory.
pub fn recommend(snapshot: &ReadingSnapshot) -> Vec<Advisory> {
    evaluate_rules(snapshot, &RULES)
}

/// Same as [`recommend`] over an arbitrary rule table.
pub fn evaluate_rules(snapshot: &ReadingSnapshot, rules: &[AdvisoryRule]) -> Vec<Advisory> {
    let missing = snapshot.missing_fields();
    if !missing.is_empty() {
        tracing::debug!("Missing readings {:?}, skipping rule evaluation", missing);
        return vec![no_data_advisory(&missing)];
    }

    let mut advisories: Vec<Advisory> = rules
        .iter()
        .filter_map(|rule| {
            let value = snapshot.get(rule.field)?;
            if rule.applies(value) {
                tracing::debug!("Rule {} fired ({} = {})", rule.id, rule.field.key(), value);
                Some(rule.build(value))
            } else {
                None
            }
        })
        .collect();

    if advisories.is_empty() {
        advisories.push(optimal_advisory());
    }

    advisories.truncate(MAX_RULE_ADVISORIES);
    advisories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Status;

    fn healthy() -> ReadingSnapshot {
        ReadingSnapshot::complete(65.4, 24.8, 58.2, 78.9, 12.3, 450.0)
    }

    #[test]
    fn test_healthy_snapshot_yields_single_good() {
        let result = recommend(&healthy());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].severity, Status::Good);
        assert_eq!(result[0].title, "Optimal Conditions");
    }

    #[test]
    fn test_any_absent_field_short_circuits() {
        let snapshot = ReadingSnapshot {
            rain: None,
            soil_moisture: Some(5.0),
            water_level: Some(1.0),
            ..healthy()
        };
        let result = recommend(&snapshot);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].severity, Status::Critical);
        assert_eq!(result[0].title, "No Sensor Data");
    }

    #[test]
    fn test_rules_fire_in_priority_order() {
        let snapshot = ReadingSnapshot {
            soil_moisture: Some(15.0),
            water_level: Some(10.0),
            temperature: Some(38.0),
            ..healthy()
        };
        let titles: Vec<String> = recommend(&snapshot).into_iter().map(|a| a.title).collect();
        assert_eq!(
            titles,
            vec!["Low Soil Moisture", "Low Water Reservoir", "High Temperature"]
        );
    }

    #[test]
    fn test_truncates_to_three() {
        // soil, water, temperature and light all fire
        let snapshot = ReadingSnapshot::complete(10.0, 2.0, 50.0, 5.0, 0.0, 50.0);
        let result = recommend(&snapshot);
        assert_eq!(result.len(), MAX_RULE_ADVISORIES);
        assert!(result.iter().all(|a| a.title != "Insufficient Light"));
    }

    #[test]
    fn test_single_rule() {
        let snapshot = ReadingSnapshot { light: Some(150.0), ..healthy() };
        let result = recommend(&snapshot);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Insufficient Light");
        assert_eq!(result[0].severity, Status::Warning);
    }

    #[test]
    fn test_custom_table() {
        let only_light: Vec<AdvisoryRule> =
            RULES.iter().copied().filter(|r| r.id == "light_low").collect();
        let snapshot = ReadingSnapshot { soil_moisture: Some(5.0), ..healthy() };
        let result = evaluate_rules(&snapshot, &only_light);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].severity, Status::Good);
    }
}
