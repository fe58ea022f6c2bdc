//! Ordered advisory rule table.
//!
//! Each rule tests one field against a fixed cutoff and, when it holds, builds
//! one advisory. Table order is priority order: soil moisture, water level,
//! temperature, light. The absence check and the all-clear advisory live next
//! to the table because they are not tied to a single field.

use crate::classify::Status;
use crate::snapshot::SensorField;

use super::advisory::Advisory;

// ============================================================================
// Cutoffs
// ============================================================================

pub const SOIL_DRY_BELOW: f64 = 30.0;
pub const SOIL_WET_ABOVE: f64 = 80.0;
pub const WATER_LOW_BELOW: f64 = 20.0;
pub const TEMP_HIGH_ABOVE: f64 = 35.0;
pub const TEMP_LOW_BELOW: f64 = 10.0;
pub const LIGHT_LOW_BELOW: f64 = 200.0;

/// Maximum number of advisories returned by the rule path
pub const MAX_RULE_ADVISORIES: usize = 3;

// ============================================================================
// Rule Table
// ============================================================================

/// A (predicate, advisory-builder) pair over one field's value.
#[derive(Debug, Clone, Copy)]
pub struct AdvisoryRule {
    /// Stable identifier, used in logs and tests
    pub id: &'static str,
    pub field: SensorField,
    pub predicate: fn(f64) -> bool,
    pub severity: Status,
    pub title: &'static str,
    pub action: &'static str,
    pub confidence: f64,
    pub message: fn(f64) -> String,
}

impl AdvisoryRule {
    pub fn applies(&self, value: f64) -> bool {
        (self.predicate)(value)
    }

    pub fn build(&self, value: f64) -> Advisory {
        Advisory::new(
            self.severity,
            self.title,
            (self.message)(value),
            self.action,
            self.confidence,
        )
    }
}

fn soil_dry(v: f64) -> bool {
    v < SOIL_DRY_BELOW
}

fn soil_wet(v: f64) -> bool {
    v > SOIL_WET_ABOVE
}

fn water_low(v: f64) -> bool {
    v < WATER_LOW_BELOW
}

fn temp_high(v: f64) -> bool {
    v > TEMP_HIGH_ABOVE
}

fn temp_low(v: f64) -> bool {
    v < TEMP_LOW_BELOW
}

fn light_low(v: f64) -> bool {
    v < LIGHT_LOW_BELOW
}

fn soil_dry_message(v: f64) -> String {
    format!("Soil moisture is at {:.1}%, below the healthy range for most plants.", v)
}

fn soil_wet_message(v: f64) -> String {
    format!("Soil moisture is at {:.1}%. Waterlogged soil can cause root rot.", v)
}

fn water_low_message(v: f64) -> String {
    format!("Water reservoir is at {:.1}%. Irrigation may stop soon.", v)
}

fn temp_high_message(v: f64) -> String {
    format!("Temperature is {:.1}°C. Plants may suffer heat stress.", v)
}

fn temp_low_message(v: f64) -> String {
    format!("Temperature is {:.1}°C. Growth slows and frost-sensitive plants are at risk.", v)
}

fn light_low_message(v: f64) -> String {
    format!("Light level is {:.0} lux, too low for healthy photosynthesis.", v)
}

/// Field rules in priority order
pub const RULES: [AdvisoryRule; 6] = [
    AdvisoryRule {
        id: "soil_dry",
        field: SensorField::SoilMoisture,
        predicate: soil_dry,
        severity: Status::Critical,
        title: "Low Soil Moisture",
        action: "Water your plants immediately",
        confidence: 0.90,
        message: soil_dry_message,
    },
    AdvisoryRule {
        id: "soil_wet",
        field: SensorField::SoilMoisture,
        predicate: soil_wet,
        severity: Status::Warning,
        title: "Overwatering Risk",
        action: "Pause watering and improve drainage",
        confidence: 0.85,
        message: soil_wet_message,
    },
    AdvisoryRule {
        id: "water_low",
        field: SensorField::WaterLevel,
        predicate: water_low,
        severity: Status::Critical,
        title: "Low Water Reservoir",
        action: "Refill the water tank",
        confidence: 0.95,
        message: water_low_message,
    },
    AdvisoryRule {
        id: "temp_high",
        field: SensorField::Temperature,
        predicate: temp_high,
        severity: Status::Warning,
        title: "High Temperature",
        action: "Provide shade and increase ventilation",
        confidence: 0.80,
        message: temp_high_message,
    },
    AdvisoryRule {
        id: "temp_low",
        field: SensorField::Temperature,
        predicate: temp_low,
        severity: Status::Warning,
        title: "Low Temperature",
        action: "Protect plants from cold or move them indoors",
        confidence: 0.80,
        message: temp_low_message,
    },
    AdvisoryRule {
        id: "light_low",
        field: SensorField::Light,
        predicate: light_low,
        severity: Status::Warning,
        title: "Insufficient Light",
        action: "Move plants to a brighter spot or add grow lights",
        confidence: 0.75,
        message: light_low_message,
    },
];

// ============================================================================
// Non-field Advisories
// ============================================================================

/// Emitted alone when any reading is missing
pub fn no_data_advisory(missing: &[SensorField]) -> Advisory {
    let names: Vec<&str> = missing.iter().map(|f| f.display_name()).collect();
    let message = if names.is_empty() {
        "Sensor readings are unavailable.".to_string()
    } else {
        format!("No readings available for: {}.", names.join(", "))
    };
    Advisory::new(
        Status::Critical,
        "No Sensor Data",
        message,
        "Check sensor connections and wait for fresh readings",
        0.95,
    )
}

/// Emitted when no field rule fires
pub fn optimal_advisory() -> Advisory {
    Advisory::new(
        Status::Good,
        "Optimal Conditions",
        "All sensor readings are within healthy ranges.",
        "Continue your current care routine",
        0.90,
    )
}
