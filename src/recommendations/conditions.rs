//! Free-text condition phrases summarising a snapshot.

use crate::classify::{HUMIDITY_THRESHOLDS, RAIN_THRESHOLDS};
use crate::snapshot::{ReadingSnapshot, SensorField};

use super::rules::{
    LIGHT_LOW_BELOW, SOIL_DRY_BELOW, SOIL_WET_ABOVE, TEMP_HIGH_ABOVE, TEMP_LOW_BELOW,
    WATER_LOW_BELOW,
};

/// Used when no condition matches
pub const OPTIMAL_PHRASE: &str = "optimal conditions";

/// (field, predicate, phrase) in reporting order
const CONDITIONS: &[(SensorField, fn(f64) -> bool, &str)] = &[
    (SensorField::SoilMoisture, |v| v < SOIL_DRY_BELOW, "low soil moisture"),
    (SensorField::SoilMoisture, |v| v > SOIL_WET_ABOVE, "waterlogged soil"),
    (SensorField::WaterLevel, |v| v < WATER_LOW_BELOW, "low water reservoir"),
    (SensorField::Temperature, |v| v > TEMP_HIGH_ABOVE, "high temperature"),
    (SensorField::Temperature, |v| v < TEMP_LOW_BELOW, "low temperature"),
    (SensorField::Humidity, humidity_low, "low humidity"),
    (SensorField::Humidity, humidity_high, "high humidity"),
    (SensorField::Rain, heavy_rain, "heavy rain"),
    (SensorField::Light, |v| v < LIGHT_LOW_BELOW, "low light"),
];

fn humidity_low(v: f64) -> bool {
    HUMIDITY_THRESHOLDS.warning_below.is_some_and(|w| v < w)
}

fn humidity_high(v: f64) -> bool {
    HUMIDITY_THRESHOLDS.warning_above.is_some_and(|w| v > w)
}

fn heavy_rain(v: f64) -> bool {
    RAIN_THRESHOLDS.warning_above.is_some_and(|w| v > w)
}

/// Matched condition phrases in reporting order. Absent fields contribute nothing.
pub fn condition_phrases(snapshot: &ReadingSnapshot) -> Vec<&'static str> {
    CONDITIONS
        .iter()
        .filter(|(field, predicate, _)| snapshot.get(*field).is_some_and(predicate))
        .map(|(_, _, phrase)| *phrase)
        .collect()
}

/// Comma-joined condition phrases, or "optimal conditions" when none match.
pub fn condition_summary(snapshot: &ReadingSnapshot) -> String {
    let phrases = condition_phrases(snapshot);
    if phrases.is_empty() {
        OPTIMAL_PHRASE.to_string()
    } else {
        phrases.join(", ")
    }
}
