//! Status classification for individual sensor readings.
//!
//! Each field has a fixed threshold table. Critical bands are checked before
//! warning bands, so a value only reaches Good after clearing every cutoff.

use serde::{Deserialize, Serialize};

use crate::snapshot::{ReadingSnapshot, SensorField};

// ============================================================================
// Status
// ============================================================================

/// Three-level status, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Good,
    Warning,
    Critical,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Good => "good",
            Status::Warning => "warning",
            Status::Critical => "critical",
        }
    }

    /// Map a free-text priority word to a status by substring match.
    /// Anything that mentions neither "critical" nor "warning" is Good.
    pub fn from_priority_word(word: &str) -> Self {
        let lower = word.to_lowercase();
        if lower.contains("critical") {
            Status::Critical
        } else if lower.contains("warning") {
            Status::Warning
        } else {
            Status::Good
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Threshold Tables
// ============================================================================

/// Cutoffs for one field. A value strictly below a `_below` cutoff or strictly
/// above an `_above` cutoff falls into that band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldThresholds {
    pub critical_below: Option<f64>,
    pub critical_above: Option<f64>,
    pub warning_below: Option<f64>,
    pub warning_above: Option<f64>,
}

impl FieldThresholds {
    /// Evaluate a present value against this table.
    pub fn evaluate(&self, value: f64) -> Status {
        if self.critical_below.is_some_and(|c| value < c)
            || self.critical_above.is_some_and(|c| value > c)
        {
            Status::Critical
        } else if self.warning_below.is_some_and(|w| value < w)
            || self.warning_above.is_some_and(|w| value > w)
        {
            Status::Warning
        } else {
            Status::Good
        }
    }
}

/// Soil moisture: critical < 20, warning 20-49, good ≥ 50
pub const SOIL_MOISTURE_THRESHOLDS: FieldThresholds = FieldThresholds {
    critical_below: Some(20.0),
    critical_above: None,
    warning_below: Some(50.0),
    warning_above: None,
};

/// Temperature: critical < 5 or > 40, warning 5-9 or 36-40, good 10-35
pub const TEMPERATURE_THRESHOLDS: FieldThresholds = FieldThresholds {
    critical_below: Some(5.0),
    critical_above: Some(40.0),
    warning_below: Some(10.0),
    warning_above: Some(35.0),
};

/// Humidity: critical < 20 or > 90, warning 20-29 or 81-90, good 30-80
pub const HUMIDITY_THRESHOLDS: FieldThresholds = FieldThresholds {
    critical_below: Some(20.0),
    critical_above: Some(90.0),
    warning_below: Some(30.0),
    warning_above: Some(80.0),
};

/// Water level: critical < 20, warning 20-39, good ≥ 40
pub const WATER_LEVEL_THRESHOLDS: FieldThresholds = FieldThresholds {
    critical_below: Some(20.0),
    critical_above: None,
    warning_below: Some(40.0),
    warning_above: None,
};

/// Rain is never critical; heavy rain (> 70) is a warning
pub const RAIN_THRESHOLDS: FieldThresholds = FieldThresholds {
    critical_below: None,
    critical_above: None,
    warning_below: None,
    warning_above: Some(70.0),
};

/// Light: critical < 100, warning 100-199, good ≥ 200
pub const LIGHT_THRESHOLDS: FieldThresholds = FieldThresholds {
    critical_below: Some(100.0),
    critical_above: None,
    warning_below: Some(200.0),
    warning_above: None,
};

/// Threshold table for a field
pub fn thresholds_for(field: SensorField) -> &'static FieldThresholds {
    match field {
        SensorField::SoilMoisture => &SOIL_MOISTURE_THRESHOLDS,
        SensorField::Temperature => &TEMPERATURE_THRESHOLDS,
        SensorField::Humidity => &HUMIDITY_THRESHOLDS,
        SensorField::WaterLevel => &WATER_LEVEL_THRESHOLDS,
        SensorField::Rain => &RAIN_THRESHOLDS,
        SensorField::Light => &LIGHT_THRESHOLDS,
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Classify one reading. Absent (or non-finite) values are always Critical.
pub fn classify(field: SensorField, value: Option<f64>) -> Status {
    match value.filter(|v| v.is_finite()) {
        Some(v) => thresholds_for(field).evaluate(v),
        None => Status::Critical,
    }
}

/// Status of every field of one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldStatuses {
    pub soil_moisture: Status,
    pub temperature: Status,
    pub humidity: Status,
    pub water_level: Status,
    pub rain: Status,
    pub light: Status,
}

impl FieldStatuses {
    pub fn get(&self, field: SensorField) -> Status {
        match field {
            SensorField::SoilMoisture => self.soil_moisture,
            SensorField::Temperature => self.temperature,
            SensorField::Humidity => self.humidity,
            SensorField::WaterLevel => self.water_level,
            SensorField::Rain => self.rain,
            SensorField::Light => self.light,
        }
    }

    /// Worst status across all fields
    pub fn overall(&self) -> Status {
        SensorField::ALL
            .iter()
            .map(|f| self.get(*f))
            .max()
            .unwrap_or(Status::Good)
    }
}

/// Classify every field of a snapshot for display.
pub fn classify_snapshot(snapshot: &ReadingSnapshot) -> FieldStatuses {
    let status = |field| classify(field, snapshot.get(field));
    FieldStatuses {
        soil_moisture: status(SensorField::SoilMoisture),
        temperature: status(SensorField::Temperature),
        humidity: status(SensorField::Humidity),
        water_level: status(SensorField::WaterLevel),
        rain: status(SensorField::Rain),
        light: status(SensorField::Light),
    }
}
