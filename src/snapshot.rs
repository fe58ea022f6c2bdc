//! Reading Snapshot
//!
//! One complete set of the six sensor readings at a point in time. Every field
//! is optional: `None` means no data has arrived for that sensor yet, which is
//! distinct from a reading of zero.

use serde::{Deserialize, Serialize};

/// The six sensor readings of a garden at one point in time.
///
/// JSON shape uses camelCase keys; `null` or a missing key is an absent reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingSnapshot {
    /// Volumetric soil moisture (%)
    #[serde(default)]
    pub soil_moisture: Option<f64>,

    /// Air temperature (°C)
    #[serde(default)]
    pub temperature: Option<f64>,

    /// Relative humidity (%)
    #[serde(default)]
    pub humidity: Option<f64>,

    /// Reservoir fill level (%)
    #[serde(default)]
    pub water_level: Option<f64>,

    /// Rain sensor wetness (%)
    #[serde(default)]
    pub rain: Option<f64>,

    /// Illuminance (lux)
    #[serde(default)]
    pub light: Option<f64>,
}

impl ReadingSnapshot {
    /// Snapshot with every field present.
    pub fn complete(
        soil_moisture: f64,
        temperature: f64,
        humidity: f64,
        water_level: f64,
        rain: f64,
        light: f64,
    ) -> Self {
        Self {
            soil_moisture: Some(soil_moisture),
            temperature: Some(temperature),
            humidity: Some(humidity),
            water_level: Some(water_level),
            rain: Some(rain),
            light: Some(light),
        }
    }

    /// Value of one field. Non-finite numbers count as absent.
    pub fn get(&self, field: SensorField) -> Option<f64> {
        let raw = match field {
            SensorField::SoilMoisture => self.soil_moisture,
            SensorField::Temperature => self.temperature,
            SensorField::Humidity => self.humidity,
            SensorField::WaterLevel => self.water_level,
            SensorField::Rain => self.rain,
            SensorField::Light => self.light,
        };
        raw.filter(|v| v.is_finite())
    }

    /// Fields with no usable reading, in canonical order.
    pub fn missing_fields(&self) -> Vec<SensorField> {
        SensorField::ALL
            .iter()
            .copied()
            .filter(|f| self.get(*f).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        SensorField::ALL.iter().all(|f| self.get(*f).is_some())
    }
}

/// Identity of a sensor field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SensorField {
    SoilMoisture,
    Temperature,
    Humidity,
    WaterLevel,
    Rain,
    Light,
}

impl SensorField {
    /// All fields in display order
    pub const ALL: [SensorField; 6] = [
        SensorField::SoilMoisture,
        SensorField::Temperature,
        SensorField::Humidity,
        SensorField::WaterLevel,
        SensorField::Rain,
        SensorField::Light,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            SensorField::SoilMoisture => "Soil moisture",
            SensorField::Temperature => "Temperature",
            SensorField::Humidity => "Humidity",
            SensorField::WaterLevel => "Water level",
            SensorField::Rain => "Rain",
            SensorField::Light => "Light",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            SensorField::Temperature => "°C",
            SensorField::Light => " lux",
            _ => "%",
        }
    }

    /// Key used in JSON payloads (matches the snapshot's serde names)
    pub fn key(&self) -> &'static str {
        match self {
            SensorField::SoilMoisture => "soilMoisture",
            SensorField::Temperature => "temperature",
            SensorField::Humidity => "humidity",
            SensorField::WaterLevel => "waterLevel",
            SensorField::Rain => "rain",
            SensorField::Light => "light",
        }
    }

    /// Format a value with this field's unit, e.g. "24.8°C" or "450 lux"
    pub fn format_value(&self, value: f64) -> String {
        match self {
            SensorField::Light => format!("{:.0}{}", value, self.unit()),
            _ => format!("{:.1}{}", value, self.unit()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_is_distinct_from_zero() {
        let snapshot = ReadingSnapshot {
            soil_moisture: Some(0.0),
            ..Default::default()
        };
        assert_eq!(snapshot.get(SensorField::SoilMoisture), Some(0.0));
        assert_eq!(snapshot.get(SensorField::Temperature), None);
        assert_eq!(snapshot.missing_fields().len(), 5);
    }

    #[test]
    fn test_non_finite_counts_as_absent() {
        let mut snapshot = ReadingSnapshot::complete(50.0, 20.0, 50.0, 50.0, 0.0, 300.0);
        assert!(snapshot.is_complete());
        snapshot.light = Some(f64::NAN);
        assert!(!snapshot.is_complete());
        assert_eq!(snapshot.missing_fields(), vec![SensorField::Light]);
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{"soilMoisture": 65.4, "temperature": 24.8, "humidity": null, "light": 450}"#;
        let snapshot: ReadingSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.soil_moisture, Some(65.4));
        assert_eq!(snapshot.humidity, None);
        assert_eq!(snapshot.water_level, None);
        assert_eq!(snapshot.light, Some(450.0));

        let value = serde_json::to_value(snapshot).unwrap();
        for field in SensorField::ALL {
            assert!(value.get(field.key()).is_some(), "missing key {}", field.key());
        }
    }

    #[test]
    fn test_format_value() {
        assert_eq!(SensorField::Temperature.format_value(24.83), "24.8°C");
        assert_eq!(SensorField::Light.format_value(450.0), "450 lux");
        assert_eq!(SensorField::SoilMoisture.format_value(65.4), "65.4%");
    }
}
