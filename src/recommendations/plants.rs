//! Plant suitability suggestions.
//!
//! Independent, non-exclusive membership rules over temperature, light,
//! humidity and soil moisture. Matching sets accumulate in rule order, then
//! duplicates are dropped and the list is capped.

use serde::{Deserialize, Serialize};

use crate::snapshot::{ReadingSnapshot, SensorField};

/// Maximum number of suggested plants
pub const MAX_PLANT_SUGGESTIONS: usize = 8;

/// Returned instead of a list when a required reading is missing
pub const INSUFFICIENT_DATA_MESSAGE: &str = "Insufficient sensor data for plant suggestions";

/// Suggested when no membership rule matches
const HARDY_DEFAULTS: &[&str] = &["Marigolds", "Sunflowers", "Zinnias"];

/// Readings used by the plant rules, all guaranteed present
#[derive(Debug, Clone, Copy)]
pub struct GrowingConditions {
    pub temperature: f64,
    pub light: f64,
    pub humidity: f64,
    pub soil_moisture: f64,
}

impl GrowingConditions {
    /// None if any required reading is missing
    pub fn from_snapshot(snapshot: &ReadingSnapshot) -> Option<Self> {
        Some(Self {
            temperature: snapshot.get(SensorField::Temperature)?,
            light: snapshot.get(SensorField::Light)?,
            humidity: snapshot.get(SensorField::Humidity)?,
            soil_moisture: snapshot.get(SensorField::SoilMoisture)?,
        })
    }
}

/// One membership rule: a named plant group and its condition.
#[derive(Debug, Clone, Copy)]
pub struct PlantGroup {
    pub name: &'static str,
    pub matches: fn(&GrowingConditions) -> bool,
    pub plants: &'static [&'static str],
}

fn warm_bright_moist(c: &GrowingConditions) -> bool {
    (20.0..=30.0).contains(&c.temperature)
        && c.light > 500.0
        && (40.0..=80.0).contains(&c.soil_moisture)
}

fn cool_season(c: &GrowingConditions) -> bool {
    (10.0..20.0).contains(&c.temperature) && c.soil_moisture >= 40.0
}

fn humid(c: &GrowingConditions) -> bool {
    c.humidity > 60.0
}

fn low_light(c: &GrowingConditions) -> bool {
    c.light <= 200.0
}

fn wet_soil(c: &GrowingConditions) -> bool {
    c.soil_moisture > 70.0
}

fn dry_soil(c: &GrowingConditions) -> bool {
    c.soil_moisture < 40.0
}

fn hot(c: &GrowingConditions) -> bool {
    c.temperature > 30.0
}

/// Plant groups in evaluation order
pub const PLANT_GROUPS: [PlantGroup; 7] = [
    PlantGroup {
        name: "warm_season_vegetables",
        matches: warm_bright_moist,
        plants: &["Tomatoes", "Peppers", "Basil", "Cucumbers"],
    },
    PlantGroup {
        name: "cool_season_greens",
        matches: cool_season,
        plants: &["Lettuce", "Spinach", "Kale", "Peas"],
    },
    PlantGroup {
        name: "tropical",
        matches: humid,
        plants: &["Ferns", "Peace Lily", "Calathea", "Monstera"],
    },
    PlantGroup {
        name: "low_light",
        matches: low_light,
        plants: &["Snake Plant", "ZZ Plant", "Pothos", "Cast Iron Plant"],
    },
    PlantGroup {
        name: "wet_tolerant",
        matches: wet_soil,
        plants: &["Watercress", "Mint", "Taro", "Rice"],
    },
    PlantGroup {
        name: "drought_tolerant",
        matches: dry_soil,
        plants: &["Succulents", "Cacti", "Lavender", "Rosemary"],
    },
    PlantGroup {
        name: "heat_loving",
        matches: hot,
        plants: &["Okra", "Sweet Potatoes", "Eggplant"],
    },
];

/// Result of a plant suggestion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PlantSuggestions {
    Plants(Vec<String>),
    InsufficientData(String),
}

impl PlantSuggestions {
    /// Suggested plants, empty for the sentinel
    pub fn plants(&self) -> &[String] {
        match self {
            PlantSuggestions::Plants(list) => list,
            PlantSuggestions::InsufficientData(_) => &[],
        }
    }

    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, PlantSuggestions::InsufficientData(_))
    }
}

/// Suggest plants suited to the current readings.
pub fn suitable_plants(snapshot: &ReadingSnapshot) -> PlantSuggestions {
    let conditions = match GrowingConditions::from_snapshot(snapshot) {
        Some(c) => c,
        None => return PlantSuggestions::InsufficientData(INSUFFICIENT_DATA_MESSAGE.to_string()),
    };

    let mut plants: Vec<String> = Vec::with_capacity(MAX_PLANT_SUGGESTIONS);
    for group in PLANT_GROUPS.iter().filter(|g| (g.matches)(&conditions)) {
        tracing::debug!("Plant group {} matched", group.name);
        for plant in group.plants {
            if !plants.iter().any(|p| p == plant) {
                plants.push((*plant).to_string());
            }
        }
    }

    if plants.is_empty() {
        plants.extend(HARDY_DEFAULTS.iter().map(|p| p.to_string()));
    }

    plants.truncate(MAX_PLANT_SUGGESTIONS);
    PlantSuggestions::Plants(plants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn snapshot(temperature: f64, light: f64, soil_moisture: f64, humidity: f64) -> ReadingSnapshot {
        ReadingSnapshot {
            temperature: Some(temperature),
            light: Some(light),
            soil_moisture: Some(soil_moisture),
            humidity: Some(humidity),
            water_level: None,
            rain: None,
        }
    }

    #[test]
    fn test_warm_bright_moist_includes_vegetables() {
        let result = suitable_plants(&snapshot(25.0, 600.0, 55.0, 50.0));
        let plants = result.plants();
        for expected in ["Tomatoes", "Peppers", "Basil", "Cucumbers"] {
            assert!(plants.iter().any(|p| p == expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_water_level_and_rain_not_required() {
        let result = suitable_plants(&snapshot(25.0, 600.0, 55.0, 50.0));
        assert!(!result.is_insufficient_data());
    }

    #[test]
    fn test_missing_required_field_returns_sentinel() {
        let mut s = snapshot(25.0, 600.0, 55.0, 50.0);
        s.humidity = None;
        assert_eq!(
            suitable_plants(&s),
            PlantSuggestions::InsufficientData(INSUFFICIENT_DATA_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_capped_and_unique() {
        // humid, dark, wet and hot all match: 4 + 4 + 4 + 3 candidates
        let result = suitable_plants(&snapshot(33.0, 100.0, 90.0, 85.0));
        let plants = result.plants();
        assert_eq!(plants.len(), MAX_PLANT_SUGGESTIONS);
        let unique: HashSet<&String> = plants.iter().collect();
        assert_eq!(unique.len(), plants.len());
        assert_eq!(plants[0], "Ferns");
    }

    #[test]
    fn test_first_seen_order() {
        // warm vegetables then tropical
        let result = suitable_plants(&snapshot(25.0, 600.0, 55.0, 70.0));
        let plants = result.plants();
        assert_eq!(plants[0], "Tomatoes");
        assert_eq!(plants[4], "Ferns");
    }

    #[test]
    fn test_no_match_falls_back_to_hardy_defaults() {
        // mild, moderately bright, mid moisture, mid humidity
        let result = suitable_plants(&snapshot(25.0, 400.0, 50.0, 50.0));
        assert_eq!(result.plants(), &["Marigolds", "Sunflowers", "Zinnias"]);
    }
}
