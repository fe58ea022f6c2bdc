//! Garden Advisor
//!
//! Status classification and care recommendations for environmental sensor
//! snapshots (soil moisture, temperature, humidity, water level, rain, light).
//!
//! - `snapshot`: The six-field reading record
//! - `classify`: Per-field Good/Warning/Critical threshold tables
//! - `recommendations`: Ordered advisory rules and plant suitability
//! - `advisor`: Optional external text-generation advice with rule-based fallback
//! - `config`: Environment-driven settings
//! - `api_server`: JSON API (feature `api`)

pub mod snapshot;
pub mod classify;
pub mod recommendations;
pub mod advisor;
pub mod config;
pub mod error;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use snapshot::{ReadingSnapshot, SensorField};
pub use classify::{classify, classify_snapshot, FieldStatuses, Status};
pub use recommendations::{recommend, suitable_plants, Advisory, PlantSuggestions};
pub use advisor::{AdvisorMode, RecommendationService};
pub use config::Config;
pub use error::AdvisorError;

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
