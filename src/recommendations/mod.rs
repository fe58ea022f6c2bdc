//! Recommendation Engine
//!
//! Scans a full reading snapshot and produces prioritized care advisories plus
//! a list of plants suited to the current conditions.
//!
//! ## Architecture
//! - `advisory.rs` - Advisory record and its source
//! - `rules.rs` - Ordered (predicate, builder) rule table and fixed cutoffs
//! - `engine.rs` - Rule evaluation with absence short-circuit and truncation
//! - `plants.rs` - Non-exclusive plant group membership rules
//! - `conditions.rs` - Condition phrases used to brief the external advisor

pub mod advisory;
pub mod rules;
pub mod engine;
pub mod plants;
pub mod conditions;

pub use advisory::{Advisory, AdvisorySource};
pub use rules::{AdvisoryRule, RULES, MAX_RULE_ADVISORIES};
pub use engine::{recommend, evaluate_rules};
pub use plants::{suitable_plants, PlantSuggestions, MAX_PLANT_SUGGESTIONS, INSUFFICIENT_DATA_MESSAGE};
pub use conditions::{condition_phrases, condition_summary};
