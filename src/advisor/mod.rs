//! External Advisor
//!
//! Optional free-text advice from a text-generation service, always backed by
//! the deterministic recommendation engine. Nothing in this module surfaces
//! an error to the caller: every failure degrades to rule-based advice.
//!
//! ## Architecture
//! - `prompt.rs` - Natural-language briefing built from a snapshot
//! - `parser.rs` - Best-effort parsing of the labeled response lines
//! - `client.rs` - `TextGenerator` seam + HTTP implementation
//! - `capability.rs` - Initialization lifecycle and basic/assisted mode
//! - `service.rs` - Last-result-wins publishing with deterministic fallback

pub mod prompt;
pub mod parser;
pub mod client;
pub mod capability;
pub mod service;

pub use prompt::build_prompt;
pub use parser::{parse_advice, ParsedAdvice, EXTERNAL_CONFIDENCE};
pub use client::{TextGenerator, HttpTextGenerator};
pub use capability::{AdvisorCapability, AdvisorMode, CapabilityState, CapabilityReport};
pub use service::{RecommendationService, Recommendation, Submission};
