//! Runtime configuration from environment variables.
//!
//! Read once at startup. Unparseable values fall back to their defaults with a
//! warning so a typo never prevents the deterministic engine from running.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::advisor::AdvisorMode;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ENDPOINT: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_MODEL: &str = "gpt2";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Fixed sampling parameters sent with every generation request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub max_new_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub repetition_penalty: f64,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            max_new_tokens: 150,
            temperature: 0.7,
            top_p: 0.9,
            repetition_penalty: 1.1,
        }
    }
}

/// Settings for the external text-generation service
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    /// Mode selected at startup
    pub mode: AdvisorMode,
    /// Base URL; the model name is appended as a path segment
    pub endpoint: String,
    pub model: String,
    pub api_token: Option<String>,
    pub timeout: Duration,
    pub sampling: SamplingParams,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            mode: AdvisorMode::Basic,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            sampling: SamplingParams::default(),
        }
    }
}

impl AdvisorConfig {
    /// Full URL of the generation endpoint
    pub fn model_url(&self) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), self.model)
    }
}

/// Top-level configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server listen port
    pub port: u16,
    pub advisor: AdvisorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            advisor: AdvisorConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, test map, ...)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AdvisorConfig::default();
        let sampling = SamplingParams {
            max_new_tokens: parse_or(&lookup, "ADVISOR_MAX_NEW_TOKENS", defaults.sampling.max_new_tokens),
            temperature: parse_or(&lookup, "ADVISOR_TEMPERATURE", defaults.sampling.temperature),
            top_p: parse_or(&lookup, "ADVISOR_TOP_P", defaults.sampling.top_p),
            repetition_penalty: parse_or(
                &lookup,
                "ADVISOR_REPETITION_PENALTY",
                defaults.sampling.repetition_penalty,
            ),
        };

        let advisor = AdvisorConfig {
            mode: parse_or(&lookup, "ADVISOR_MODE", defaults.mode),
            endpoint: lookup("ADVISOR_ENDPOINT").unwrap_or(defaults.endpoint),
            model: lookup("ADVISOR_MODEL").unwrap_or(defaults.model),
            api_token: lookup("ADVISOR_API_TOKEN").filter(|t| !t.trim().is_empty()),
            timeout: Duration::from_secs(parse_or(&lookup, "ADVISOR_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)),
            sampling,
        };

        Self {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT),
            advisor,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Ignoring invalid {}={:?}, using default", key, raw);
                default
            }
        },
        None => default,
    }
}
