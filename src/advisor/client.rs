//! Text-generation client.
//!
//! `TextGenerator` is the seam between the recommendation service and the
//! external model. `HttpTextGenerator` talks to a Hugging Face style inference
//! endpoint; tests substitute scripted generators.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::config::{AdvisorConfig, SamplingParams};
use crate::error::{AdvisorError, AdvisorResult};

/// Prompt used to check that the service answers at all
const WARM_UP_PROMPT: &str = "Reply with the word ready.";

/// Something that turns a prompt into generated text.
pub trait TextGenerator: Send + Sync + 'static {
    /// Prepare the generator (load model, check reachability).
    fn warm_up(&self) -> impl Future<Output = AdvisorResult<()>> + Send;

    /// Generate a completion for `prompt`.
    fn generate(&self, prompt: &str) -> impl Future<Output = AdvisorResult<String>> + Send;
}

// ============================================================================
// Wire Format
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f64,
    top_p: f64,
    repetition_penalty: f64,
    return_full_text: bool,
}

impl From<SamplingParams> for GenerationParameters {
    fn from(p: SamplingParams) -> Self {
        Self {
            max_new_tokens: p.max_new_tokens,
            temperature: p.temperature,
            top_p: p.top_p,
            repetition_penalty: p.repetition_penalty,
            return_full_text: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// Inference servers answer with either a list or a single object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerationResponse {
    Batch(Vec<GeneratedText>),
    Single(GeneratedText),
}

impl GenerationResponse {
    fn into_text(self) -> Option<String> {
        match self {
            GenerationResponse::Batch(items) => items.into_iter().next().map(|g| g.generated_text),
            GenerationResponse::Single(item) => Some(item.generated_text),
        }
    }
}

// ============================================================================
// HTTP Generator
// ============================================================================

/// Generator backed by an HTTP inference endpoint
#[derive(Debug, Clone)]
pub struct HttpTextGenerator {
    client: reqwest::Client,
    url: String,
    api_token: Option<String>,
    sampling: SamplingParams,
}

impl HttpTextGenerator {
    pub fn new(config: &AdvisorConfig) -> AdvisorResult<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            url: config.model_url(),
            api_token: config.api_token.clone(),
            sampling: config.sampling,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request(&self, prompt: &str) -> AdvisorResult<String> {
        let body = GenerationRequest {
            inputs: prompt,
            parameters: self.sampling.into(),
        };

        let mut request = self.client.post(self.url.as_str()).json(&body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::Status(status.as_u16()));
        }

        let parsed: GenerationResponse = response.json().await?;
        parsed
            .into_text()
            .filter(|t| !t.trim().is_empty())
            .ok_or(AdvisorError::EmptyResponse)
    }
}

impl TextGenerator for HttpTextGenerator {
    async fn warm_up(&self) -> AdvisorResult<()> {
        tracing::info!("Probing text generation service at {}", self.url);
        self.request(WARM_UP_PROMPT).await.map(|_| ())
    }

    async fn generate(&self, prompt: &str) -> AdvisorResult<String> {
        self.request(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = GenerationRequest {
            inputs: "hello",
            parameters: SamplingParams::default().into(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["inputs"], "hello");
        assert_eq!(json["parameters"]["max_new_tokens"], 150);
        assert_eq!(json["parameters"]["return_full_text"], false);
        approx::assert_relative_eq!(json["parameters"]["top_p"].as_f64().unwrap(), 0.9);
        approx::assert_relative_eq!(json["parameters"]["repetition_penalty"].as_f64().unwrap(), 1.1);
    }

    #[test]
    fn test_response_shapes() {
        let batch: GenerationResponse =
            serde_json::from_str(r#"[{"generated_text": "Priority: good"}]"#).unwrap();
        assert_eq!(batch.into_text().as_deref(), Some("Priority: good"));

        let single: GenerationResponse =
            serde_json::from_str(r#"{"generated_text": "Title: Hi"}"#).unwrap();
        assert_eq!(single.into_text().as_deref(), Some("Title: Hi"));

        let empty: GenerationResponse = serde_json::from_str("[]").unwrap();
        assert_eq!(empty.into_text(), None);
    }

    #[test]
    fn test_generator_uses_model_url() {
        let config = AdvisorConfig {
            endpoint: "http://127.0.0.1:9/models".to_string(),
            model: "tiny".to_string(),
            ..Default::default()
        };
        let generator = HttpTextGenerator::new(&config).unwrap();
        assert_eq!(generator.url(), "http://127.0.0.1:9/models/tiny");
    }
}
