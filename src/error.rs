//! Errors from the external advisor path.
//!
//! None of these reach the caller of the recommendation service; they are
//! logged and replaced by the deterministic engine's output.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("request to text generation service failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("text generation service returned status {0}")]
    Status(u16),

    #[error("text generation timed out after {0:?}")]
    Timeout(Duration),

    #[error("snapshot is missing readings: {0}")]
    IncompleteSnapshot(String),

    #[error("text generation returned no text")]
    EmptyResponse,

    #[error("could not parse advisor response: {0}")]
    Malformed(String),
}

pub type AdvisorResult<T> = std::result::Result<T, AdvisorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_keeps_sub_second_precision() {
        let err = AdvisorError::Timeout(Duration::from_millis(200));
        assert_eq!(err.to_string(), "text generation timed out after 200ms");
    }
}
