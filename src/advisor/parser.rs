//! Best-effort parsing of free-text advisor responses.
//!
//! The service is asked for four labeled lines (`Priority:`, `Title:`,
//! `Action:`, `Reason:`). Models rarely comply exactly, so labels are matched
//! case-insensitively, markdown decoration is ignored and any missing label
//! gets a safe default. Lines that repeat the prompt's placeholders are
//! skipped. A response with none of the labels is rejected.

use crate::classify::Status;
use crate::error::{AdvisorError, AdvisorResult};
use crate::recommendations::Advisory;

use super::prompt::REPLY_FORMAT;

/// Confidence annotation for externally generated advice
pub const EXTERNAL_CONFIDENCE: f64 = 0.85;

pub const DEFAULT_PRIORITY: &str = "good";
pub const DEFAULT_TITLE: &str = "Plant Care Advice";
pub const DEFAULT_ACTION: &str = "Continue monitoring your plants";
pub const DEFAULT_REASON: &str = "Based on current sensor readings";

/// The four labeled fields of an advisor response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAdvice {
    pub priority: String,
    pub title: String,
    pub action: String,
    pub reason: String,
}

impl ParsedAdvice {
    pub fn severity(&self) -> Status {
        Status::from_priority_word(&self.priority)
    }

    pub fn into_advisory(self) -> Advisory {
        Advisory::new(
            self.severity(),
            self.title,
            self.reason,
            self.action,
            EXTERNAL_CONFIDENCE,
        )
    }
}

/// Parse a raw response. `prompt` is stripped if the service echoed it back.
pub fn parse_advice(raw: &str, prompt: &str) -> AdvisorResult<ParsedAdvice> {
    let raw = raw.trim_start();
    let text = raw.strip_prefix(prompt.trim()).unwrap_or(raw).trim();
    if text.is_empty() {
        return Err(AdvisorError::EmptyResponse);
    }

    let mut priority = None;
    let mut title = None;
    let mut action = None;
    let mut reason = None;

    for line in text.lines() {
        let Some((label, value)) = split_labeled_line(line) else {
            continue;
        };
        if is_placeholder(&label, &value) {
            continue;
        }
        let slot = match label.as_str() {
            "priority" => &mut priority,
            "title" => &mut title,
            "action" => &mut action,
            "reason" => &mut reason,
            _ => continue,
        };
        // First occurrence wins
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    if priority.is_none() && title.is_none() && action.is_none() && reason.is_none() {
        return Err(AdvisorError::Malformed(
            "no Priority/Title/Action/Reason lines found".to_string(),
        ));
    }

    Ok(ParsedAdvice {
        priority: priority.unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
        title: title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        action: action.unwrap_or_else(|| DEFAULT_ACTION.to_string()),
        reason: reason.unwrap_or_else(|| DEFAULT_REASON.to_string()),
    })
}

/// True for a line copied from the reply format, e.g. "Title: a short title"
fn is_placeholder(label: &str, value: &str) -> bool {
    REPLY_FORMAT
        .iter()
        .any(|(l, p)| l.eq_ignore_ascii_case(label) && p.eq_ignore_ascii_case(value))
}

/// Split "- **Title:** Water now" into ("title", "Water now").
/// Returns None for unlabeled lines or empty values.
fn split_labeled_line(line: &str) -> Option<(String, String)> {
    let trimmed = line
        .trim()
        .trim_start_matches(|c: char| c == '-' || c == '*' || c == '#' || c == '>' || c.is_whitespace());
    let (label, value) = trimmed.split_once(':')?;

    let label = label.trim().trim_matches('*').trim().to_lowercase();
    let value = value.trim().trim_matches('*').trim();
    if label.is_empty() || value.is_empty() {
        return None;
    }
    Some((label, value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_response() {
        let raw = "Priority: warning\nTitle: Heat Stress\nAction: Add shade cloth\nReason: Temperature is above 35°C";
        let advice = parse_advice(raw, "").unwrap();
        assert_eq!(advice.severity(), Status::Warning);
        assert_eq!(advice.title, "Heat Stress");

        let advisory = advice.into_advisory();
        assert_eq!(advisory.action, "Add shade cloth");
        assert_eq!(advisory.message, "Temperature is above 35°C");
        approx::assert_relative_eq!(advisory.confidence, EXTERNAL_CONFIDENCE);
    }

    #[test]
    fn test_markdown_and_case_tolerated() {
        let raw = "Here is my advice:\n- **PRIORITY:** Critical!\n* **title**: Dry Soil\n";
        let advice = parse_advice(raw, "").unwrap();
        assert_eq!(advice.severity(), Status::Critical);
        assert_eq!(advice.title, "Dry Soil");
        assert_eq!(advice.action, DEFAULT_ACTION);
        assert_eq!(advice.reason, DEFAULT_REASON);
    }

    #[test]
    fn test_echoed_prompt_is_stripped() {
        let prompt = "Reply with:\nPriority: good, warning or critical";
        let raw = format!("{}\nPriority: warning\nTitle: Low Light", prompt);
        let advice = parse_advice(&raw, prompt).unwrap();
        assert_eq!(advice.priority, "warning");
    }

    #[test]
    fn test_repeated_format_lines_skipped() {
        let raw = "Sure.\nPriority: good, warning or critical\nTitle: a short title\n\
                   Action: the single most important action\nReason: one sentence explaining why\n\
                   Priority: good\nTitle: All Fine";
        let advice = parse_advice(raw, "").unwrap();
        assert_eq!(advice.severity(), Status::Good);
        assert_eq!(advice.title, "All Fine");
        assert_eq!(advice.action, DEFAULT_ACTION);
    }

    #[test]
    fn test_echo_after_leading_whitespace_stripped() {
        let snapshot = crate::snapshot::ReadingSnapshot::complete(65.4, 24.8, 58.2, 78.9, 12.3, 450.0);
        let prompt = crate::advisor::build_prompt(&snapshot).unwrap();
        let raw = format!("\n{}\nPriority: good\nTitle: Fine", prompt);
        let advice = parse_advice(&raw, &prompt).unwrap();
        assert_eq!(advice.severity(), Status::Good);
        assert_eq!(advice.title, "Fine");
    }

    #[test]
    fn test_format_lines_alone_rejected() {
        let raw = "Priority: good, warning or critical\nTitle: a short title\n\
                   Action: the single most important action\nReason: one sentence explaining why";
        assert!(matches!(parse_advice(raw, ""), Err(AdvisorError::Malformed(_))));
    }

    #[test]
    fn test_missing_priority_defaults_to_good() {
        let advice = parse_advice("Title: All Fine", "").unwrap();
        assert_eq!(advice.severity(), Status::Good);
    }

    #[test]
    fn test_empty_response_rejected() {
        assert!(matches!(parse_advice("   \n ", ""), Err(AdvisorError::EmptyResponse)));
    }

    #[test]
    fn test_unlabeled_response_rejected() {
        let raw = "Your plants look great, keep it up and water them on weekends.";
        assert!(matches!(parse_advice(raw, ""), Err(AdvisorError::Malformed(_))));
    }

    #[test]
    fn test_first_label_wins() {
        let advice = parse_advice("Title: First\nTitle: Second", "").unwrap();
        assert_eq!(advice.title, "First");
    }
}
