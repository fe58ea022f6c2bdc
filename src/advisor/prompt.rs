//! Prompt construction for the external text-generation service.

use crate::error::{AdvisorError, AdvisorResult};
use crate::recommendations::condition_summary;
use crate::snapshot::{ReadingSnapshot, SensorField};

/// Labels of the requested reply and the placeholder shown after each one
pub const REPLY_FORMAT: [(&str, &str); 4] = [
    ("Priority", "good, warning or critical"),
    ("Title", "a short title"),
    ("Action", "the single most important action"),
    ("Reason", "one sentence explaining why"),
];

/// Build the advisor prompt for a complete snapshot.
///
/// Incomplete snapshots are never sent: a missing reading is handled by the
/// deterministic engine's "No Sensor Data" advisory.
pub fn build_prompt(snapshot: &ReadingSnapshot) -> AdvisorResult<String> {
    let missing = snapshot.missing_fields();
    if !missing.is_empty() {
        let keys: Vec<&str> = missing.iter().map(|f| f.key()).collect();
        return Err(AdvisorError::IncompleteSnapshot(keys.join(", ")));
    }

    let mut lines = Vec::new();
    lines.push("You are an experienced gardener advising on plant care.".to_string());
    lines.push("Current sensor readings:".to_string());
    for field in SensorField::ALL {
        if let Some(value) = snapshot.get(field) {
            lines.push(format!("- {}: {}", field.display_name(), field.format_value(value)));
        }
    }
    lines.push(format!("Detected conditions: {}.", condition_summary(snapshot)));
    lines.push(String::new());
    lines.push("Reply with exactly four lines:".to_string());
    for (label, placeholder) in REPLY_FORMAT {
        lines.push(format!("{}: {}", label, placeholder));
    }

    Ok(lines.join("\n"))
}
