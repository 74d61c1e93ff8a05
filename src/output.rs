//! Terminal outcome formatting
//!
//! Every run ends with exactly one summary line: green for success,
//! red for an aborted cycle, cyan for check-only findings.

use crate::domain::UpdateOutcome;
use colored::Colorize;

/// Format the summary line for a completed cycle
pub fn outcome_line(outcome: &UpdateOutcome) -> String {
    match outcome {
        UpdateOutcome::UpToDate { version } => format!(
            "You already have the latest available driver ({})",
            version
        )
        .green()
        .to_string(),
        UpdateOutcome::Downloaded {
            version,
            path,
            bytes,
            ..
        } => format!(
            "Download ended successfully: {} ({} bytes) -> {}",
            version,
            bytes,
            path.display()
        )
        .green()
        .to_string(),
        UpdateOutcome::UpdateAvailable {
            previous,
            version,
            path,
        } => {
            let from = previous
                .as_ref()
                .map(|v| v.to_string())
                .unwrap_or_else(|| "none".to_string());
            format!(
                "Update available: {} -> {} (would download to {})",
                from,
                version,
                path.display()
            )
            .cyan()
            .to_string()
        }
    }
}

/// Format the summary line for an aborted cycle
pub fn failure_line(error: &impl std::fmt::Display) -> String {
    format!("Update aborted: {}", error).red().to_string()
}
