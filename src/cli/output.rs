//! Output formatting for CLI

use crate::Summary;

/// Skipped files listed individually before the rest are elided
pub const SKIPPED_PREVIEW: usize = 5;

/// Format the report as human-readable text
#[must_use]
pub fn format_text(summary: &Summary) -> String {
    let mut out = String::new();
    out.push_str(&format!("Total time:    {}\n", summary.formatted_time));
    out.push_str(&format!("Total seconds: {}\n", summary.total_seconds));
    out.push_str(&format!(
        "Files:         {} measured, {} skipped, {} total",
        summary.measured_files(),
        summary.skipped_files,
        summary.total_files
    ));
    out
}

/// Format the report as pretty JSON (`totalSeconds`, `formattedTime`, `skippedFiles`, `totalFiles`)
#[must_use]
pub fn format_json(summary: &Summary) -> String {
    serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string())
}

/// Lines describing skipped files, truncated after `limit` entries
#[must_use]
pub fn format_skipped(summary: &Summary, limit: usize) -> Vec<String> {
    if summary.skipped.is_empty() {
        return Vec::new();
    }

    let mut lines = vec![format!("Skipped files: {}", summary.skipped.len())];
    lines.extend(
        summary
            .skipped
            .iter()
            .take(limit)
            .map(|skipped| format!("  {}: {}", skipped.path, skipped.reason)),
    );
    if summary.skipped.len() > limit {
        lines.push(format!("  ... and {} more", summary.skipped.len() - limit));
    }
    lines
}
