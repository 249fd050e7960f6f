//! Data models for measurement reports

use crate::services::format::format_duration;
use serde::{Deserialize, Serialize};

/// Final report of a measurement run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_seconds: f64,
    pub formatted_time: String,
    pub skipped_files: usize,
    pub total_files: usize,
    /// Files whose duration could not be read, in scan order.
    #[serde(skip)]
    pub skipped: Vec<SkippedFile>,
}

impl Summary {
    /// Build a summary from the accumulated total and the skipped files.
    #[must_use]
    pub fn new(total_seconds: f64, total_files: usize, skipped: Vec<SkippedFile>) -> Self {
        debug_assert!(skipped.len() <= total_files);
        Self {
            total_seconds,
            formatted_time: format_duration(total_seconds),
            skipped_files: skipped.len(),
            total_files,
            skipped,
        }
    }

    /// Number of files whose duration contributed to the total.
    #[must_use]
    pub fn measured_files(&self) -> usize {
        self.total_files - self.skipped_files
    }
}

/// A file whose duration could not be determined
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}
