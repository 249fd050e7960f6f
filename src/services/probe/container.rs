//! Container-level duration probe

use super::{DurationProbe, Ffprobe, ProbeError, parse_seconds};
use std::path::Path;

const FORMAT_DURATION_ARGS: [&str; 6] = [
    "-v",
    "error",
    "-show_entries",
    "format=duration",
    "-of",
    "default=noprint_wrappers=1:nokey=1",
];

/// Reads the container duration, printed by ffprobe as bare seconds
#[derive(Debug, Clone, Default)]
pub struct FormatProbe {
    ffprobe: Ffprobe,
}

impl FormatProbe {
    #[must_use]
    pub fn new(ffprobe: Ffprobe) -> Self {
        Self { ffprobe }
    }
}

impl DurationProbe for FormatProbe {
    fn name(&self) -> &'static str {
        "format"
    }

    fn probe(&self, path: &Path) -> Result<f64, ProbeError> {
        let stdout = self.ffprobe.run(&FORMAT_DURATION_ARGS, path)?;
        let text = String::from_utf8(stdout).map_err(|e| ProbeError::Malformed(e.to_string()))?;

        // ffprobe prints "N/A" when the container carries no duration
        let raw = text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && *line != "N/A")
            .ok_or(ProbeError::MissingDuration)?;

        parse_seconds(raw)
    }
}
