//! Stream-metadata duration probe

use super::{DurationProbe, Ffprobe, ProbeError, parse_seconds};
use crate::services::format::parse_clock_duration;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const SHOW_STREAMS_ARGS: [&str; 5] = ["-v", "error", "-print_format", "json", "-show_streams"];

/// Tag holding the duration in Matroska and similar containers
pub const DURATION_TAG: &str = "DURATION";

/// Subset of `ffprobe -show_streams` JSON output
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamReport {
    #[serde(default)]
    pub streams: Vec<StreamInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamInfo {
    pub index: Option<u32>,
    pub codec_type: Option<String>,
    pub duration: Option<String>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

impl StreamInfo {
    /// Raw duration value: the `duration` field, else the `DURATION` tag.
    #[must_use]
    pub fn raw_duration(&self) -> Option<&str> {
        self.duration
            .as_deref()
            .or_else(|| self.tags.get(DURATION_TAG).map(String::as_str))
    }
}

/// Reads the first stream's duration from ffprobe's stream report
#[derive(Debug, Clone, Default)]
pub struct StreamProbe {
    ffprobe: Ffprobe,
}

impl StreamProbe {
    #[must_use]
    pub fn new(ffprobe: Ffprobe) -> Self {
        Self { ffprobe }
    }
}

impl DurationProbe for StreamProbe {
    fn name(&self) -> &'static str {
        "streams"
    }

    fn probe(&self, path: &Path) -> Result<f64, ProbeError> {
        let stdout = self.ffprobe.run(&SHOW_STREAMS_ARGS, path)?;
        let report: StreamReport =
            serde_json::from_slice(&stdout).map_err(|e| ProbeError::Malformed(e.to_string()))?;
        duration_from_report(&report, path)
    }
}

/// Extract the duration in seconds for `path` from a stream report
///
/// `.mkv` values are clock strings (`HH:MM:SS[.frac]`); anything else is a
/// plain number of seconds.
pub fn duration_from_report(report: &StreamReport, path: &Path) -> Result<f64, ProbeError> {
    let stream = report.streams.first().ok_or(ProbeError::NoStream)?;
    let raw = stream.raw_duration().ok_or(ProbeError::MissingDuration)?;

    log::trace!(
        "Stream {} ({}) duration for {}: {raw}",
        stream.index.unwrap_or(0),
        stream.codec_type.as_deref().unwrap_or("unknown"),
        path.display()
    );

    parse_duration_value(raw, is_matroska(path))
}

/// Parse a duration value as a clock string or as plain seconds.
pub fn parse_duration_value(raw: &str, clock: bool) -> Result<f64, ProbeError> {
    if clock {
        parse_clock_duration(raw).ok_or_else(|| ProbeError::InvalidDuration(raw.trim().to_string()))
    } else {
        parse_seconds(raw)
    }
}

fn is_matroska(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("mkv")
}
