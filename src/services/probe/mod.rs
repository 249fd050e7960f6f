//! Duration probing through ffprobe.
//!
//! Aggregation is written once against [`DurationProbe`]. Two backends exist,
//! selected at configuration time through [`ProbeKind`]:
//!
//! - [`FormatProbe`] asks ffprobe for the container duration, which is always
//!   a plain number of seconds.
//! - [`StreamProbe`] reads the first stream's metadata: its `duration` field,
//!   falling back to the `DURATION` tag. Matroska files carry that tag as a
//!   clock string (`HH:MM:SS.fffffffff`).

pub mod container;
pub mod ffprobe;
pub mod streams;

pub use container::FormatProbe;
pub use ffprobe::Ffprobe;
pub use streams::StreamProbe;

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Capability that reads a single file's playback duration.
pub trait DurationProbe: Send + Sync {
    /// Identify the backend for logging and diagnostics.
    fn name(&self) -> &'static str;

    /// Return the duration of `path` in seconds.
    fn probe(&self, path: &Path) -> Result<f64, ProbeError>;
}

/// Reasons a single file could not be measured.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to start {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("ffprobe exited with {}: {stderr}", exit_label(.code))]
    Status { code: Option<i32>, stderr: String },

    #[error("unreadable ffprobe output: {0}")]
    Malformed(String),

    #[error("no streams found")]
    NoStream,

    #[error("no duration metadata")]
    MissingDuration,

    #[error("invalid duration value '{0}'")]
    InvalidDuration(String),
}

fn exit_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| format!("status {c}"))
}

/// Available probe backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeKind {
    /// Container-level duration (`format=duration`).
    #[default]
    Format,
    /// Stream metadata with `DURATION` tag fallback.
    Streams,
}

impl ProbeKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeKind::Format => "format",
            ProbeKind::Streams => "streams",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "format" => Some(ProbeKind::Format),
            "streams" => Some(ProbeKind::Streams),
            _ => None,
        }
    }

    /// Construct the backend using the given ffprobe executable.
    #[must_use]
    pub fn build(self, ffprobe: Ffprobe) -> Box<dyn DurationProbe> {
        match self {
            ProbeKind::Format => Box::new(FormatProbe::new(ffprobe)),
            ProbeKind::Streams => Box::new(StreamProbe::new(ffprobe)),
        }
    }
}

impl std::fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProbeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProbeKind::from_label(s).ok_or_else(|| format!("unknown probe '{s}'"))
    }
}

/// Parse a plain numeric duration, rejecting negative and non-finite values.
pub fn parse_seconds(raw: &str) -> Result<f64, ProbeError> {
    let value = raw.trim();
    value
        .parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .ok_or_else(|| ProbeError::InvalidDuration(value.to_string()))
}
