//! Video Duration Library
//!
//! This library walks a directory tree for video files, probes each file's
//! playback duration through `ffprobe`, and reports the aggregate running time
//! along with the number of files that could not be measured.

pub mod cli;
pub mod models;
pub mod services;

pub use models::{SkippedFile, Summary};
pub use services::aggregate::{MeasureEvent, aggregate};
pub use services::probe::{DurationProbe, Ffprobe, FormatProbe, ProbeError, ProbeKind, StreamProbe};
pub use services::scan::{DEFAULT_EXTENSIONS, ExtensionSet, scan_directory};

use std::fmt;
use std::path::{Path, PathBuf};
use std::result;
use std::sync::Arc;

/// Custom error type for the library
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    InvalidInput(String),
    InvalidTarget(String),
    Filesystem {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn filesystem(path: &Path, source: std::io::Error) -> Self {
        Error::Filesystem {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            Error::InvalidTarget(msg) => write!(f, "Invalid target: {msg}"),
            Error::Filesystem { path, source } => {
                write!(f, "Filesystem error at {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) | Error::Filesystem { source: e, .. } => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Options for walking a directory tree
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub extensions: ExtensionSet,
    /// Skip directories whose identity was already visited (symlink loops).
    pub detect_cycles: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: ExtensionSet::default(),
            detect_cycles: true,
        }
    }
}

/// Callback receiving progress and per-file failure notices.
pub type EventNotifier = Arc<dyn Fn(&MeasureEvent<'_>) + Send + Sync>;

/// Options for a full measurement run
#[derive(Clone)]
pub struct MeasureOptions {
    pub scan: ScanOptions,
    /// Number of files probed concurrently; 1 keeps probing sequential.
    pub jobs: usize,
    pub event_notifier: Option<EventNotifier>,
}

impl Default for MeasureOptions {
    fn default() -> Self {
        Self {
            scan: ScanOptions::default(),
            jobs: 1,
            event_notifier: None,
        }
    }
}

impl fmt::Debug for MeasureOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeasureOptions")
            .field("scan", &self.scan)
            .field("jobs", &self.jobs)
            .field("event_notifier", &self.event_notifier.is_some())
            .finish()
    }
}

impl MeasureOptions {
    /// Install a callback for progress and per-file failure notices.
    #[must_use]
    pub fn on_event<F>(mut self, notifier: F) -> Self
    where
        F: Fn(&MeasureEvent<'_>) + Send + Sync + 'static,
    {
        self.event_notifier = Some(Arc::new(notifier));
        self
    }

    pub(crate) fn notify(&self, event: &MeasureEvent<'_>) {
        if let Some(notifier) = &self.event_notifier {
            notifier(event);
        }
    }
}

/// Measure the total playback duration of every video below `root`
///
/// # Arguments
/// * `root` - The directory to scan
/// * `opts` - Scan and aggregation options
/// * `probe` - Capability used to read each file's duration
///
/// # Returns
/// A Summary with the total duration and skipped/total file counts
///
/// # Errors
/// `InvalidTarget` when `root` is missing or not a directory (nothing is
/// scanned or probed), `Filesystem` when any directory in the tree cannot be
/// listed or any entry cannot be stat'ed.
pub fn measure_directory<P: AsRef<Path>>(
    root: P,
    opts: &MeasureOptions,
    probe: &dyn DurationProbe,
) -> Result<Summary> {
    let root = root.as_ref();
    let root_display = root.display().to_string();

    if !root.exists() {
        return Err(Error::InvalidTarget(format!(
            "Path does not exist: {root_display}"
        )));
    }

    if !root.is_dir() {
        return Err(Error::InvalidTarget(format!(
            "Path is not a directory: {root_display}"
        )));
    }

    let root = std::path::absolute(root)?;
    opts.notify(&MeasureEvent::ScanStarted { root: &root });

    let files = scan_directory(&root, &opts.scan)?;
    opts.notify(&MeasureEvent::ScanFinished { files: files.len() });

    aggregate(&files, probe, opts)
}
