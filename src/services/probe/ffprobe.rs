//! Process wrapper for the ffprobe executable

use super::ProbeError;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Environment variable overriding the ffprobe executable.
pub const FFPROBE_ENV: &str = "VIDLEN_FFPROBE";

const DEFAULT_PROGRAM: &str = "ffprobe";

/// Location of the ffprobe executable used by the probe backends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ffprobe {
    program: PathBuf,
}

impl Default for Ffprobe {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl Ffprobe {
    #[must_use]
    pub fn new<P: Into<PathBuf>>(program: P) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Use `VIDLEN_FFPROBE` when set and non-empty, otherwise `ffprobe` from PATH.
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var_os(FFPROBE_ENV)
            .filter(|value| !value.is_empty())
            .map_or_else(Self::default, Self::new)
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run ffprobe with `args` followed by `input`, returning stdout.
    pub fn run<S: AsRef<OsStr>>(&self, args: &[S], input: &Path) -> Result<Vec<u8>, ProbeError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(args).arg(input);

        log::trace!("Running {cmd:?}");

        let output = cmd.output().map_err(|source| {
            log::debug!("Cannot start {}: {source}", self.program().display());
            ProbeError::Spawn {
                program: self.program.clone(),
                source,
            }
        })?;

        if !output.status.success() {
            return Err(ProbeError::Status {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}
