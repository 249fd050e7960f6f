//! CLI argument parsing

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasureArgs {
    pub path: String,
    pub absolute: bool,
    pub probe: String,
    pub ffprobe: Option<String>,
    pub extensions: Option<String>,
    pub jobs: usize,
    pub json: bool,
    pub quiet: bool,
}

impl Default for MeasureArgs {
    fn default() -> Self {
        Self {
            path: String::new(),
            absolute: false,
            probe: "format".to_string(),
            ffprobe: None,
            extensions: None,
            jobs: 1,
            json: false,
            quiet: false,
        }
    }
}

impl MeasureArgs {
    /// Resolve the target directory
    ///
    /// With `--absolute` the argument is used as given; otherwise it is joined
    /// onto `cwd` (an absolute argument still wins, as with `Path::join`).
    #[must_use]
    pub fn resolve_target(&self, cwd: &Path) -> PathBuf {
        if self.absolute {
            PathBuf::from(&self.path)
        } else {
            cwd.join(&self.path)
        }
    }
}

/// Parse command line arguments (`args[0]` is the program name)
pub fn parse_args(args: &[String]) -> Result<MeasureArgs, String> {
    let mut parsed = MeasureArgs::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--absolute" | "-a" => {
                parsed.absolute = true;
            }
            "--probe" => {
                i += 1;
                if i >= args.len() {
                    return Err("--probe requires a value".to_string());
                }
                parsed.probe.clone_from(&args[i]);
            }
            "--ffprobe" => {
                i += 1;
                if i >= args.len() {
                    return Err("--ffprobe requires a path".to_string());
                }
                parsed.ffprobe = Some(args[i].clone());
            }
            "--ext" => {
                i += 1;
                if i >= args.len() {
                    return Err("--ext requires a value".to_string());
                }
                parsed.extensions = Some(args[i].clone());
            }
            "--jobs" | "-j" => {
                i += 1;
                if i >= args.len() {
                    return Err("--jobs requires a value".to_string());
                }
                let jobs: usize = args[i]
                    .parse()
                    .map_err(|_| "--jobs must be a positive integer".to_string())?;
                if jobs == 0 {
                    return Err("--jobs must be greater than zero".to_string());
                }
                parsed.jobs = jobs;
            }
            "--json" => {
                parsed.json = true;
            }
            "--quiet" | "-q" => {
                parsed.quiet = true;
            }
            arg if !arg.starts_with('-') || arg == "-" => {
                if parsed.path.is_empty() {
                    parsed.path = arg.to_string();
                } else {
                    return Err(format!("Unexpected argument: {arg}"));
                }
            }
            _ => return Err(format!("Unknown option: {}", args[i])),
        }
        i += 1;
    }

    if parsed.path.is_empty() {
        return Err("Missing required argument: DIR".to_string());
    }

    Ok(parsed)
}
