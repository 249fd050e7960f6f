//! Directory traversal collecting files with recognized video extensions

use crate::{Error, Result, ScanOptions};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[cfg(unix)]
use std::os::unix::fs::MetadataExt;

/// Extensions recognized as video files when no custom set is configured
pub const DEFAULT_EXTENSIONS: [&str; 7] = ["avi", "mkv", "mp4", "m4v", "mpeg", "vob", "wmv"];

/// Immutable allow-list of file extensions (stored without the leading dot)
///
/// Matching is case-sensitive and exact: `clip.MKV` does not match `mkv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSet {
    extensions: BTreeSet<String>,
}

impl ExtensionSet {
    #[must_use]
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect();
        Self { extensions }
    }

    /// Check whether the path's extension is in the set
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.contains(ext))
    }

    #[must_use]
    pub fn contains(&self, extension: &str) -> bool {
        self.extensions.contains(extension.trim_start_matches('.'))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS)
    }
}

impl fmt::Display for ExtensionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        f.write_str(&joined.join(","))
    }
}

impl FromStr for ExtensionSet {
    type Err = String;

    /// Parse a comma separated list such as `mkv,.mp4,webm`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let set = Self::new(s.split(','));
        if set.is_empty() {
            return Err(format!("no extensions in '{s}'"));
        }
        Ok(set)
    }
}

#[cfg(unix)]
type DirectoryId = (u64, u64);

#[cfg(not(unix))]
type DirectoryId = PathBuf;

/// Identity of a directory for loop detection (device, inode)
#[cfg(unix)]
#[allow(clippy::unnecessary_wraps)]
fn directory_id(_path: &Path, metadata: &fs::Metadata) -> Result<DirectoryId> {
    Ok((metadata.dev(), metadata.ino()))
}

/// Identity of a directory for loop detection (canonical path)
#[cfg(not(unix))]
fn directory_id(path: &Path, _metadata: &fs::Metadata) -> Result<DirectoryId> {
    fs::canonicalize(path).map_err(|e| Error::filesystem(path, e))
}

/// Pending children of one directory on the work-list
struct DirectoryFrame {
    children: std::vec::IntoIter<PathBuf>,
}

impl DirectoryFrame {
    fn open(dir: &Path) -> Result<Self> {
        let children = fs::read_dir(dir)
            .map_err(|e| Error::filesystem(dir, e))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(|e| Error::filesystem(dir, e))?;

        log::trace!("Listed {} ({} children)", dir.display(), children.len());

        Ok(Self {
            children: children.into_iter(),
        })
    }
}

/// Walk a directory tree and collect every recognized video file
///
/// Uses an explicit stack of directory frames rather than recursion. Files
/// are returned depth-first: a subdirectory's files appear at the position
/// the subdirectory held in its parent's listing. Listing order is kept as
/// the OS returns it.
///
/// Symlinks are followed. With `detect_cycles` enabled, a directory whose
/// identity was already visited is skipped.
///
/// # Errors
/// Any directory that cannot be listed, or entry that cannot be stat'ed,
/// aborts the scan with `Error::Filesystem`.
pub fn scan_directory<P: AsRef<Path>>(root: P, opts: &ScanOptions) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    let mut files = Vec::new();
    let mut visited: HashSet<DirectoryId> = HashSet::new();

    if opts.detect_cycles {
        let metadata = fs::metadata(root).map_err(|e| Error::filesystem(root, e))?;
        visited.insert(directory_id(root, &metadata)?);
    }

    let mut stack = vec![DirectoryFrame::open(root)?];

    while let Some(frame) = stack.last_mut() {
        let Some(child) = frame.children.next() else {
            stack.pop();
            continue;
        };

        let metadata = fs::metadata(&child).map_err(|e| Error::filesystem(&child, e))?;

        if metadata.is_dir() {
            if opts.detect_cycles && !visited.insert(directory_id(&child, &metadata)?) {
                log::warn!("Skipping already visited directory: {}", child.display());
                continue;
            }
            stack.push(DirectoryFrame::open(&child)?);
        } else if metadata.is_file() && opts.extensions.matches(&child) {
            log::debug!("Video file: {}", child.display());
            files.push(child);
        }
    }

    Ok(files)
}
