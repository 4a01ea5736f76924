//! Log files from a local directory.

use super::{LogSource, SourceBlob};
use crate::utils::error::SourceError;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Every regular file directly inside a directory (no recursion)
#[derive(Debug, Clone)]
pub struct LocalDirSource {
    dir: PathBuf,
}

impl LocalDirSource {
    /// Create a source for `dir`
    ///
    /// # Errors
    /// * `SourceError::NotADirectory` - `dir` is missing or not a directory
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, SourceError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(SourceError::NotADirectory(dir.display().to_string()));
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl LogSource for LocalDirSource {
    fn describe(&self) -> String {
        format!("local directory {}", self.dir.display())
    }

    fn fetch_blobs(&self) -> Result<Vec<SourceBlob>, SourceError> {
        info!("Reading files from local directory: {}", self.dir.display());

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.is_file() {
                paths.push(path);
            }
        }

        // read_dir order is platform dependent
        paths.sort();

        let mut blobs = Vec::with_capacity(paths.len());
        for path in paths {
            let bytes = fs::read(&path)?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            debug!("Read {} bytes from {}", bytes.len(), name);
            blobs.push(SourceBlob::new(name, String::from_utf8_lossy(&bytes)));
        }

        Ok(blobs)
    }
}
