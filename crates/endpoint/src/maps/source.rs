//! Where map files are read from.

use std::{
    io,
    path::{Path, PathBuf},
};

/// Byte source for the map files.
///
/// Implementations must be safe to call concurrently; each call reads one
/// whole file and holds no state between calls.
#[cfg_attr(test, mockall::automock)]
pub trait MapSource: Send + Sync {
    /// Read the full contents of `file_name`.
    fn read(&self, file_name: &str) -> io::Result<Vec<u8>>;
}

/// Reads map files from a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsMapSource {
    dir: PathBuf,
}

impl FsMapSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory files are read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl MapSource for FsMapSource {
    fn read(&self, file_name: &str) -> io::Result<Vec<u8>> {
        std::fs::read(self.dir.join(file_name))
    }
}
