//! Shared application state injected into every Axum handler.

use std::{path::PathBuf, sync::Arc};

use crate::maps::{FsMapSource, MapSource};

/// Application state shared across all request handlers.
///
/// Fixed at startup; handlers only ever read through it.
#[derive(Clone)]
pub struct AppState {
    /// Where the map files are read from.
    pub maps: Arc<dyn MapSource>,
}

impl AppState {
    /// Create a new [`AppState`] reading through `source`.
    pub fn new(source: impl MapSource + 'static) -> Self {
        Self {
            maps: Arc::new(source),
        }
    }

    /// State serving the map files found in `mapdir`.
    pub fn from_dir(mapdir: impl Into<PathBuf>) -> Self {
        Self::new(FsMapSource::new(mapdir))
    }
}
