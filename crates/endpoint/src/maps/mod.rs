//! Resource key dispatch and map loading.
//!
//! A request names one of four fixed resources. [`MapKey`] maps that name to
//! the file it is served from and the shape the file must decode into;
//! [`load`] reads the file through a [`MapSource`], checks the shape, and
//! re-encodes it.

pub mod source;

use std::{io, sync::Arc};

use common::maps::{Automount, Group, Services, User};
use common::MapError;
use serde::{de::DeserializeOwned, Serialize};

pub use source::{FsMapSource, MapSource};

/// A recognised resource key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapKey {
    Automount,
    Group,
    Services,
    User,
}

impl MapKey {
    /// Every servable key, in dispatch order.
    pub const ALL: [MapKey; 4] = [
        MapKey::Automount,
        MapKey::Group,
        MapKey::Services,
        MapKey::User,
    ];

    /// Parse the path segment of a request. `None` for anything unrecognised.
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "automount" => Some(MapKey::Automount),
            "group" => Some(MapKey::Group),
            "services" => Some(MapKey::Services),
            "user" => Some(MapKey::User),
            _ => None,
        }
    }

    /// The path segment that selects this key.
    pub fn as_str(self) -> &'static str {
        match self {
            MapKey::Automount => "automount",
            MapKey::Group => "group",
            MapKey::Services => "services",
            MapKey::User => "user",
        }
    }

    /// File inside the map directory that backs this key.
    pub fn file_name(self) -> &'static str {
        match self {
            MapKey::Automount => "automount.json",
            MapKey::Group => "groups.json",
            MapKey::Services => "services.json",
            MapKey::User => "users.json",
        }
    }

    /// Decode `raw` as this key's shape and serialise it back to JSON.
    ///
    /// # Errors
    ///
    /// [`MapError::Decode`] if `raw` is not JSON of the expected shape.
    pub fn reencode(self, raw: &[u8]) -> Result<Vec<u8>, MapError> {
        let file = self.file_name();
        match self {
            MapKey::Automount => reencode_as::<Automount>(file, raw),
            MapKey::Group => reencode_as::<Group>(file, raw),
            MapKey::Services => reencode_as::<Services>(file, raw),
            MapKey::User => reencode_as::<User>(file, raw),
        }
    }
}

impl std::fmt::Display for MapKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn reencode_as<T>(file: &'static str, raw: &[u8]) -> Result<Vec<u8>, MapError>
where
    T: DeserializeOwned + Serialize,
{
    let value: T =
        serde_json::from_slice(raw).map_err(|source| MapError::Decode { file, source })?;
    serde_json::to_vec(&value).map_err(MapError::Encode)
}

/// Read the file backing `key` from `source` and return its re-encoded JSON.
///
/// The read runs on the blocking pool so a slow filesystem never stalls the
/// connection tasks.
///
/// # Errors
///
/// [`MapError::FileRead`] if the file cannot be read, [`MapError::Decode`]
/// if its contents do not match the key's shape.
pub async fn load(source: Arc<dyn MapSource>, key: MapKey) -> Result<Vec<u8>, MapError> {
    let file = key.file_name();
    let raw = tokio::task::spawn_blocking(move || source.read(file))
        .await
        .unwrap_or_else(|join| Err(io::Error::other(join)))
        .map_err(|source| MapError::FileRead { file, source })?;
    key.reencode(&raw)
}
