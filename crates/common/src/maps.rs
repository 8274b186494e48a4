//! Data shapes of the served maps.
//!
//! Each shape mirrors one JSON file in the map directory. Records are decoded
//! leniently: unknown fields are ignored, and missing or `null` fields fall
//! back to their zero value, so partially populated records produced upstream
//! still load. Field names are also accepted in Title and UPPER case. A field
//! of the wrong JSON type is still a decode error.

use serde::{Deserialize, Deserializer, Serialize};

/// Decode an explicit `null` the same way as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// automount.json
// ---------------------------------------------------------------------------

/// One automount map, e.g. `auto.home`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomountMapEntry {
    #[serde(alias = "Name", alias = "NAME", deserialize_with = "null_as_default")]
    pub name: String,
}

/// One mount point inside an automount map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomountEntry {
    /// Key within the map (mount point name).
    #[serde(alias = "Name", alias = "NAME", deserialize_with = "null_as_default")]
    pub name: String,
    /// Name of the [`AutomountMapEntry`] this entry belongs to.
    #[serde(alias = "Map", alias = "MAP", deserialize_with = "null_as_default")]
    pub map: String,
    /// Mount information, e.g. `-rw nfs01:/export/home/&`.
    #[serde(alias = "Info", alias = "INFO", deserialize_with = "null_as_default")]
    pub info: String,
}

/// Contents of `automount.json`: the maps and all of their entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Automount {
    #[serde(
        rename = "automountMap",
        alias = "AutomountMap",
        alias = "automountmap",
        alias = "AUTOMOUNTMAP",
        deserialize_with = "null_as_default"
    )]
    pub automount_map: Vec<AutomountMapEntry>,
    #[serde(alias = "Automount", alias = "AUTOMOUNT", deserialize_with = "null_as_default")]
    pub automount: Vec<AutomountEntry>,
}

// ---------------------------------------------------------------------------
// groups.json
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupEntry {
    #[serde(alias = "Name", alias = "NAME", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(alias = "Gid", alias = "GId", alias = "GID", deserialize_with = "null_as_default")]
    pub gid: i64,
    #[serde(alias = "Members", alias = "MEMBERS", deserialize_with = "null_as_default")]
    pub members: Vec<String>,
}

/// Contents of `groups.json`.
pub type Group = Vec<GroupEntry>;

// ---------------------------------------------------------------------------
// services.json
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceEntry {
    #[serde(alias = "Name", alias = "NAME", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(alias = "Port", alias = "PORT", deserialize_with = "null_as_default")]
    pub port: i64,
    #[serde(alias = "Protocols", alias = "PROTOCOLS", deserialize_with = "null_as_default")]
    pub protocols: Vec<String>,
    #[serde(alias = "Aliases", alias = "ALIASES", deserialize_with = "null_as_default")]
    pub aliases: Vec<String>,
}

/// Contents of `services.json`.
pub type Services = Vec<ServiceEntry>;

// ---------------------------------------------------------------------------
// users.json
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserEntry {
    #[serde(alias = "Name", alias = "NAME", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(alias = "Uid", alias = "UId", alias = "UID", deserialize_with = "null_as_default")]
    pub uid: i64,
    #[serde(alias = "Gid", alias = "GId", alias = "GID", deserialize_with = "null_as_default")]
    pub gid: i64,
    #[serde(alias = "Gecos", alias = "GECOS", deserialize_with = "null_as_default")]
    pub gecos: String,
    #[serde(
        alias = "Homedir",
        alias = "HomeDir",
        alias = "HOMEDIR",
        deserialize_with = "null_as_default"
    )]
    pub homedir: String,
    #[serde(alias = "Shell", alias = "SHELL", deserialize_with = "null_as_default")]
    pub shell: String,
}

/// Contents of `users.json`.
pub type User = Vec<UserEntry>;
