//! Data model for beatmap collections
//!
//! A collection is a named set of beatmap content hashes. Ids are stable
//! across renames; names carry no uniqueness rule (two collections may
//! validly share a name, and empty names are accepted as-is).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Stable identifier for a collection, assigned at creation.
///
/// Renames never change the id, so any holder of a `CollectionId` can
/// follow a collection across display-name changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(Uuid);

impl CollectionId {
    /// Assign a fresh id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an id from its stored text form (collections.guid column)
    pub fn parse(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| Error::InvalidData(format!("bad collection guid '{}': {}", s, e)))
    }
}

impl Default for CollectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CollectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named collection of beatmaps, identified by content hash
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,
    /// Display name; may be empty or duplicate another collection's name
    pub name: String,
    /// MD5 content hashes of member beatmaps (unordered)
    pub members: HashSet<String>,
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CollectionId::new(),
            name: name.into(),
            members: HashSet::new(),
        }
    }

    pub fn contains(&self, hash: &str) -> bool {
        self.members.contains(hash)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

/// Beatmap identity as supplied by the import pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beatmap {
    /// Content hash; the sole identity used by collections
    pub md5_hash: String,
    pub title: String,
    pub artist: String,
    pub difficulty_name: String,
}

/// The beatmap currently loaded at song select.
///
/// `ActiveBeatmap::none()` models the placeholder/dummy beatmap shown when
/// nothing real is loaded; no membership toggle is available in that state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveBeatmap(Option<String>);

impl ActiveBeatmap {
    /// The placeholder state (no real beatmap loaded)
    pub fn none() -> Self {
        Self(None)
    }

    pub fn with_hash(hash: impl Into<String>) -> Self {
        Self(Some(hash.into()))
    }

    pub fn from_beatmap(beatmap: &Beatmap) -> Self {
        Self(Some(beatmap.md5_hash.clone()))
    }

    /// Content hash of the active beatmap, if a real one is loaded
    pub fn hash(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_placeholder(&self) -> bool {
        self.0.is_none()
    }
}
