//! # Beatsel Common Library
//!
//! Shared code for the beatsel song-select components including:
//! - Collection and beatmap data model
//! - Event types (CollectionEvent enum) and EventBus
//! - Observable CollectionStore (single source of truth for collections)
//! - Sqlite persistence for collections and beatmap identity
//! - Configuration loading

pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod model;
pub mod persistence;
pub mod store;

pub use error::{Error, Result};
pub use events::{CollectionEvent, EventBus};
pub use model::{ActiveBeatmap, Beatmap, Collection, CollectionId};
pub use store::CollectionStore;
