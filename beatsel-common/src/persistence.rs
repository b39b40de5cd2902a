//! Write-behind persistence for the collection store
//!
//! The in-memory CollectionStore is authoritative; this module mirrors its
//! event stream into sqlite so collections survive restarts. A dedicated
//! task consumes the store's broadcast receiver and applies each event in
//! arrival order, which equals write order.
//!
//! Persistence failures are logged and skipped rather than propagated:
//! nothing in the select surface surfaces a user-visible error, and the
//! next full save (or the other events) will converge the mirror.

use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::db;
use crate::error::Result;
use crate::events::CollectionEvent;
use crate::store::CollectionStore;

/// A collection store backed by a sqlite mirror.
///
/// `open` loads the persisted collections into a fresh store and starts
/// the write-behind task. The store handle is shared; anything mutating it
/// is automatically persisted.
pub struct Repository {
    store: Arc<CollectionStore>,
    pool: SqlitePool,
    task: JoinHandle<()>,
}

impl Repository {
    /// Open (or create) the database at `db_path` and load the store
    pub async fn open(db_path: &std::path::Path) -> Result<Self> {
        let pool = db::init_database(db_path).await?;
        let store = Arc::new(CollectionStore::new());
        store.restore(db::collections::load_all(&pool).await?);

        let task = spawn_persistence(Arc::clone(&store), pool.clone());
        info!("collection repository opened ({} collections)", store.len());

        Ok(Self { store, pool, task })
    }

    pub fn store(&self) -> Arc<CollectionStore> {
        Arc::clone(&self.store)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Stop the write-behind task. Events still queued on the receiver are
    /// dropped; callers that need them durable await [`Repository::flush`]
    /// first.
    pub fn shutdown(self) {
        self.task.abort();
    }

    /// Rewrite the mirror to exactly match the store, in one transaction.
    ///
    /// Rows whose removal the mirror missed are gone afterwards; the
    /// in-memory store is authoritative.
    pub async fn flush(&self) -> Result<()> {
        db::collections::replace_all(&self.pool, &self.store.all()).await
    }
}

/// Start the write-behind task for `store`, mirroring events into `pool`.
///
/// The subscription is taken before this function returns, so no event
/// emitted after the call can be missed. If the task falls behind and the
/// bus drops events, it resynchronizes the mirror from a full store
/// snapshot instead of applying an incomplete stream.
pub fn spawn_persistence(store: Arc<CollectionStore>, pool: SqlitePool) -> JoinHandle<()> {
    let mut rx = store.subscribe();
    tokio::spawn(async move {
        info!("collection persistence task started");
        loop {
            match rx.recv().await {
                Ok(event) => {
                    if let Err(e) = apply_event(&pool, &event).await {
                        warn!("failed to persist collection event: {}", e);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(
                        "persistence task lagged, {} events dropped; resyncing from store",
                        skipped
                    );
                    if let Err(e) = db::collections::replace_all(&pool, &store.all()).await {
                        warn!("failed to resync collection mirror: {}", e);
                    }
                }
                Err(RecvError::Closed) => break,
            }
        }
        debug!("collection persistence task stopped");
    })
}

/// Apply one store event to the sqlite mirror
pub async fn apply_event(pool: &SqlitePool, event: &CollectionEvent) -> Result<()> {
    match event {
        CollectionEvent::CollectionAdded {
            id,
            name,
            timestamp,
        } => db::collections::insert_collection(pool, *id, name, *timestamp).await,
        CollectionEvent::CollectionRemoved { id, .. } => {
            db::collections::delete_collection(pool, *id).await
        }
        CollectionEvent::CollectionRenamed { id, new_name, .. } => {
            db::collections::rename_collection(pool, *id, new_name).await
        }
        CollectionEvent::MembershipChanged {
            id, hash, added, ..
        } => {
            if *added {
                db::collections::insert_member(pool, *id, hash).await
            } else {
                db::collections::delete_member(pool, *id, hash).await
            }
        }
    }
}
