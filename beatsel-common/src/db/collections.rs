//! Collection and membership persistence queries
//!
//! These mirror CollectionStore events into durable storage. All writes
//! use INSERT OR IGNORE / plain DELETE so that replaying an idempotent
//! membership event (or re-applying after a crash) cannot fail.

use std::collections::HashMap;

use sqlx::SqlitePool;

use crate::error::Result;
use crate::model::{Collection, CollectionId};

/// Load all collections with their membership sets, in creation order
pub async fn load_all(pool: &SqlitePool) -> Result<Vec<Collection>> {
    let rows: Vec<(String, String)> =
        sqlx::query_as("SELECT guid, name FROM collections ORDER BY rowid")
            .fetch_all(pool)
            .await?;

    let member_rows: Vec<(String, String)> =
        sqlx::query_as("SELECT collection_guid, beatmap_md5 FROM collection_beatmaps")
            .fetch_all(pool)
            .await?;

    let mut members: HashMap<String, Vec<String>> = HashMap::new();
    for (guid, md5) in member_rows {
        members.entry(guid).or_default().push(md5);
    }

    let mut collections = Vec::with_capacity(rows.len());
    for (guid, name) in rows {
        let id = CollectionId::parse(&guid)?;
        let hashes = members.remove(&guid).unwrap_or_default();
        collections.push(Collection {
            id,
            name,
            members: hashes.into_iter().collect(),
        });
    }
    Ok(collections)
}

pub async fn insert_collection(
    pool: &SqlitePool,
    id: CollectionId,
    name: &str,
    created_at: chrono::DateTime<chrono::Utc>,
) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO collections (guid, name, created_at) VALUES (?, ?, ?)")
        .bind(id.to_string())
        .bind(name)
        .bind(created_at.to_rfc3339())
        .execute(pool)
        .await?;
    Ok(())
}

/// Delete a collection row; membership rows cascade with it
pub async fn delete_collection(pool: &SqlitePool, id: CollectionId) -> Result<()> {
    sqlx::query("DELETE FROM collections WHERE guid = ?")
        .bind(id.to_string())
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn rename_collection(pool: &SqlitePool, id: CollectionId, new_name: &str) -> Result<()> {
    sqlx::query("UPDATE collections SET name = ? WHERE guid = ?")
        .bind(new_name)
        .bind(id.to_string())
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn insert_member(pool: &SqlitePool, id: CollectionId, hash: &str) -> Result<()> {
    sqlx::query(
        "INSERT OR IGNORE INTO collection_beatmaps (collection_guid, beatmap_md5) VALUES (?, ?)",
    )
    .bind(id.to_string())
    .bind(hash)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete_member(pool: &SqlitePool, id: CollectionId, hash: &str) -> Result<()> {
    sqlx::query("DELETE FROM collection_beatmaps WHERE collection_guid = ? AND beatmap_md5 = ?")
        .bind(id.to_string())
        .bind(hash)
        .execute(pool)
        .await?;
    Ok(())
}

/// Rewrite the stored collections to exactly match `collections`.
///
/// Single transaction: rows for collections or members the snapshot does
/// not contain are gone afterwards, so a mirror that diverged (dropped
/// events, partial writes) converges in one call. Original creation
/// timestamps are kept for collections that already have a row.
pub async fn replace_all(pool: &SqlitePool, collections: &[Collection]) -> Result<()> {
    let existing: Vec<(String, String)> =
        sqlx::query_as("SELECT guid, created_at FROM collections")
            .fetch_all(pool)
            .await?;
    let created_at: HashMap<String, String> = existing.into_iter().collect();

    let mut tx = pool.begin().await?;

    // Memberships first: the cascade only fires on connections that have
    // the foreign_keys pragma applied, so do not rely on it here.
    sqlx::query("DELETE FROM collection_beatmaps")
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM collections").execute(&mut *tx).await?;

    for collection in collections {
        let guid = collection.id.to_string();
        let stamp = created_at
            .get(&guid)
            .cloned()
            .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());
        sqlx::query("INSERT INTO collections (guid, name, created_at) VALUES (?, ?, ?)")
            .bind(&guid)
            .bind(&collection.name)
            .bind(stamp)
            .execute(&mut *tx)
            .await?;
        for hash in &collection.members {
            sqlx::query(
                "INSERT INTO collection_beatmaps (collection_guid, beatmap_md5) VALUES (?, ?)",
            )
            .bind(&guid)
            .bind(hash)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;
    Ok(())
}
