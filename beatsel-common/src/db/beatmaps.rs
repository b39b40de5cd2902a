//! Beatmap identity cache
//!
//! The import pipeline owns beatmap content; this table caches the
//! identity of each imported beatmap (hash plus display fields) so song
//! select can enumerate what is playable without touching the importer.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::model::Beatmap;

pub async fn upsert_beatmap(pool: &SqlitePool, beatmap: &Beatmap) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO beatmaps (md5, title, artist, difficulty_name)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(md5) DO UPDATE SET
            title = excluded.title,
            artist = excluded.artist,
            difficulty_name = excluded.difficulty_name
        "#,
    )
    .bind(&beatmap.md5_hash)
    .bind(&beatmap.title)
    .bind(&beatmap.artist)
    .bind(&beatmap.difficulty_name)
    .execute(pool)
    .await?;
    Ok(())
}

/// All known beatmaps, in import order
pub async fn load_all(pool: &SqlitePool) -> Result<Vec<Beatmap>> {
    let rows: Vec<(String, String, String, String)> =
        sqlx::query_as("SELECT md5, title, artist, difficulty_name FROM beatmaps ORDER BY rowid")
            .fetch_all(pool)
            .await?;

    Ok(rows
        .into_iter()
        .map(|(md5_hash, title, artist, difficulty_name)| Beatmap {
            md5_hash,
            title,
            artist,
            difficulty_name,
        })
        .collect())
}

pub async fn get_beatmap(pool: &SqlitePool, md5: &str) -> Result<Option<Beatmap>> {
    let row: Option<(String, String, String, String)> = sqlx::query_as(
        "SELECT md5, title, artist, difficulty_name FROM beatmaps WHERE md5 = ?",
    )
    .bind(md5)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(md5_hash, title, artist, difficulty_name)| Beatmap {
        md5_hash,
        title,
        artist,
        difficulty_name,
    }))
}
