// src/db/schema.rs
// DOCUMENTATION: Table definitions, applied idempotently at startup

use crate::config::DbPool;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BLOB PRIMARY KEY NOT NULL,
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL,
        is_superuser BOOLEAN NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS places (
        id BLOB PRIMARY KEY NOT NULL,
        name TEXT NOT NULL UNIQUE COLLATE NOCASE,
        latitude REAL NOT NULL,
        longitude REAL NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS albums (
        id BLOB PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        user_id BLOB NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        is_public BOOLEAN NOT NULL DEFAULT 1,
        head_id BLOB,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS images (
        id BLOB PRIMARY KEY NOT NULL,
        title TEXT NOT NULL DEFAULT '',
        description TEXT,
        album_id BLOB NOT NULL REFERENCES albums(id) ON DELETE CASCADE,
        user_id BLOB NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        file_path TEXT NOT NULL,
        content_type TEXT,
        width INTEGER,
        height INTEGER,
        -- id issued by the injected place directory, which may live elsewhere
        place_id BLOB,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tags (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS image_tags (
        image_id BLOB NOT NULL REFERENCES images(id) ON DELETE CASCADE,
        tag_id INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
        PRIMARY KEY (image_id, tag_id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_albums_user ON albums(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_images_album ON images(album_id, created_at)",
    "CREATE INDEX IF NOT EXISTS idx_images_place ON images(place_id)",
    "CREATE INDEX IF NOT EXISTS idx_image_tags_tag ON image_tags(tag_id)",
];

/// Create any missing tables and indexes
pub async fn init_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    log::info!("Database schema ready");
    Ok(())
}
