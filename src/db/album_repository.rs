// src/db/album_repository.rs
// DOCUMENTATION: Album database operations
// PURPOSE: CRUD for albums; deleting an album cascades to its images in SQL

use crate::config::DbPool;
use crate::errors::{db_error, GalleryError};
use crate::models::{Album, Viewer};
use chrono::Utc;
use uuid::Uuid;

const ALBUM_SELECT: &str = r#"
    SELECT a.id, a.name, a.user_id, a.is_public, a.head_id, a.created_at, a.updated_at,
           u.username AS username,
           (SELECT COUNT(*) FROM images i WHERE i.album_id = a.id) AS image_count
    FROM albums a
    JOIN users u ON u.id = a.user_id
"#;

pub struct AlbumRepository;

impl AlbumRepository {
    /// Create new album owned by `user_id`
    pub async fn create_album(
        pool: &DbPool,
        user_id: Uuid,
        name: &str,
        is_public: bool,
    ) -> Result<Album, GalleryError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO albums (id, name, user_id, is_public, head_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, NULL, ?, ?)
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(user_id)
        .bind(is_public)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await
        .map_err(db_error("create album"))?;

        log::info!("Created album {} for user {}", id, user_id);
        Self::get_by_id(pool, id).await
    }

    pub async fn get_by_id(pool: &DbPool, id: Uuid) -> Result<Album, GalleryError> {
        sqlx::query_as::<_, Album>(&format!("{} WHERE a.id = ?", ALBUM_SELECT))
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(db_error("fetch album"))?
            .ok_or_else(|| GalleryError::NotFound(format!("album {}", id)))
    }

    /// Albums of one owner that `viewer` may see, newest first
    pub async fn list_by_user(
        pool: &DbPool,
        owner_id: Uuid,
        viewer: &Viewer,
    ) -> Result<Vec<Album>, GalleryError> {
        sqlx::query_as::<_, Album>(&format!(
            r#"{}
            WHERE a.user_id = ?
              AND (a.is_public = 1 OR a.user_id = ? OR ? = 1)
            ORDER BY a.created_at DESC, a.id
            "#,
            ALBUM_SELECT
        ))
        .bind(owner_id)
        .bind(viewer.user_id)
        .bind(viewer.is_superuser)
        .fetch_all(pool)
        .await
        .map_err(db_error("list albums"))
    }

    /// Persist edited album fields
    pub async fn update_album(
        pool: &DbPool,
        id: Uuid,
        name: &str,
        is_public: bool,
        head_id: Option<Uuid>,
    ) -> Result<Album, GalleryError> {
        let result = sqlx::query(
            r#"
            UPDATE albums
            SET name = ?, is_public = ?, head_id = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(is_public)
        .bind(head_id)
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await
        .map_err(db_error("update album"))?;

        if result.rows_affected() == 0 {
            return Err(GalleryError::NotFound(format!("album {}", id)));
        }

        log::info!("Updated album {}", id);
        Self::get_by_id(pool, id).await
    }

    /// Delete album; images and their tag links go with it
    pub async fn delete_album(pool: &DbPool, id: Uuid) -> Result<(), GalleryError> {
        let result = sqlx::query("DELETE FROM albums WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await
            .map_err(db_error("delete album"))?;

        if result.rows_affected() == 0 {
            return Err(GalleryError::NotFound(format!("album {}", id)));
        }

        log::info!("Deleted album {}", id);
        Ok(())
    }
}
