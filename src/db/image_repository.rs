// src/db/image_repository.rs
// DOCUMENTATION: Image database operations
// PURPOSE: CRUD for images and every filtered image listing

use crate::config::DbPool;
use crate::db::TagRepository;
use crate::errors::{db_error, GalleryError};
use crate::models::{Image, NewImage, Viewer};
use chrono::Utc;
use sqlx::SqliteConnection;
use uuid::Uuid;

const IMAGE_SELECT: &str = r#"
    SELECT i.id, i.title, i.description, i.album_id, i.user_id, i.file_path,
           i.content_type, i.width, i.height, i.place_id, i.created_at, i.updated_at,
           u.username AS username
    FROM images i
    JOIN users u ON u.id = i.user_id
    JOIN albums a ON a.id = i.album_id
"#;

/// Images of public albums, or of albums the viewer owns, or everything for superusers.
/// Binds: viewer user id, viewer superuser flag.
const VISIBLE: &str = "(a.is_public = 1 OR a.user_id = ? OR ? = 1)";

pub struct ImageRepository;

impl ImageRepository {
    /// Insert image row on the caller's connection (usually a transaction)
    pub async fn insert_image(
        conn: &mut SqliteConnection,
        new: &NewImage,
    ) -> Result<Uuid, GalleryError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO images (
                id, title, description, album_id, user_id, file_path,
                content_type, width, height, place_id, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.album_id)
        .bind(new.user_id)
        .bind(&new.file_path)
        .bind(&new.content_type)
        .bind(new.width)
        .bind(new.height)
        .bind(new.place_id)
        .bind(now)
        .bind(now)
        .execute(&mut *conn)
        .await
        .map_err(db_error("create image"))?;

        log::info!("Created image {} in album {}", id, new.album_id);
        Ok(id)
    }

    /// Write back every editable column of `image`
    pub async fn update_image(
        conn: &mut SqliteConnection,
        image: &Image,
    ) -> Result<(), GalleryError> {
        let result = sqlx::query(
            r#"
            UPDATE images
            SET title = ?, description = ?, album_id = ?, file_path = ?,
                content_type = ?, width = ?, height = ?, place_id = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&image.title)
        .bind(&image.description)
        .bind(image.album_id)
        .bind(&image.file_path)
        .bind(&image.content_type)
        .bind(image.width)
        .bind(image.height)
        .bind(image.place_id)
        .bind(Utc::now())
        .bind(image.id)
        .execute(&mut *conn)
        .await
        .map_err(db_error("update image"))?;

        if result.rows_affected() == 0 {
            return Err(GalleryError::NotFound(format!("image {}", image.id)));
        }

        log::info!("Updated image {}", image.id);
        Ok(())
    }

    /// Fetch one image with its tags
    pub async fn get_by_id(pool: &DbPool, id: Uuid) -> Result<Image, GalleryError> {
        let image = sqlx::query_as::<_, Image>(&format!("{} WHERE i.id = ?", IMAGE_SELECT))
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(db_error("fetch image"))?
            .ok_or_else(|| GalleryError::NotFound(format!("image {}", id)))?;

        let mut images = vec![image];
        TagRepository::attach_tags(pool, &mut images).await?;
        Ok(images.remove(0))
    }

    /// One page of every image `viewer` may see, newest first, with the total count
    pub async fn list_visible(
        pool: &DbPool,
        viewer: &Viewer,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Image>, i64), GalleryError> {
        let mut images = sqlx::query_as::<_, Image>(&format!(
            "{} WHERE {} ORDER BY i.rowid DESC LIMIT ? OFFSET ?",
            IMAGE_SELECT, VISIBLE
        ))
        .bind(viewer.user_id)
        .bind(viewer.is_superuser)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .map_err(db_error("list images"))?;

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM images i JOIN albums a ON a.id = i.album_id WHERE {}",
            VISIBLE
        ))
        .bind(viewer.user_id)
        .bind(viewer.is_superuser)
        .fetch_one(pool)
        .await
        .map_err(db_error("count images"))?;

        TagRepository::attach_tags(pool, &mut images).await?;
        Ok((images, total))
    }

    /// Images of one album in upload order; callers check album visibility
    pub async fn list_by_album(pool: &DbPool, album_id: Uuid) -> Result<Vec<Image>, GalleryError> {
        let mut images = sqlx::query_as::<_, Image>(&format!(
            "{} WHERE i.album_id = ? ORDER BY i.rowid ASC",
            IMAGE_SELECT
        ))
        .bind(album_id)
        .fetch_all(pool)
        .await
        .map_err(db_error("list album images"))?;

        TagRepository::attach_tags(pool, &mut images).await?;
        Ok(images)
    }

    /// Images uploaded by one user that `viewer` may see
    pub async fn list_by_user(
        pool: &DbPool,
        owner_id: Uuid,
        viewer: &Viewer,
    ) -> Result<Vec<Image>, GalleryError> {
        let mut images = sqlx::query_as::<_, Image>(&format!(
            "{} WHERE i.user_id = ? AND {} ORDER BY i.rowid DESC",
            IMAGE_SELECT, VISIBLE
        ))
        .bind(owner_id)
        .bind(viewer.user_id)
        .bind(viewer.is_superuser)
        .fetch_all(pool)
        .await
        .map_err(db_error("list user images"))?;

        TagRepository::attach_tags(pool, &mut images).await?;
        Ok(images)
    }

    /// Images carrying `tag` that `viewer` may see; each image appears once
    pub async fn list_by_tag(
        pool: &DbPool,
        tag: &str,
        viewer: &Viewer,
    ) -> Result<Vec<Image>, GalleryError> {
        let mut images = sqlx::query_as::<_, Image>(&format!(
            r#"{}
            JOIN image_tags it ON it.image_id = i.id
            JOIN tags t ON t.id = it.tag_id
            WHERE t.name = ? AND {}
            ORDER BY i.rowid DESC
            "#,
            IMAGE_SELECT, VISIBLE
        ))
        .bind(tag)
        .bind(viewer.user_id)
        .bind(viewer.is_superuser)
        .fetch_all(pool)
        .await
        .map_err(db_error("list tagged images"))?;

        TagRepository::attach_tags(pool, &mut images).await?;
        Ok(images)
    }

    /// Images located at a place that `viewer` may see
    pub async fn list_by_place(
        pool: &DbPool,
        place_id: Uuid,
        viewer: &Viewer,
    ) -> Result<Vec<Image>, GalleryError> {
        let mut images = sqlx::query_as::<_, Image>(&format!(
            "{} WHERE i.place_id = ? AND {} ORDER BY i.rowid DESC",
            IMAGE_SELECT, VISIBLE
        ))
        .bind(place_id)
        .bind(viewer.user_id)
        .bind(viewer.is_superuser)
        .fetch_all(pool)
        .await
        .map_err(db_error("list place images"))?;

        TagRepository::attach_tags(pool, &mut images).await?;
        Ok(images)
    }

    /// Stored payload paths of every image in an album
    pub async fn file_paths_in_album(
        pool: &DbPool,
        album_id: Uuid,
    ) -> Result<Vec<String>, GalleryError> {
        sqlx::query_scalar("SELECT file_path FROM images WHERE album_id = ?")
            .bind(album_id)
            .fetch_all(pool)
            .await
            .map_err(db_error("list album files"))
    }

    /// Previous and next image ids within the image's album, in upload order
    pub async fn neighbours(
        pool: &DbPool,
        image: &Image,
    ) -> Result<(Option<Uuid>, Option<Uuid>), GalleryError> {
        let previous: Option<Uuid> = sqlx::query_scalar(
            r#"
            SELECT id FROM images
            WHERE album_id = ? AND rowid < (SELECT rowid FROM images WHERE id = ?)
            ORDER BY rowid DESC LIMIT 1
            "#,
        )
        .bind(image.album_id)
        .bind(image.id)
        .fetch_optional(pool)
        .await
        .map_err(db_error("fetch previous image"))?;

        let next: Option<Uuid> = sqlx::query_scalar(
            r#"
            SELECT id FROM images
            WHERE album_id = ? AND rowid > (SELECT rowid FROM images WHERE id = ?)
            ORDER BY rowid ASC LIMIT 1
            "#,
        )
        .bind(image.album_id)
        .bind(image.id)
        .fetch_optional(pool)
        .await
        .map_err(db_error("fetch next image"))?;

        Ok((previous, next))
    }

    /// Delete image row and unset it as any album's cover
    pub async fn delete_image(pool: &DbPool, id: Uuid) -> Result<(), GalleryError> {
        let mut tx = pool.begin().await.map_err(db_error("begin transaction"))?;

        sqlx::query("UPDATE albums SET head_id = NULL WHERE head_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("clear album cover"))?;

        let result = sqlx::query("DELETE FROM images WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("delete image"))?;

        if result.rows_affected() == 0 {
            return Err(GalleryError::NotFound(format!("image {}", id)));
        }

        tx.commit().await.map_err(db_error("commit transaction"))?;
        log::info!("Deleted image {}", id);
        Ok(())
    }
}
