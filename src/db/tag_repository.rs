// src/db/tag_repository.rs
// DOCUMENTATION: Tag storage and the image_tags link table

use crate::config::DbPool;
use crate::errors::{db_error, GalleryError};
use crate::models::Image;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use std::collections::HashMap;
use uuid::Uuid;

pub struct TagRepository;

impl TagRepository {
    /// Replace the tag set of one image
    /// DOCUMENTATION: runs on the caller's connection so it joins the
    /// caller's transaction
    pub async fn set_tags(
        conn: &mut SqliteConnection,
        image_id: Uuid,
        tags: &[String],
    ) -> Result<(), GalleryError> {
        sqlx::query("DELETE FROM image_tags WHERE image_id = ?")
            .bind(image_id)
            .execute(&mut *conn)
            .await
            .map_err(db_error("clear image tags"))?;

        for tag in tags {
            sqlx::query("INSERT INTO tags (name) VALUES (?) ON CONFLICT(name) DO NOTHING")
                .bind(tag)
                .execute(&mut *conn)
                .await
                .map_err(db_error("create tag"))?;

            sqlx::query(
                r#"
                INSERT OR IGNORE INTO image_tags (image_id, tag_id)
                SELECT ?, id FROM tags WHERE name = ?
                "#,
            )
            .bind(image_id)
            .bind(tag)
            .execute(&mut *conn)
            .await
            .map_err(db_error("link image tag"))?;
        }

        log::debug!("Image {} tagged with {:?}", image_id, tags);
        Ok(())
    }

    /// Fill `tags` on every image with one query
    pub async fn attach_tags(pool: &DbPool, images: &mut [Image]) -> Result<(), GalleryError> {
        if images.is_empty() {
            return Ok(());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            r#"
            SELECT it.image_id, t.name
            FROM image_tags it
            JOIN tags t ON t.id = it.tag_id
            WHERE it.image_id IN ("#,
        );
        let mut separated = builder.separated(", ");
        for image in images.iter() {
            separated.push_bind(image.id);
        }
        separated.push_unseparated(") ORDER BY t.name");

        let rows: Vec<(Uuid, String)> = builder
            .build_query_as()
            .fetch_all(pool)
            .await
            .map_err(db_error("load image tags"))?;

        let mut by_image: HashMap<Uuid, Vec<String>> = HashMap::new();
        for (image_id, name) in rows {
            by_image.entry(image_id).or_default().push(name);
        }

        for image in images.iter_mut() {
            image.tags = by_image.remove(&image.id).unwrap_or_default();
        }
        Ok(())
    }
}
