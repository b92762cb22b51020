// src/db/place_repository.rs
// DOCUMENTATION: Place database operations backing the SQL place directory

use crate::config::DbPool;
use crate::errors::{db_error, GalleryError};
use crate::models::{CreatePlaceRequest, Place};
use chrono::Utc;
use uuid::Uuid;

pub struct PlaceRepository;

impl PlaceRepository {
    /// Create new place; names are unique ignoring case
    pub async fn create_place(
        pool: &DbPool,
        req: &CreatePlaceRequest,
    ) -> Result<Place, GalleryError> {
        let place = Place {
            id: Uuid::new_v4(),
            name: req.name.trim().to_string(),
            latitude: req.latitude,
            longitude: req.longitude,
            created_at: Utc::now(),
        };

        let result = sqlx::query(
            r#"
            INSERT INTO places (id, name, latitude, longitude, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(place.id)
        .bind(&place.name)
        .bind(place.latitude)
        .bind(place.longitude)
        .bind(place.created_at)
        .execute(pool)
        .await;

        match result {
            Ok(_) => {
                log::info!("Created place {} ({})", place.name, place.id);
                Ok(place)
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(
                GalleryError::AlreadyExists(format!("place {}", place.name)),
            ),
            Err(e) => Err(db_error("create place")(e)),
        }
    }

    pub async fn get_by_id(pool: &DbPool, id: Uuid) -> Result<Place, GalleryError> {
        sqlx::query_as::<_, Place>("SELECT * FROM places WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(db_error("fetch place"))?
            .ok_or_else(|| GalleryError::NotFound(format!("place {}", id)))
    }

    /// Case-insensitive exact name match
    pub async fn find_by_name(pool: &DbPool, name: &str) -> Result<Option<Place>, GalleryError> {
        sqlx::query_as::<_, Place>("SELECT * FROM places WHERE name = ?")
            .bind(name.trim())
            .fetch_optional(pool)
            .await
            .map_err(db_error("fetch place by name"))
    }
}
