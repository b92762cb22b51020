// src/services/places.rs
// DOCUMENTATION: Optional place directory collaborator
// PURPOSE: The app receives `Option<Arc<dyn PlaceDirectory>>`; with `None`
// place input is ignored and place pages are not served

use crate::config::DbPool;
use crate::db::{ImageRepository, PlaceRepository};
use crate::errors::GalleryError;
use crate::models::{CreatePlaceRequest, Place, PlaceDetailResponse, User, Viewer};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Contract consumed by the image manager
#[async_trait]
pub trait PlaceDirectory: Send + Sync {
    /// Resolve free-text input to a known place
    async fn resolve(&self, text: &str) -> Result<Option<Place>, GalleryError>;

    async fn get(&self, id: Uuid) -> Result<Place, GalleryError>;

    async fn create(&self, req: &CreatePlaceRequest) -> Result<Place, GalleryError>;
}

/// Injected collaborator handle
pub type PlaceHandle = Option<Arc<dyn PlaceDirectory>>;

/// Place directory stored alongside the gallery tables
pub struct SqlPlaceDirectory {
    pool: DbPool,
}

impl SqlPlaceDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlaceDirectory for SqlPlaceDirectory {
    async fn resolve(&self, text: &str) -> Result<Option<Place>, GalleryError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        PlaceRepository::find_by_name(&self.pool, text).await
    }

    async fn get(&self, id: Uuid) -> Result<Place, GalleryError> {
        PlaceRepository::get_by_id(&self.pool, id).await
    }

    async fn create(&self, req: &CreatePlaceRequest) -> Result<Place, GalleryError> {
        PlaceRepository::create_place(&self.pool, req).await
    }
}

pub struct PlaceService;

impl PlaceService {
    fn directory(places: &PlaceHandle) -> Result<&Arc<dyn PlaceDirectory>, GalleryError> {
        places
            .as_ref()
            .ok_or_else(|| GalleryError::NotFound("places are not enabled".to_string()))
    }

    pub async fn create_place(
        places: &PlaceHandle,
        req: CreatePlaceRequest,
    ) -> Result<Place, GalleryError> {
        Self::directory(places)?.create(&req).await
    }

    /// Place page listing the images located there that the requester may see
    pub async fn place_detail(
        pool: &DbPool,
        places: &PlaceHandle,
        user: Option<&User>,
        id: Uuid,
    ) -> Result<PlaceDetailResponse, GalleryError> {
        let place = Self::directory(places)?.get(id).await?;
        let images = ImageRepository::list_by_place(pool, place.id, &Viewer::of(user)).await?;

        Ok(PlaceDetailResponse {
            place: place.to_response(),
            image_list: images.iter().map(|i| i.to_response()).collect(),
        })
    }

    /// Resolve `place_text` when a directory is injected
    /// DOCUMENTATION: returns Ok(None) for blank text or when places are
    /// disabled; unknown names are a validation error
    pub async fn resolve_text(
        places: &PlaceHandle,
        text: Option<&str>,
    ) -> Result<Option<Place>, GalleryError> {
        let (Some(directory), Some(text)) = (places.as_ref(), text) else {
            return Ok(None);
        };
        if text.trim().is_empty() {
            return Ok(None);
        }

        match directory.resolve(text).await? {
            Some(place) => Ok(Some(place)),
            None => Err(GalleryError::ValidationError(format!(
                "place_text: unknown place {:?}",
                text.trim()
            ))),
        }
    }
}
