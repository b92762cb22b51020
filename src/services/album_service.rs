// src/services/album_service.rs
// DOCUMENTATION: Business logic for albums and per-user pages
// PURPOSE: Intermediary between handlers and repositories; applies the access rules

use crate::config::DbPool;
use crate::db::{AlbumRepository, ImageRepository, UserRepository};
use crate::errors::GalleryError;
use crate::models::{
    AlbumDetailResponse, AlbumForm, AlbumFormResponse, AlbumResponse, User, UserPageResponse,
    Viewer,
};
use crate::services::{access, MediaStore};
use uuid::Uuid;

pub struct AlbumService;

impl AlbumService {
    /// Create a new album owned by `user`; public unless stated otherwise
    pub async fn create_album(
        pool: &DbPool,
        user: &User,
        form: AlbumForm,
    ) -> Result<AlbumResponse, GalleryError> {
        let is_public = form.is_public.unwrap_or(true);
        let album =
            AlbumRepository::create_album(pool, user.id, form.name.trim(), is_public).await?;
        Ok(album.to_response())
    }

    /// Album with its images; private albums need owner or superuser
    pub async fn get_album(
        pool: &DbPool,
        user: Option<&User>,
        id: Uuid,
    ) -> Result<AlbumDetailResponse, GalleryError> {
        let album = AlbumRepository::get_by_id(pool, id).await?;
        access::ensure_album_visible(user, &album)?;

        let images = ImageRepository::list_by_album(pool, album.id).await?;
        let head = match album.head_id {
            Some(head_id) => images.iter().find(|i| i.id == head_id),
            None => images.first(),
        };

        Ok(AlbumDetailResponse {
            album: album.to_response(),
            head: head.map(|i| i.to_response()),
            image_list: images.iter().map(|i| i.to_response()).collect(),
        })
    }

    /// Pre-filled edit form
    pub async fn edit_form(
        pool: &DbPool,
        user: &User,
        id: Uuid,
    ) -> Result<AlbumFormResponse, GalleryError> {
        let album = AlbumRepository::get_by_id(pool, id).await?;
        access::ensure_album_editable(user, &album)?;
        Ok(AlbumFormResponse::for_album(&album))
    }

    /// Persist edited name, visibility and cover
    pub async fn update_album(
        pool: &DbPool,
        user: &User,
        id: Uuid,
        form: AlbumForm,
    ) -> Result<AlbumResponse, GalleryError> {
        let album = AlbumRepository::get_by_id(pool, id).await?;
        access::ensure_album_editable(user, &album)?;

        let head_choice = form.head_choice().map_err(|_| {
            GalleryError::ValidationError("head: select an image of this album".to_string())
        })?;
        if let Some(Some(head_id)) = head_choice {
            let head = ImageRepository::get_by_id(pool, head_id).await.ok();
            if head.map_or(true, |image| image.album_id != album.id) {
                return Err(GalleryError::ValidationError(
                    "head: select an image of this album".to_string(),
                ));
            }
        }

        let updated = AlbumRepository::update_album(
            pool,
            album.id,
            form.name.trim(),
            form.is_public.unwrap_or(album.is_public),
            head_choice.unwrap_or(album.head_id),
        )
        .await?;
        Ok(updated.to_response())
    }

    /// Delete album, its images and their stored files
    pub async fn delete_album(
        pool: &DbPool,
        media: &MediaStore,
        user: &User,
        id: Uuid,
    ) -> Result<(), GalleryError> {
        let album = AlbumRepository::get_by_id(pool, id).await?;
        access::ensure_album_editable(user, &album)?;

        let files = ImageRepository::file_paths_in_album(pool, album.id).await?;
        AlbumRepository::delete_album(pool, album.id).await?;
        media.remove_all(&files).await;

        log::info!(
            "User {} deleted album {} with {} images",
            user.username,
            album.id,
            files.len()
        );
        Ok(())
    }

    /// Albums and images of `username` that the requester may see
    pub async fn user_page(
        pool: &DbPool,
        user: Option<&User>,
        username: &str,
    ) -> Result<UserPageResponse, GalleryError> {
        let owner = UserRepository::get_by_username(pool, username).await?;
        let viewer = Viewer::of(user);

        let albums = AlbumRepository::list_by_user(pool, owner.id, &viewer).await?;
        let images = ImageRepository::list_by_user(pool, owner.id, &viewer).await?;

        Ok(UserPageResponse {
            username: owner.username.clone(),
            url: owner.absolute_url(),
            albums: albums.iter().map(|a| a.to_response()).collect(),
            image_list: images.iter().map(|i| i.to_response()).collect(),
        })
    }
}
