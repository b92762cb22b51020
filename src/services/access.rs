// src/services/access.rs
// DOCUMENTATION: Per-request authorization rules
// PURPOSE: Reading private content needs ownership or superuser; mutating
// needs ownership or superuser and otherwise looks like a missing resource

use crate::errors::GalleryError;
use crate::models::{Album, Image, User};

/// Whether `user` (None for anonymous) may read the album and its images
pub fn can_view_album(user: Option<&User>, album: &Album) -> bool {
    album.is_public || user.map_or(false, |u| u.is_superuser || album.is_owned_by(u))
}

/// 403 when the album is private and the requester is neither owner nor superuser
pub fn ensure_album_visible(user: Option<&User>, album: &Album) -> Result<(), GalleryError> {
    if can_view_album(user, album) {
        Ok(())
    } else {
        log::debug!(
            "Denied read of private album {} to {}",
            album.id,
            user.map_or("anonymous", |u| u.username.as_str())
        );
        Err(GalleryError::Forbidden)
    }
}

/// 404 unless `user` owns the album or is a superuser
pub fn ensure_album_editable(user: &User, album: &Album) -> Result<(), GalleryError> {
    if user.is_superuser || album.is_owned_by(user) {
        Ok(())
    } else {
        log::warn!("User {} tried to modify album {}", user.username, album.id);
        Err(GalleryError::NotFound(format!("album {}", album.id)))
    }
}

/// 404 unless `user` uploaded the image or is a superuser
pub fn ensure_image_editable(user: &User, image: &Image) -> Result<(), GalleryError> {
    if user.is_superuser || image.is_owned_by(user) {
        Ok(())
    } else {
        log::warn!("User {} tried to modify image {}", user.username, image.id);
        Err(GalleryError::NotFound(format!("image {}", image.id)))
    }
}
