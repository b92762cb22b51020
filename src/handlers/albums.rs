// src/handlers/albums.rs
// DOCUMENTATION: HTTP handlers for album operations
// PURPOSE: Parse requests, call services, return responses

use crate::config::DbPool;
use crate::errors::GalleryError;
use crate::handlers::auth::Identity;
use crate::models::{AlbumForm, AlbumFormResponse};
use crate::services::{AlbumService, MediaStore};
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

/// GET /albums/create
/// Blank album form
pub async fn create_album_form(identity: Identity) -> Result<impl Responder, GalleryError> {
    identity.require()?;
    Ok(HttpResponse::Ok().json(AlbumFormResponse::blank()))
}

/// POST /albums/create
/// Create an album owned by the requester
pub async fn create_album(
    pool: web::Data<DbPool>,
    identity: Identity,
    form: web::Form<AlbumForm>,
) -> Result<impl Responder, GalleryError> {
    let user = identity.require()?;
    if let Err(e) = form.validate() {
        return Err(GalleryError::ValidationError(e.to_string()));
    }

    let album = AlbumService::create_album(pool.get_ref(), &user, form.into_inner()).await?;
    Ok(HttpResponse::Ok().json(album))
}

/// GET /albums/{id}
/// Album detail; private albums are 403 to anyone but owner and superusers
pub async fn get_album(
    pool: web::Data<DbPool>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> Result<impl Responder, GalleryError> {
    let album = AlbumService::get_album(pool.get_ref(), identity.user(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(album))
}

/// GET /albums/{id}/update
/// Pre-filled album form
pub async fn edit_album_form(
    pool: web::Data<DbPool>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> Result<impl Responder, GalleryError> {
    let user = identity.require()?;
    let form = AlbumService::edit_form(pool.get_ref(), &user, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(form))
}

/// POST /albums/{id}/update
/// Persist album edits
pub async fn update_album(
    pool: web::Data<DbPool>,
    identity: Identity,
    path: web::Path<Uuid>,
    form: web::Form<AlbumForm>,
) -> Result<impl Responder, GalleryError> {
    let user = identity.require()?;
    if let Err(e) = form.validate() {
        return Err(GalleryError::ValidationError(e.to_string()));
    }

    let album =
        AlbumService::update_album(pool.get_ref(), &user, path.into_inner(), form.into_inner())
            .await?;
    Ok(HttpResponse::Ok().json(album))
}

/// POST /albums/{id}/delete
/// Delete album and everything in it
pub async fn delete_album(
    pool: web::Data<DbPool>,
    media: web::Data<MediaStore>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> Result<impl Responder, GalleryError> {
    let user = identity.require()?;
    let id = path.into_inner();
    AlbumService::delete_album(pool.get_ref(), media.get_ref(), &user, id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "deleted": id,
        "redirect": user.absolute_url()
    })))
}

/// Configuration for album routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/albums")
            .route("/create", web::get().to(create_album_form))
            .route("/create", web::post().to(create_album))
            .route("/{id}", web::get().to(get_album))
            .route("/{id}/update", web::get().to(edit_album_form))
            .route("/{id}/update", web::post().to(update_album))
            .route("/{id}/delete", web::post().to(delete_album)),
    );
}
