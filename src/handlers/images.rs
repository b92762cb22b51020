// src/handlers/images.rs
// DOCUMENTATION: HTTP handlers for image operations and the index
// PURPOSE: Parse requests (multipart for forms), call services, return responses

use crate::config::{Config, DbPool};
use crate::errors::GalleryError;
use crate::handlers::auth::Identity;
use crate::models::{ImageForm, PageQuery};
use crate::services::{parse_image_form, ImageService, MediaStore, PlaceHandle};
use actix_web::{http::header, web, HttpRequest, HttpResponse, Responder};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

/// Decode and validate a multipart image form
async fn read_image_form(req: &HttpRequest, body: web::Bytes) -> Result<ImageForm, GalleryError> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| GalleryError::InvalidInput("missing content-type header".to_string()))?;

    let form = parse_image_form(content_type, body).await?;
    if let Err(e) = form.validate() {
        return Err(GalleryError::ValidationError(e.to_string()));
    }
    Ok(form)
}

/// GET /
/// Every visible image, newest first
pub async fn index(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    identity: Identity,
    query: web::Query<PageQuery>,
) -> Result<impl Responder, GalleryError> {
    let result =
        ImageService::list_images(pool.get_ref(), identity.user(), &query, config.page_size)
            .await?;
    Ok(HttpResponse::Ok().json(result))
}

/// GET /upload
/// Blank upload form
pub async fn upload_form(
    pool: web::Data<DbPool>,
    places: web::Data<PlaceHandle>,
    identity: Identity,
) -> Result<impl Responder, GalleryError> {
    let user = identity.require()?;
    let form = ImageService::upload_form(pool.get_ref(), places.get_ref(), &user).await?;
    Ok(HttpResponse::Ok().json(form))
}

/// POST /upload
/// Upload an image into one of the requester's albums
pub async fn upload_image(
    pool: web::Data<DbPool>,
    media: web::Data<MediaStore>,
    places: web::Data<PlaceHandle>,
    identity: Identity,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<impl Responder, GalleryError> {
    let user = identity.require()?;
    let form = read_image_form(&req, body).await?;

    let image = ImageService::upload_image(
        pool.get_ref(),
        media.get_ref(),
        places.get_ref(),
        &user,
        form,
    )
    .await?;
    Ok(HttpResponse::Ok().json(json!({ "image": image })))
}

/// GET /images/{id}
pub async fn get_image(
    pool: web::Data<DbPool>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> Result<impl Responder, GalleryError> {
    let image = ImageService::get_image(pool.get_ref(), identity.user(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(image))
}

/// GET /images/{id}/file
/// Stored payload with its content type
pub async fn get_image_file(
    pool: web::Data<DbPool>,
    media: web::Data<MediaStore>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> Result<impl Responder, GalleryError> {
    let (bytes, content_type) = ImageService::image_file(
        pool.get_ref(),
        media.get_ref(),
        identity.user(),
        path.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().content_type(content_type).body(bytes))
}

/// GET /images/{id}/update
/// Pre-filled image form
pub async fn edit_image_form(
    pool: web::Data<DbPool>,
    places: web::Data<PlaceHandle>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> Result<impl Responder, GalleryError> {
    let user = identity.require()?;
    let form =
        ImageService::edit_form(pool.get_ref(), places.get_ref(), &user, path.into_inner())
            .await?;
    Ok(HttpResponse::Ok().json(form))
}

/// POST /images/{id}/update
/// Apply image edits; omitted fields are unchanged
pub async fn update_image(
    pool: web::Data<DbPool>,
    media: web::Data<MediaStore>,
    places: web::Data<PlaceHandle>,
    identity: Identity,
    path: web::Path<Uuid>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<impl Responder, GalleryError> {
    let user = identity.require()?;
    let form = read_image_form(&req, body).await?;

    let image = ImageService::update_image(
        pool.get_ref(),
        media.get_ref(),
        places.get_ref(),
        &user,
        path.into_inner(),
        form,
    )
    .await?;
    Ok(HttpResponse::Ok().json(json!({ "image": image })))
}

/// POST /images/{id}/delete
/// Owner-only; anyone else gets 404
pub async fn delete_image(
    pool: web::Data<DbPool>,
    media: web::Data<MediaStore>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> Result<impl Responder, GalleryError> {
    let user = identity.require()?;
    let id = path.into_inner();
    ImageService::delete_image(pool.get_ref(), media.get_ref(), &user, id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "deleted": id,
        "redirect": user.absolute_url()
    })))
}

/// Configuration for image routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/upload", web::get().to(upload_form))
        .route("/upload", web::post().to(upload_image))
        .service(
            web::scope("/images")
                .route("/{id}", web::get().to(get_image))
                .route("/{id}/file", web::get().to(get_image_file))
                .route("/{id}/update", web::get().to(edit_image_form))
                .route("/{id}/update", web::post().to(update_image))
                .route("/{id}/delete", web::post().to(delete_image)),
        );
}
