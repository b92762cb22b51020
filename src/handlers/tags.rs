// src/handlers/tags.rs
// DOCUMENTATION: Tag listing handler

use crate::config::DbPool;
use crate::errors::GalleryError;
use crate::handlers::auth::Identity;
use crate::services::ImageService;
use actix_web::{web, HttpResponse, Responder};

/// GET /tags/{tag}
/// Visible images carrying the tag
pub async fn list_tagged(
    pool: web::Data<DbPool>,
    identity: Identity,
    path: web::Path<String>,
) -> Result<impl Responder, GalleryError> {
    let tag = path.into_inner();
    let result = ImageService::list_by_tag(pool.get_ref(), identity.user(), tag.trim()).await?;
    Ok(HttpResponse::Ok().json(result))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/tags/{tag}", web::get().to(list_tagged));
}
