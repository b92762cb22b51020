// src/handlers/users.rs
// DOCUMENTATION: Per-user gallery page

use crate::config::DbPool;
use crate::errors::GalleryError;
use crate::handlers::auth::Identity;
use crate::services::AlbumService;
use actix_web::{web, HttpResponse, Responder};

/// GET /users/{username}
/// 200 even when the user has no albums; unknown usernames are 404
pub async fn user_page(
    pool: web::Data<DbPool>,
    identity: Identity,
    path: web::Path<String>,
) -> Result<impl Responder, GalleryError> {
    let page = AlbumService::user_page(pool.get_ref(), identity.user(), &path).await?;
    Ok(HttpResponse::Ok().json(page))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/users/{username}", web::get().to(user_page));
}
