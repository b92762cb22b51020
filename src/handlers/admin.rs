// src/handlers/admin.rs
// DOCUMENTATION: Admin handlers for account seeding
// PURPOSE: Mirror accounts from the account system; guarded by X-Admin-Token

use crate::config::{Config, DbPool};
use crate::db::UserRepository;
use crate::errors::GalleryError;
use crate::handlers::auth::verify_admin_token;
use crate::models::{CreateUserRequest, SuperuserRequest};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

/// POST /admin/users
/// Create an account
pub async fn create_user(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    body: web::Json<CreateUserRequest>,
) -> Result<impl Responder, GalleryError> {
    verify_admin_token(&req, &config)?;
    if let Err(e) = body.validate() {
        return Err(GalleryError::ValidationError(e.to_string()));
    }

    let user = UserRepository::create_user(pool.get_ref(), &body).await?;
    Ok(HttpResponse::Created().json(user))
}

/// POST /admin/users/{username}/superuser
/// Grant or revoke superuser
pub async fn set_superuser(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<SuperuserRequest>,
) -> Result<impl Responder, GalleryError> {
    verify_admin_token(&req, &config)?;

    let user = UserRepository::set_superuser(pool.get_ref(), &path, body.is_superuser).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Configuration for admin routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/users", web::post().to(create_user))
            .route("/users/{username}/superuser", web::post().to(set_superuser)),
    );
}
