// src/handlers/auth.rs
// DOCUMENTATION: Request identity extraction
// PURPOSE: Authentication happens upstream; the authenticated username arrives
// in the configured header and is resolved to a stored account here

use crate::config::{Config, DbPool};
use crate::db::UserRepository;
use crate::errors::GalleryError;
use crate::models::User;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

/// The requester, or anonymous
#[derive(Debug, Clone)]
pub struct Identity(pub Option<User>);

impl Identity {
    pub fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }

    /// 401 for anonymous requests
    pub fn require(self) -> Result<User, GalleryError> {
        self.0.ok_or(GalleryError::Unauthorized)
    }
}

impl FromRequest for Identity {
    type Error = GalleryError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let pool = req.app_data::<web::Data<DbPool>>().cloned();
        let header = req
            .app_data::<web::Data<Config>>()
            .map(|config| config.auth_header.clone())
            .unwrap_or_else(|| Config::default().auth_header);
        let username = req
            .headers()
            .get(header.as_str())
            .and_then(|h| h.to_str().ok())
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Box::pin(async move {
            let Some(username) = username else {
                return Ok(Identity(None));
            };
            let pool = pool.ok_or_else(|| {
                log::error!("Database pool is not registered");
                GalleryError::InternalError
            })?;

            let user = UserRepository::find_by_username(pool.get_ref(), &username).await?;
            if user.is_none() {
                log::warn!("Unknown user {:?} in identity header; treating as anonymous", username);
            }
            Ok(Identity(user))
        })
    }
}

/// Check the X-Admin-Token header against the configured token
pub fn verify_admin_token(req: &HttpRequest, config: &Config) -> Result<(), GalleryError> {
    let token = req
        .headers()
        .get("X-Admin-Token")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            log::warn!("Admin request without token");
            GalleryError::Unauthorized
        })?;

    if token != config.admin_token {
        log::warn!("Admin request with invalid token");
        return Err(GalleryError::Forbidden);
    }

    Ok(())
}
