// src/handlers/places.rs
// DOCUMENTATION: HTTP handlers for the optional place directory
// PURPOSE: Both routes answer 404 when no directory is injected

use crate::config::DbPool;
use crate::errors::GalleryError;
use crate::handlers::auth::Identity;
use crate::models::CreatePlaceRequest;
use crate::services::{PlaceHandle, PlaceService};
use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

/// POST /places
/// Register a place that uploads can reference by name
pub async fn create_place(
    places: web::Data<PlaceHandle>,
    identity: Identity,
    req: web::Json<CreatePlaceRequest>,
) -> Result<impl Responder, GalleryError> {
    identity.require()?;
    if let Err(e) = req.validate() {
        return Err(GalleryError::ValidationError(e.to_string()));
    }

    let place = PlaceService::create_place(places.get_ref(), req.into_inner()).await?;
    Ok(HttpResponse::Created().json(place.to_response()))
}

/// GET /places/{id}
/// Place with the visible images located there
pub async fn get_place(
    pool: web::Data<DbPool>,
    places: web::Data<PlaceHandle>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> Result<impl Responder, GalleryError> {
    let detail = PlaceService::place_detail(
        pool.get_ref(),
        places.get_ref(),
        identity.user(),
        path.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(detail))
}

/// Configuration for place routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/places")
            .route("", web::post().to(create_place))
            .route("/{id}", web::get().to(get_place)),
    );
}
