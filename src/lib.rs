// src/lib.rs
// DOCUMENTATION: Library root shared by the server binary, tools and tests
// PURPOSE: Expose layers and wire application state into actix-web

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;

use actix_web::web;
use anyhow::Context;
use config::{Config, DbPool};
use errors::GalleryError;
use services::{MediaStore, PlaceDirectory, PlaceHandle, SqlPlaceDirectory};
use std::sync::Arc;

/// Everything a request handler can extract via `web::Data`
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Config,
    pub media: MediaStore,
    pub places: PlaceHandle,
}

impl AppState {
    /// Connect, create the schema, prepare the media root and inject the
    /// SQL place directory when places are enabled
    pub async fn build(config: Config) -> anyhow::Result<Self> {
        let pool = config::init_db_pool(&config)
            .await
            .context("failed to connect to database")?;
        db::init_schema(&pool)
            .await
            .context("failed to create schema")?;

        let media = MediaStore::new(config.media_root.clone());
        media.init().await.context("failed to prepare media root")?;

        let places: PlaceHandle = if config.places_enabled {
            log::info!("Place directory enabled");
            let directory: Arc<dyn PlaceDirectory> = Arc::new(SqlPlaceDirectory::new(pool.clone()));
            Some(directory)
        } else {
            None
        };

        Ok(AppState {
            pool,
            config,
            media,
            places,
        })
    }

    /// Swap the injected place directory
    pub fn with_places(mut self, places: PlaceHandle) -> Self {
        self.places = places;
        self
    }

    /// Register state, extractor limits and every route
    pub fn configure(self, cfg: &mut web::ServiceConfig) {
        let upload_limit = self.config.max_upload_bytes;

        cfg.app_data(web::Data::new(self.pool))
            .app_data(web::Data::new(self.config))
            .app_data(web::Data::new(self.media))
            .app_data(web::Data::new(self.places))
            .app_data(web::PayloadConfig::new(upload_limit))
            .app_data(web::FormConfig::default().error_handler(|err, _| {
                GalleryError::InvalidInput(err.to_string()).into()
            }))
            .app_data(web::JsonConfig::default().error_handler(|err, _| {
                GalleryError::InvalidInput(err.to_string()).into()
            }))
            .app_data(web::PathConfig::default().error_handler(|err, _| {
                GalleryError::NotFound(err.to_string()).into()
            }));

        handlers::health_config(cfg);
        handlers::images_config(cfg);
        handlers::albums_config(cfg);
        handlers::users_config(cfg);
        handlers::tags_config(cfg);
        handlers::places_config(cfg);
        handlers::admin_config(cfg);
    }
}
