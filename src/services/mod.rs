// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod access;
pub mod album_service;
pub mod image_service;
pub mod media_store;
pub mod places;
pub mod upload_form;

pub use album_service::*;
pub use image_service::*;
pub use media_store::*;
pub use places::*;
pub use upload_form::*;
