// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Re-export database components

pub mod album_repository;
pub mod image_repository;
pub mod place_repository;
pub mod schema;
pub mod tag_repository;
pub mod user_repository;

pub use album_repository::*;
pub use image_repository::*;
pub use place_repository::*;
pub use schema::init_schema;
pub use tag_repository::*;
pub use user_repository::*;
