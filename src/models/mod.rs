// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod album;
pub mod image;
pub mod place;
pub mod tag;
pub mod user;

pub use album::*;
pub use image::*;
pub use place::*;
pub use tag::*;
pub use user::*;
