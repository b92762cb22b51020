// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components

pub mod admin;
pub mod albums;
pub mod auth;
pub mod health;
pub mod images;
pub mod places;
pub mod tags;
pub mod users;

pub use admin::config as admin_config;
pub use albums::config as albums_config;
pub use auth::Identity;
pub use health::config as health_config;
pub use images::config as images_config;
pub use places::config as places_config;
pub use tags::config as tags_config;
pub use users::config as users_config;
