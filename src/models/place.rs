// src/models/place.rs
// DOCUMENTATION: Places served by the optional place directory
// PURPOSE: Serialization models for place records, requests and detail pages

use chrono::{DateTime, Utc};
use geo_types::Point;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::ImageResponse;

/// Represents a place record from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Place {
    /// Unique identifier (UUID v4)
    pub id: Uuid,

    /// Display name, unique ignoring case; matched by `place_text`
    pub name: String,

    pub latitude: f64,

    pub longitude: f64,

    pub created_at: DateTime<Utc>,
}

impl Place {
    pub fn absolute_url(&self) -> String {
        place_url(self.id)
    }

    pub fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    pub fn to_response(&self) -> PlaceResponse {
        PlaceResponse {
            id: self.id,
            name: self.name.clone(),
            url: self.absolute_url(),
            location: geojson::Geometry::new(geojson::Value::from(&self.point())),
        }
    }
}

pub fn place_url(id: Uuid) -> String {
    format!("/places/{}", id)
}

/// Request DTO for creating a new place
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CreatePlaceRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

/// Place DTO for API responses; location is a GeoJSON point
#[derive(Debug, Clone, Serialize)]
pub struct PlaceResponse {
    pub id: Uuid,
    pub name: String,
    pub url: String,
    pub location: geojson::Geometry,
}

/// Place detail page listing the images taken there
#[derive(Debug, Clone, Serialize)]
pub struct PlaceDetailResponse {
    pub place: PlaceResponse,
    pub image_list: Vec<ImageResponse>,
}
