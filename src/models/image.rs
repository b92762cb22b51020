// src/models/image.rs
// DOCUMENTATION: Image records, upload/edit payloads and API responses
// PURPOSE: Shared by the image repository, image service and handlers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::{edit_string_for_tags, place_url, AlbumChoice, AlbumResponse, User};

/// Represents a stored image joined with its uploader's username
/// DOCUMENTATION: `tags` is not a column; repositories fill it from image_tags
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Image {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub album_id: Uuid,
    pub user_id: Uuid,

    /// Path of the payload relative to the media root
    pub file_path: String,
    pub content_type: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,

    /// Place reference when the place directory is enabled
    pub place_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Uploader username (joined from users)
    pub username: String,

    #[sqlx(skip)]
    pub tags: Vec<String>,
}

impl Image {
    pub fn absolute_url(&self) -> String {
        image_url(self.id)
    }

    pub fn is_owned_by(&self, user: &User) -> bool {
        self.user_id == user.id
    }

    pub fn to_response(&self) -> ImageResponse {
        ImageResponse {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            album_id: self.album_id,
            owner: self.username.clone(),
            url: self.absolute_url(),
            file_url: format!("{}/file", self.absolute_url()),
            width: self.width,
            height: self.height,
            tags: self.tags.clone(),
            place_id: self.place_id,
            place_url: self.place_id.map(place_url),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

pub fn image_url(id: Uuid) -> String {
    format!("/images/{}", id)
}

/// Values needed to insert a freshly uploaded image
#[derive(Debug, Clone)]
pub struct NewImage {
    pub title: String,
    pub description: Option<String>,
    pub album_id: Uuid,
    pub user_id: Uuid,
    pub file_path: String,
    pub content_type: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub place_id: Option<Uuid>,
}

/// File part of a multipart image form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Parsed multipart image form (upload and update)
/// DOCUMENTATION: every field is optional at parse time; the image service
/// decides which are required for the operation at hand
#[derive(Debug, Clone, Default, Validate)]
pub struct ImageForm {
    #[validate(length(max = 100))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub album: Option<Uuid>,

    pub tags: Option<String>,

    #[validate(length(max = 255))]
    pub place_text: Option<String>,

    pub image: Option<UploadedFile>,
}

/// Image DTO for API responses
#[derive(Debug, Clone, Serialize)]
pub struct ImageResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub album_id: Uuid,
    pub owner: String,
    pub url: String,
    pub file_url: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub tags: Vec<String>,
    pub place_id: Option<Uuid>,
    pub place_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Image detail page with album context and neighbours within the album
#[derive(Debug, Clone, Serialize)]
pub struct ImageDetailResponse {
    pub image: ImageResponse,
    pub album: AlbumResponse,
    pub previous: Option<String>,
    pub next: Option<String>,
}

/// Paginated image listing
#[derive(Debug, Clone, Serialize)]
pub struct ImageListResponse {
    pub image_list: Vec<ImageResponse>,
    pub total_count: i64,
    pub page: i64,
    pub limit: i64,
    pub has_more: bool,
}

/// Query parameters for paginated listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    /// Page number (1-based)
    pub page: Option<i64>,

    /// Results per page
    pub limit: Option<i64>,
}

impl PageQuery {
    /// Returns (page, limit, offset), clamped to sane values
    pub fn resolve(&self, default_limit: i64) -> (i64, i64, i64) {
        let limit = self.limit.unwrap_or(default_limit).clamp(1, 100);
        let page = self.page.unwrap_or(1).max(1);
        (page, limit, (page - 1) * limit)
    }
}

/// Field values pre-filled into the image form
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImageFormFields {
    pub title: String,
    pub description: String,
    pub album: Option<Uuid>,
    pub tags: String,
    pub place_text: String,
}

/// Form descriptor returned by GET on upload/update routes
#[derive(Debug, Clone, Serialize)]
pub struct ImageFormResponse {
    pub action: String,
    pub method: &'static str,
    pub enctype: &'static str,
    pub fields: ImageFormFields,
    pub albums: Vec<AlbumChoice>,
    pub places_enabled: bool,
}

impl ImageFormResponse {
    pub fn blank(albums: Vec<AlbumChoice>, places_enabled: bool) -> Self {
        ImageFormResponse {
            action: "/upload".to_string(),
            method: "post",
            enctype: "multipart/form-data",
            fields: ImageFormFields::default(),
            albums,
            places_enabled,
        }
    }

    pub fn for_image(
        image: &Image,
        place_name: Option<String>,
        albums: Vec<AlbumChoice>,
        places_enabled: bool,
    ) -> Self {
        ImageFormResponse {
            action: format!("{}/update", image.absolute_url()),
            method: "post",
            enctype: "multipart/form-data",
            fields: ImageFormFields {
                title: image.title.clone(),
                description: image.description.clone().unwrap_or_default(),
                album: Some(image.album_id),
                tags: edit_string_for_tags(&image.tags),
                place_text: place_name.unwrap_or_default(),
            },
            albums,
            places_enabled,
        }
    }
}
