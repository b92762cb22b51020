// src/models/album.rs
// DOCUMENTATION: Album records, form payloads and API responses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::{ImageResponse, User};

/// Album row joined with its owner's username and image count
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Album {
    pub id: Uuid,
    pub name: String,
    pub user_id: Uuid,
    pub is_public: bool,
    /// Cover image; falls back to the first image when unset
    pub head_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Owner username (joined from users)
    pub username: String,

    /// Number of images in the album
    pub image_count: i64,
}

impl Album {
    pub fn absolute_url(&self) -> String {
        album_url(self.id)
    }

    pub fn is_owned_by(&self, user: &User) -> bool {
        self.user_id == user.id
    }

    pub fn to_response(&self) -> AlbumResponse {
        AlbumResponse {
            id: self.id,
            name: self.name.clone(),
            owner: self.username.clone(),
            is_public: self.is_public,
            head_id: self.head_id,
            image_count: self.image_count,
            url: self.absolute_url(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

pub fn album_url(id: Uuid) -> String {
    format!("/albums/{}", id)
}

/// Submitted album form (create and update)
/// DOCUMENTATION: `is_public` defaults to true on create and is left
/// unchanged on update when omitted
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AlbumForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[serde(default)]
    pub is_public: Option<bool>,

    /// Cover image; must be an image of this album. Submitted blank to unset.
    #[serde(default)]
    pub head: Option<String>,
}

impl AlbumForm {
    /// `None` when the field was omitted, `Some(None)` when submitted blank
    pub fn head_choice(&self) -> Result<Option<Option<Uuid>>, uuid::Error> {
        match self.head.as_deref().map(str::trim) {
            None => Ok(None),
            Some("") => Ok(Some(None)),
            Some(raw) => Uuid::parse_str(raw).map(|id| Some(Some(id))),
        }
    }
}

/// Album DTO for API responses
#[derive(Debug, Clone, Serialize)]
pub struct AlbumResponse {
    pub id: Uuid,
    pub name: String,
    pub owner: String,
    pub is_public: bool,
    pub head_id: Option<Uuid>,
    pub image_count: i64,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Album detail page: the album plus its images
#[derive(Debug, Clone, Serialize)]
pub struct AlbumDetailResponse {
    pub album: AlbumResponse,
    pub head: Option<ImageResponse>,
    pub image_list: Vec<ImageResponse>,
}

/// Field values pre-filled into the album form
#[derive(Debug, Clone, Serialize)]
pub struct AlbumFormFields {
    pub name: String,
    pub is_public: bool,
    pub head: Option<Uuid>,
}

/// Form descriptor returned by GET on create/update routes
#[derive(Debug, Clone, Serialize)]
pub struct AlbumFormResponse {
    pub action: String,
    pub method: &'static str,
    pub fields: AlbumFormFields,
}

impl AlbumFormResponse {
    pub fn blank() -> Self {
        AlbumFormResponse {
            action: "/albums/create".to_string(),
            method: "post",
            fields: AlbumFormFields {
                name: String::new(),
                is_public: true,
                head: None,
            },
        }
    }

    pub fn for_album(album: &Album) -> Self {
        AlbumFormResponse {
            action: format!("{}/update", album.absolute_url()),
            method: "post",
            fields: AlbumFormFields {
                name: album.name.clone(),
                is_public: album.is_public,
                head: album.head_id,
            },
        }
    }
}

/// Choice offered in the image form's album selector
#[derive(Debug, Clone, Serialize)]
pub struct AlbumChoice {
    pub id: Uuid,
    pub name: String,
}

impl From<&Album> for AlbumChoice {
    fn from(album: &Album) -> Self {
        AlbumChoice {
            id: album.id,
            name: album.name.clone(),
        }
    }
}
