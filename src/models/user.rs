// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::{AlbumResponse, ImageResponse};

/// Account mirrored from the upstream account system
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn absolute_url(&self) -> String {
        user_url(&self.username)
    }
}

pub fn user_url(username: &str) -> String {
    format!("/users/{}", username)
}

/// Request to seed an account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 150))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[serde(default)]
    pub is_superuser: bool,
}

/// Request to toggle the superuser flag
#[derive(Debug, Clone, Deserialize)]
pub struct SuperuserRequest {
    pub is_superuser: bool,
}

/// Per-user page: the albums and images the requester may see
#[derive(Debug, Clone, Serialize)]
pub struct UserPageResponse {
    pub username: String,
    pub url: String,
    pub albums: Vec<AlbumResponse>,
    pub image_list: Vec<ImageResponse>,
}

/// Who is asking; drives the visibility filter of every listing query
#[derive(Debug, Clone, Copy, Default)]
pub struct Viewer {
    pub user_id: Option<Uuid>,
    pub is_superuser: bool,
}

impl Viewer {
    pub fn of(user: Option<&User>) -> Self {
        match user {
            Some(user) => Viewer {
                user_id: Some(user.id),
                is_superuser: user.is_superuser,
            },
            None => Viewer::default(),
        }
    }
}
