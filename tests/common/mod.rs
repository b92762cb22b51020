#![allow(dead_code)]

use actix_web::http::header;
use actix_web::test::TestRequest;
use imagestore::config::{Config, DbPool};
use imagestore::db::{AlbumRepository, UserRepository};
use imagestore::models::{Album, CreateUserRequest, User};
use imagestore::AppState;
use serde_json::Value;
use tempfile::TempDir;
use uuid::Uuid;

pub const AUTH_HEADER: &str = "X-Remote-User";
pub const BOUNDARY: &str = "imagestore-test-boundary";

/// Smallest valid PNG: 1x1, grayscale+alpha
pub const PNG_1X1: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x04, 0x00, 0x00, 0x00, 0xb5,
    0x1c, 0x0c, 0x02, 0x00, 0x00, 0x00, 0x0b, 0x49, 0x44, 0x41, 0x54, 0x78, 0xda, 0x63, 0x64,
    0x60, 0x00, 0x00, 0x00, 0x06, 0x00, 0x02, 0x30, 0x81, 0xd0, 0x2f, 0x00, 0x00, 0x00, 0x00,
    0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

/// One isolated app per test: in-memory database, temporary media root,
/// a user "zeus" and his public album "test album"
pub struct Fixture {
    pub state: AppState,
    pub user: User,
    pub album: Album,
    pub media: TempDir,
}

impl Fixture {
    pub async fn new() -> Self {
        Self::with_places(true).await
    }

    pub async fn with_places(places_enabled: bool) -> Self {
        let media = tempfile::tempdir().expect("failed to create media dir");
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            media_root: media.path().to_path_buf(),
            places_enabled,
            ..Config::default()
        };
        let state = AppState::build(config)
            .await
            .expect("failed to build app state");

        let user = create_user(&state.pool, "zeus", false).await;
        let album = AlbumRepository::create_album(&state.pool, user.id, "test album", true)
            .await
            .expect("failed to create album");

        Fixture {
            state,
            user,
            album,
            media,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.state.pool
    }
}

pub async fn create_user(pool: &DbPool, username: &str, is_superuser: bool) -> User {
    UserRepository::create_user(
        pool,
        &CreateUserRequest {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            is_superuser,
        },
    )
    .await
    .expect("failed to create user")
}

pub fn as_user(req: TestRequest, username: &str) -> TestRequest {
    req.insert_header((AUTH_HEADER, username))
}

pub fn multipart_body(fields: &[(&str, &str)], image: Option<&[u8]>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(bytes) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"test_img.png\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Multipart POST by `username` against the image form contract
pub fn multipart_post(
    uri: &str,
    username: &str,
    fields: &[(&str, &str)],
    image: Option<&[u8]>,
) -> TestRequest {
    as_user(TestRequest::post().uri(uri), username)
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(multipart_body(fields, image))
}

/// Upload request into `album` with optional extra fields
pub fn upload_request(username: &str, album: Uuid, extra: &[(&str, &str)]) -> TestRequest {
    let album = album.to_string();
    let mut fields: Vec<(&str, &str)> = vec![("album", album.as_str())];
    fields.extend_from_slice(extra);
    multipart_post("/upload", username, &fields, Some(PNG_1X1))
}

pub async fn count(pool: &DbPool, sql: &str) -> i64 {
    sqlx::query_scalar(sql)
        .fetch_one(pool)
        .await
        .expect("count query failed")
}

pub fn json_uuid(value: &Value) -> Uuid {
    Uuid::parse_str(value.as_str().expect("expected a string id")).expect("expected a uuid")
}
