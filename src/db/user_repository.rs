// src/db/user_repository.rs
// DOCUMENTATION: Account lookups and seeding

use crate::config::DbPool;
use crate::errors::{db_error, GalleryError};
use crate::models::{CreateUserRequest, User};
use chrono::Utc;
use uuid::Uuid;

pub struct UserRepository;

impl UserRepository {
    /// Insert a new account; usernames are unique
    pub async fn create_user(pool: &DbPool, req: &CreateUserRequest) -> Result<User, GalleryError> {
        let user = User {
            id: Uuid::new_v4(),
            username: req.username.clone(),
            email: req.email.clone(),
            is_superuser: req.is_superuser,
            created_at: Utc::now(),
        };

        let result = sqlx::query(
            r#"
            INSERT INTO users (id, username, email, is_superuser, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.is_superuser)
        .bind(user.created_at)
        .execute(pool)
        .await;

        match result {
            Ok(_) => {
                log::info!("Created user {} ({})", user.username, user.id);
                Ok(user)
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(
                GalleryError::AlreadyExists(format!("username {}", req.username)),
            ),
            Err(e) => Err(db_error("create user")(e)),
        }
    }

    pub async fn find_by_username(
        pool: &DbPool,
        username: &str,
    ) -> Result<Option<User>, GalleryError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(pool)
            .await
            .map_err(db_error("fetch user"))
    }

    pub async fn get_by_username(pool: &DbPool, username: &str) -> Result<User, GalleryError> {
        Self::find_by_username(pool, username)
            .await?
            .ok_or_else(|| GalleryError::NotFound(format!("user {}", username)))
    }

    /// Flip the superuser flag and return the updated account
    pub async fn set_superuser(
        pool: &DbPool,
        username: &str,
        is_superuser: bool,
    ) -> Result<User, GalleryError> {
        let result = sqlx::query("UPDATE users SET is_superuser = ? WHERE username = ?")
            .bind(is_superuser)
            .bind(username)
            .execute(pool)
            .await
            .map_err(db_error("update user"))?;

        if result.rows_affected() == 0 {
            return Err(GalleryError::NotFound(format!("user {}", username)));
        }

        log::info!("Set is_superuser={} for {}", is_superuser, username);
        Self::get_by_username(pool, username).await
    }
}
