// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection string
    /// Format: sqlite://path/to/file.db or sqlite::memory:
    pub database_url: String,

    /// Server bind address (e.g., "127.0.0.1")
    pub server_address: String,

    /// Server listen port (default 8000)
    pub server_port: u16,

    /// Environment: development, staging, production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Admin authentication token (for account seeding endpoints)
    pub admin_token: String,

    /// Maximum connections in database pool
    pub db_max_connections: u32,

    /// Connection timeout in seconds
    pub db_connection_timeout: u64,

    /// Directory where uploaded image payloads are written
    pub media_root: PathBuf,

    /// Largest accepted request body for uploads, in bytes
    pub max_upload_bytes: usize,

    /// Header carrying the username authenticated upstream
    pub auth_header: String,

    /// Whether the place directory is wired into the app
    pub places_enabled: bool,

    /// Default listing page size
    pub page_size: i64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: "sqlite://imagestore.db".to_string(),
            server_address: "127.0.0.1".to_string(),
            server_port: 8000,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            admin_token: "admin-token-dev".to_string(),
            db_max_connections: 10,
            db_connection_timeout: 30,
            media_root: PathBuf::from("media"),
            max_upload_bytes: 10 * 1024 * 1024,
            auth_header: "X-Remote-User".to_string(),
            places_enabled: true,
            page_size: 20,
        }
    }
}

fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment, falling back to defaults
    pub fn from_env() -> Self {
        dotenv().ok();
        let defaults = Config::default();

        Config {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),

            server_address: env::var("SERVER_ADDRESS").unwrap_or(defaults.server_address),

            server_port: parsed_or("SERVER_PORT", defaults.server_port),

            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),

            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),

            admin_token: env::var("ADMIN_TOKEN").unwrap_or(defaults.admin_token),

            db_max_connections: parsed_or("DB_MAX_CONNECTIONS", defaults.db_max_connections),

            db_connection_timeout: parsed_or(
                "DB_CONNECTION_TIMEOUT",
                defaults.db_connection_timeout,
            ),

            media_root: env::var("MEDIA_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.media_root),

            max_upload_bytes: parsed_or("MAX_UPLOAD_BYTES", defaults.max_upload_bytes),

            auth_header: env::var("AUTH_HEADER").unwrap_or(defaults.auth_header),

            places_enabled: parsed_or("PLACES_ENABLED", defaults.places_enabled),

            page_size: parsed_or("PAGE_SIZE", defaults.page_size),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures application can start safely
    pub fn validate(&self) -> Result<(), String> {
        if self.database_url.is_empty() {
            return Err("DATABASE_URL is required".to_string());
        }

        if self.page_size <= 0 {
            return Err("PAGE_SIZE must be positive".to_string());
        }

        if self.max_upload_bytes == 0 {
            return Err("MAX_UPLOAD_BYTES must be positive".to_string());
        }

        if self.admin_token == "admin-token-dev" && self.environment == "production" {
            log::warn!("ADMIN_TOKEN is still the development default");
        }

        Ok(())
    }
}
