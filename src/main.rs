// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, database, media store and start HTTP server

use actix_web::{middleware::Logger, App, HttpServer};
use dotenv::dotenv;
use imagestore::config::Config;
use imagestore::AppState;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();
    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    }

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            config.log_level.clone()
        } else {
            "info,actix_web=info,sqlx=warn".to_string()
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    log::info!("Starting imagestore...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Database pool, schema, media root and place directory
    let server_addr = format!("{}:{}", config.server_address, config.server_port);
    let state = match AppState::build(config).await {
        Ok(state) => state,
        Err(e) => {
            log::error!("Failed to initialize application: {:#}", e);
            std::process::exit(1);
        }
    };

    // 5. Start HTTP server
    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // State and routes
            .configure(|cfg| state.configure(cfg))
    })
    .bind(&server_addr)?
    .run()
    .await
}
