// src/bin/create_user.rs
// Seed an account mirrored from the account system.
//
// usage: create_user <username> <email> [--superuser]

use anyhow::{bail, Context};
use dotenv::dotenv;
use imagestore::config::{init_db_pool, Config};
use imagestore::db::{init_schema, UserRepository};
use imagestore::models::CreateUserRequest;
use std::env;
use validator::Validate;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let is_superuser = args.iter().any(|a| a == "--superuser");
    let positional: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();

    let (username, email) = match positional.as_slice() {
        [username, email] => (username.to_string(), email.to_string()),
        _ => bail!("usage: create_user <username> <email> [--superuser]"),
    };

    let request = CreateUserRequest {
        username,
        email,
        is_superuser,
    };
    request.validate().context("invalid account")?;

    let config = Config::from_env();
    let pool = init_db_pool(&config)
        .await
        .with_context(|| format!("failed to open {}", config.database_url))?;
    init_schema(&pool).await.context("failed to create schema")?;

    let user = UserRepository::create_user(&pool, &request).await?;
    println!(
        "created {} ({}){}",
        user.username,
        user.id,
        if user.is_superuser { " [superuser]" } else { "" }
    );
    Ok(())
}
