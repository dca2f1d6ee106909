use anyhow::{Context, Result};

use crate::auth::{users, JwtAuth};
use crate::config::DaylogConfig;
use crate::db;

/// Mint a bearer token for the user and print it to stdout.
pub fn token(config: &DaylogConfig, user: Option<&str>) -> Result<()> {
    let jwt = JwtAuth::new(&config.auth.jwt_secret, config.auth.token_ttl_hours)?;

    let conn = db::open_database(config.resolved_db_path())?;
    let username = user.unwrap_or(&config.storage.default_user);
    let user = users::get_or_create_user(&conn, username)
        .with_context(|| format!("failed to resolve user '{username}'"))?;

    let token = jwt.issue_token(&user)?;
    tracing::info!(user = %user.username, ttl_hours = config.auth.token_ttl_hours, "token issued");

    println!("{token}");
    eprintln!(
        "Token for '{}' valid for {} hours. Send it as `Authorization: Bearer <token>`.",
        user.username, config.auth.token_ttl_hours
    );
    Ok(())
}
