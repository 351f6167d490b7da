//! Database migration command.
//!
//! Runs the migrations embedded from `crates/server/migrations/`. Session
//! storage is not covered here; the server migrates its own session schema
//! at startup.

use super::CliError;

/// Run the application database migrations.
pub async fn run() -> Result<(), CliError> {
    let pool = super::connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
