//! Admin account management command.
//!
//! Admin accounts are created here and nowhere else; self-service
//! registration on the web always produces customer accounts.

use orderdesk_core::Username;
use orderdesk_server::db::users::UserRepository;
use orderdesk_server::services::auth::hash_password;

use super::CliError;

/// Create a new admin account.
pub async fn create(username: &str, password: &str) -> Result<(), CliError> {
    let username =
        Username::parse(username).map_err(|e| CliError::InvalidInput(e.to_string()))?;

    if password.len() < 8 {
        return Err(CliError::InvalidInput(
            "password must be at least 8 characters".to_string(),
        ));
    }

    let password_hash = hash_password(password)
        .map_err(|e| CliError::InvalidInput(e.to_string()))?;

    let pool = super::connect().await?;
    let users = UserRepository::new(&pool);

    if users.get_by_username(&username).await?.is_some() {
        return Err(CliError::InvalidInput(format!(
            "user already exists: {username}"
        )));
    }

    let user = users.create_admin(&username, &password_hash).await?;

    tracing::info!("Admin account created! ID: {}, Username: {}", user.id, user.username);

    Ok(())
}
