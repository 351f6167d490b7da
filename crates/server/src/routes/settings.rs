//! Customer profile settings route handlers.
//!
//! Customers edit their own profile here; admins have no profile and get
//! 403. The form is multipart because of the optional profile picture.
//! Submissions re-render the page in place rather than redirecting, so the
//! saved notice and any error share one template.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::db::customers::{CustomerRepository, ProfileUpdate};
use crate::error::{AppError, Result};
use crate::middleware::RequireCustomer;
use crate::models::Customer;
use crate::state::AppState;

/// File extensions accepted for profile pictures.
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

// =============================================================================
// Template
// =============================================================================

/// Profile settings template.
#[derive(Template, WebTemplate)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub customer: Customer,
    pub saved: bool,
    pub error: Option<String>,
}

// =============================================================================
// Routes
// =============================================================================

async fn load_own_customer(state: &AppState, user: &crate::models::CurrentUser) -> Result<Customer> {
    let customer_id = user
        .customer_id
        .ok_or_else(|| AppError::Internal("customer account has no linked profile".to_string()))?;

    CustomerRepository::new(state.pool())
        .get_by_id(customer_id)
        .await?
        .ok_or_else(|| AppError::Internal("customer profile row is missing".to_string()))
}

/// Display the settings form, prefilled with the current profile.
pub async fn settings_page(
    State(state): State<AppState>,
    RequireCustomer(user): RequireCustomer,
) -> Result<Response> {
    let customer = load_own_customer(&state, &user).await?;

    Ok(SettingsTemplate {
        customer,
        saved: false,
        error: None,
    }
    .into_response())
}

/// Parsed multipart fields from the settings form.
#[derive(Debug, Default)]
struct SettingsForm {
    name: String,
    email: String,
    phone: String,
    /// Original filename and bytes of the uploaded picture, if any.
    picture: Option<(String, Vec<u8>)>,
}

async fn read_settings_form(mut multipart: Multipart) -> Result<SettingsForm> {
    let mut form = SettingsForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "name" => {
                form.name = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            "email" => {
                form.email = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            "phone" => {
                form.phone = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            "profile_pic" => {
                let filename = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                // Browsers send an empty file part when none was chosen.
                if let Some(filename) = filename
                    && !bytes.is_empty()
                {
                    form.picture = Some((filename, bytes.to_vec()));
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Handle the settings form submission.
///
/// The picture is only replaced when a new file was uploaded; leaving the
/// file input empty keeps the existing one.
pub async fn update_settings(
    State(state): State<AppState>,
    RequireCustomer(user): RequireCustomer,
    multipart: Multipart,
) -> Result<Response> {
    let customer = load_own_customer(&state, &user).await?;
    let form = read_settings_form(multipart).await?;

    let name = form.name.trim().to_string();
    if name.is_empty() {
        return Ok(SettingsTemplate {
            customer,
            saved: false,
            error: Some("Name is required".to_string()),
        }
        .into_response());
    }

    let upload_dir = state.config().upload_dir();
    let profile_pic = match &form.picture {
        Some((original, bytes)) => {
            let Some(stored) = stored_filename(original) else {
                return Ok(SettingsTemplate {
                    customer,
                    saved: false,
                    error: Some("Profile picture must be an image file".to_string()),
                }
                .into_response());
            };

            store_picture(&upload_dir, &stored, bytes).await?;
            Some(stored)
        }
        None => None,
    };

    let email = form.email.trim();
    let phone = form.phone.trim();
    let update = ProfileUpdate {
        name,
        email: (!email.is_empty()).then(|| email.to_string()),
        phone: (!phone.is_empty()).then(|| phone.to_string()),
        profile_pic,
    };

    let customer = match CustomerRepository::new(state.pool())
        .update_profile(customer.id, &update)
        .await
    {
        Ok(customer) => customer,
        Err(e) => {
            // Don't leave the upload orphaned when the row update fails.
            if let Some(stored) = &update.profile_pic {
                discard_picture(&upload_dir, stored).await;
            }
            return Err(e.into());
        }
    };
    tracing::info!(customer_id = %customer.id, "Profile updated");

    Ok(SettingsTemplate {
        customer,
        saved: true,
        error: None,
    }
    .into_response())
}

/// Write an uploaded picture under the upload directory.
async fn store_picture(dir: &std::path::Path, stored: &str, bytes: &[u8]) -> Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(dir.join(stored), bytes).await?;
    Ok(())
}

/// Remove a stored picture whose profile update did not go through.
async fn discard_picture(dir: &std::path::Path, stored: &str) {
    if let Err(e) = tokio::fs::remove_file(dir.join(stored)).await {
        tracing::warn!(file = stored, error = %e, "Failed to remove unused upload");
    }
}

/// Build the stored filename for an upload: a fresh UUID plus the original
/// extension. Returns `None` when the extension isn't an accepted image type.
fn stored_filename(original: &str) -> Option<String> {
    let extension = std::path::Path::new(original)
        .extension()?
        .to_str()?
        .to_lowercase();

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return None;
    }

    Some(format!("{}.{extension}", Uuid::new_v4()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_filename_keeps_extension_only() {
        let stored = stored_filename("../../etc/passwd.PNG").unwrap();
        assert!(stored.ends_with(".png"));
        assert!(!stored.contains('/'));
        assert!(!stored.contains(".."));
    }

    #[test]
    fn test_stored_filename_rejects_non_images() {
        assert!(stored_filename("script.sh").is_none());
        assert!(stored_filename("archive.tar.gz").is_none());
        assert!(stored_filename("noextension").is_none());
    }

    #[test]
    fn test_stored_filenames_are_unique() {
        let a = stored_filename("me.jpg").unwrap();
        let b = stored_filename("me.jpg").unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_discard_picture_removes_the_file() {
        let dir = std::env::temp_dir().join(format!("orderdesk-uploads-{}", Uuid::new_v4()));
        let stored = stored_filename("me.jpg").unwrap();

        store_picture(&dir, &stored, b"not really a jpeg").await.unwrap();
        assert!(dir.join(&stored).exists());

        discard_picture(&dir, &stored).await;
        assert!(!dir.join(&stored).exists());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
