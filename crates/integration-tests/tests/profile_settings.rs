//! Integration tests for the customer profile settings page.
//!
//! Requires a running server and database; see the crate README.
//!
//! Run with: cargo test -p orderdesk-integration-tests -- --ignored

use reqwest::{Client, StatusCode, multipart, redirect};
use uuid::Uuid;

fn base_url() -> String {
    std::env::var("ORDERDESK_TEST_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:3000".to_string())
}

fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

async fn new_customer() -> Client {
    let client = client();
    let username = format!("user{}", Uuid::new_v4().simple())[..20].to_string();
    let password = "integration-pass-1";

    let resp = client
        .post(format!("{}/register", base_url()))
        .form(&[
            ("username", username.as_str()),
            ("password", password),
            ("password_confirm", password),
        ])
        .send()
        .await
        .expect("Failed to register");
    assert!(resp.status().is_redirection());

    let resp = client
        .post(format!("{}/login", base_url()))
        .form(&[("username", username.as_str()), ("password", password)])
        .send()
        .await
        .expect("Failed to login");
    assert!(resp.status().is_redirection());

    client
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_profile_update_persists() {
    let client = new_customer().await;
    let new_name = format!("Renamed {}", Uuid::new_v4().simple());

    let form = multipart::Form::new()
        .text("name", new_name.clone())
        .text("email", "me@example.com")
        .text("phone", "555-0100");

    let resp = client
        .post(format!("{}/account", base_url()))
        .multipart(form)
        .send()
        .await
        .expect("Failed to update profile");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = client
        .get(format!("{}/account", base_url()))
        .send()
        .await
        .expect("Failed to load settings")
        .text()
        .await
        .expect("Failed to read settings");
    assert!(body.contains(&new_name));
    assert!(body.contains("me@example.com"));
    assert!(body.contains("555-0100"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_profile_update_requires_name() {
    let client = new_customer().await;

    let form = multipart::Form::new()
        .text("name", "   ")
        .text("email", "me@example.com");

    let resp = client
        .post(format!("{}/account", base_url()))
        .multipart(form)
        .send()
        .await
        .expect("Failed to submit");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Name is required"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_profile_picture_upload() {
    let client = new_customer().await;

    // Minimal 1x1 PNG
    let png: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
        0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
        0x00, 0x1F, 0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78,
        0x9C, 0x63, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00,
        0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    let form = multipart::Form::new()
        .text("name", "Picture Tester")
        .text("email", "")
        .text("phone", "")
        .part(
            "profile_pic",
            multipart::Part::bytes(png.to_vec())
                .file_name("avatar.png")
                .mime_str("image/png")
                .expect("Invalid mime"),
        );

    let resp = client
        .post(format!("{}/account", base_url()))
        .multipart(form)
        .send()
        .await
        .expect("Failed to upload");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("/static/uploads/"), "picture should be shown");
    assert!(body.contains(".png"));
}
