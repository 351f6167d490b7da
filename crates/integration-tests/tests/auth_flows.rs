//! Integration tests for registration, login, and access control.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p orderdesk-server)
//! - An admin account (cargo run -p orderdesk-cli -- admin create ...)
//!
//! Run with: cargo test -p orderdesk-integration-tests -- --ignored

use reqwest::{Client, StatusCode, redirect};
use uuid::Uuid;

/// Base URL for the server under test (configurable via environment).
fn base_url() -> String {
    std::env::var("ORDERDESK_TEST_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A client that keeps cookies but never follows redirects, so tests can
/// assert on redirect targets directly.
fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Generate a unique username so runs don't collide.
fn fresh_username() -> String {
    format!("user{}", Uuid::new_v4().simple())[..20].to_string()
}

/// Test helper: register a customer account and return its credentials.
async fn register_customer(client: &Client) -> (String, String) {
    let username = fresh_username();
    let password = "integration-pass-1".to_string();

    let resp = client
        .post(format!("{}/register", base_url()))
        .form(&[
            ("username", username.as_str()),
            ("password", password.as_str()),
            ("password_confirm", password.as_str()),
        ])
        .send()
        .await
        .expect("Failed to register");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("Missing redirect location");
    assert!(location.starts_with("/login"), "got {location}");

    (username, password)
}

/// Test helper: log in and keep the session cookie on the client.
async fn login(client: &Client, username: &str, password: &str) {
    let resp = client
        .post(format!("{}/login", base_url()))
        .form(&[("username", username), ("password", password)])
        .send()
        .await
        .expect("Failed to login");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("Missing redirect location");
    assert_eq!(location, "/");
}

// ============================================================================
// Unauthenticated access
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_unauthenticated_user_is_redirected_to_login() {
    let client = client();

    for path in ["/", "/user", "/products", "/account", "/customer/1"] {
        let resp = client
            .get(format!("{}{path}", base_url()))
            .send()
            .await
            .expect("Request failed");

        assert!(resp.status().is_redirection(), "{path}: {}", resp.status());
        let location = resp
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .expect("Missing redirect location");
        assert_eq!(location, "/login", "{path} redirected to {location}");
    }
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_health_endpoints_are_public() {
    let client = client();

    let resp = client
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{}/health/ready", base_url()))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Registration and login
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_register_then_login() {
    let client = client();
    let (username, password) = register_customer(&client).await;
    login(&client, &username, &password).await;

    // Customers land on their own dashboard
    let resp = client
        .get(format!("{}/", base_url()))
        .send()
        .await
        .expect("Request failed");
    assert!(resp.status().is_redirection());
    assert_eq!(
        resp.headers().get("location").and_then(|v| v.to_str().ok()),
        Some("/user")
    );
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_duplicate_registration_is_rejected() {
    let client = client();
    let (username, password) = register_customer(&client).await;

    let resp = client
        .post(format!("{}/register", base_url()))
        .form(&[
            ("username", username.as_str()),
            ("password", password.as_str()),
            ("password_confirm", password.as_str()),
        ])
        .send()
        .await
        .expect("Failed to re-register");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("Missing redirect location");
    assert!(location.starts_with("/register?"), "got {location}");
    assert!(location.contains("error="));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_login_failure_message_is_uniform() {
    let client = client();
    let (username, _password) = register_customer(&client).await;

    // Wrong password for an existing user
    let resp = client
        .post(format!("{}/login", base_url()))
        .form(&[("username", username.as_str()), ("password", "wrong-pass-1")])
        .send()
        .await
        .expect("Login request failed");
    let existing_user_location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("Missing redirect location")
        .to_string();

    // Unknown user entirely
    let unknown = fresh_username();
    let resp = client
        .post(format!("{}/login", base_url()))
        .form(&[("username", unknown.as_str()), ("password", "wrong-pass-1")])
        .send()
        .await
        .expect("Login request failed");
    let unknown_user_location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("Missing redirect location")
        .to_string();

    // The two failure modes must be indistinguishable
    assert_eq!(existing_user_location, unknown_user_location);
    assert!(existing_user_location.contains("error="));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_logged_in_user_skips_auth_pages() {
    let client = client();
    let (username, password) = register_customer(&client).await;
    login(&client, &username, &password).await;

    for path in ["/login", "/register"] {
        let resp = client
            .get(format!("{}{path}", base_url()))
            .send()
            .await
            .expect("Request failed");
        assert!(resp.status().is_redirection());
        assert_eq!(
            resp.headers().get("location").and_then(|v| v.to_str().ok()),
            Some("/"),
            "{path} should redirect home"
        );
    }
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_logout_ends_the_session() {
    let client = client();
    let (username, password) = register_customer(&client).await;
    login(&client, &username, &password).await;

    let resp = client
        .post(format!("{}/logout", base_url()))
        .send()
        .await
        .expect("Logout failed");
    assert!(resp.status().is_redirection());

    let resp = client
        .get(format!("{}/user", base_url()))
        .send()
        .await
        .expect("Request failed");
    assert!(resp.status().is_redirection());
    assert_eq!(
        resp.headers().get("location").and_then(|v| v.to_str().ok()),
        Some("/login")
    );
}

// ============================================================================
// Role gating
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_customer_cannot_reach_admin_pages() {
    let client = client();
    let (username, password) = register_customer(&client).await;
    login(&client, &username, &password).await;

    for path in ["/products", "/customer/1", "/create_order/1", "/update_order/1", "/delete_order/1"] {
        let resp = client
            .get(format!("{}{path}", base_url()))
            .send()
            .await
            .expect("Request failed");
        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{path}");
    }
}
