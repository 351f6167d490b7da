//! Integration tests for Orderdesk.
//!
//! The tests drive a running server over HTTP with `reqwest` and are ignored
//! by default.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p orderdesk-cli -- migrate
//! cargo run -p orderdesk-cli -- seed
//! cargo run -p orderdesk-cli -- admin create -u admin -p 'test-password-1'
//!
//! # Start the server
//! cargo run -p orderdesk-server
//!
//! # Run the ignored tests
//! cargo test -p orderdesk-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `ORDERDESK_TEST_BASE_URL` - Server under test (default: `http://localhost:3000`)
//! - `ORDERDESK_TEST_ADMIN_USERNAME` / `ORDERDESK_TEST_ADMIN_PASSWORD` -
//!   Credentials of an existing admin account, required by the admin tests
