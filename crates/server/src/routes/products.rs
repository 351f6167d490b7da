//! Product listing route handler (admin only).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};

use crate::db::products::ProductRepository;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::Product;
use crate::state::AppState;

/// Product listing template.
#[derive(Template, WebTemplate)]
#[template(path = "products.html")]
pub struct ProductsTemplate {
    pub products: Vec<Product>,
}

/// Display the product catalog.
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Response> {
    let products = ProductRepository::new(state.pool()).list_all().await?;

    Ok(ProductsTemplate { products }.into_response())
}
