//! Product catalog seeding command.
//!
//! Inserts a small demo catalog. Idempotent: products are matched by name,
//! and existing rows are left alone.

use super::CliError;

/// Demo catalog: name, price, category, description.
const DEMO_PRODUCTS: &[(&str, &str, &str, &str)] = &[
    (
        "Garden hose",
        "24.99",
        "outdoor",
        "25ft expandable garden hose",
    ),
    ("Rake", "12.50", "outdoor", "Steel leaf rake"),
    ("Watering can", "9.99", "indoor", "2L indoor watering can"),
    ("Plant pot", "6.75", "indoor", "Ceramic pot, 15cm"),
    ("BBQ grill", "149.00", "outdoor", "Charcoal grill with side table"),
    ("Desk lamp", "32.00", "indoor", "Adjustable LED desk lamp"),
];

/// Seed the product catalog.
pub async fn run() -> Result<(), CliError> {
    let pool = super::connect().await?;

    tracing::info!("Seeding product catalog...");

    let mut inserted = 0_u64;
    for (name, price, category, description) in DEMO_PRODUCTS {
        let result = sqlx::query(
            r"
            INSERT INTO products (name, price, category, description)
            VALUES ($1, $2::numeric, $3::product_category, $4)
            ON CONFLICT (name) DO NOTHING
            ",
        )
        .bind(name)
        .bind(price)
        .bind(category)
        .bind(description)
        .execute(&pool)
        .await?;

        inserted += result.rows_affected();
    }

    tracing::info!(
        "Seeding complete! {} inserted, {} already present",
        inserted,
        DEMO_PRODUCTS.len() as u64 - inserted
    );

    Ok(())
}
