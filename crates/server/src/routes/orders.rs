//! Order management route handlers (admin only).
//!
//! Batch creation submits up to [`FORM_ROWS`] rows at once; the batch is
//! all-or-nothing. Updates and deletes act on one order, and deletion is a
//! two-step flow: GET renders a confirmation page with no side effects, only
//! POST deletes.

use std::collections::HashSet;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, RawForm, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use orderdesk_core::{CustomerId, OrderId, OrderStatus, ProductId};

use crate::db::customers::CustomerRepository;
use crate::db::orders::OrderRepository;
use crate::db::products::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{Customer, NewOrder, OrderSummary, Product};
use crate::state::AppState;

/// Number of rows the batch creation form renders.
pub const FORM_ROWS: usize = 10;

// =============================================================================
// Form parsing
// =============================================================================

/// One raw row of the batch form, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderRowInput {
    pub product: String,
    pub status: String,
    pub note: String,
}

impl OrderRowInput {
    /// A row the user left untouched; skipped without complaint.
    fn is_blank(&self) -> bool {
        self.product.is_empty() && self.note.trim().is_empty()
    }
}

/// Row after validation, carrying either an order or an error message.
#[derive(Debug)]
enum RowOutcome {
    Blank,
    Valid(NewOrder),
    Invalid(String),
}

/// Parse the batch form body into positional rows.
///
/// The form repeats the field names `product`, `status`, and `note` once per
/// row. `serde` form decoding collapses repeated keys, so the body is walked
/// manually and values are paired up by position.
fn parse_order_rows(body: &[u8]) -> Vec<OrderRowInput> {
    let mut products = Vec::new();
    let mut statuses = Vec::new();
    let mut notes = Vec::new();

    for (key, value) in url::form_urlencoded::parse(body) {
        match key.as_ref() {
            "product" => products.push(value.into_owned()),
            "status" => statuses.push(value.into_owned()),
            "note" => notes.push(value.into_owned()),
            _ => {}
        }
    }

    let row_count = products.len().max(statuses.len()).max(notes.len());
    let mut rows = Vec::with_capacity(row_count);

    for i in 0..row_count {
        rows.push(OrderRowInput {
            product: products.get(i).cloned().unwrap_or_default(),
            status: statuses.get(i).cloned().unwrap_or_default(),
            note: notes.get(i).cloned().unwrap_or_default(),
        });
    }

    rows
}

/// Validate one row against the known product catalog.
fn validate_row(row: &OrderRowInput, valid_products: &HashSet<ProductId>) -> RowOutcome {
    if row.is_blank() {
        return RowOutcome::Blank;
    }

    let Ok(raw_id) = row.product.parse::<i32>() else {
        return RowOutcome::Invalid("Select a product".to_string());
    };
    let product_id = ProductId::new(raw_id);
    if !valid_products.contains(&product_id) {
        return RowOutcome::Invalid("Select a product".to_string());
    }

    let Ok(status) = row.status.parse::<OrderStatus>() else {
        return RowOutcome::Invalid("Select a valid status".to_string());
    };

    let note = row.note.trim();
    let note = (!note.is_empty()).then(|| note.to_string());

    RowOutcome::Valid(NewOrder {
        product_id,
        status,
        note,
    })
}

/// Validated batch: either every non-blank row parsed, or per-row errors.
#[derive(Debug)]
pub enum BatchValidation {
    /// Orders to insert, in form order.
    Ok(Vec<NewOrder>),
    /// Per-row error messages, aligned with the submitted rows.
    Err(Vec<Option<String>>),
}

/// Validate the whole batch. Blank rows are skipped; any invalid row fails
/// the entire batch so nothing is persisted from a partially bad form.
#[must_use]
pub fn validate_rows(
    rows: &[OrderRowInput],
    valid_products: &HashSet<ProductId>,
) -> BatchValidation {
    let outcomes: Vec<RowOutcome> = rows
        .iter()
        .map(|row| validate_row(row, valid_products))
        .collect();

    let has_errors = outcomes.iter().any(|o| matches!(o, RowOutcome::Invalid(_)));
    let has_orders = outcomes.iter().any(|o| matches!(o, RowOutcome::Valid(_)));

    if has_errors || !has_orders {
        let errors = outcomes
            .into_iter()
            .map(|o| match o {
                RowOutcome::Invalid(msg) => Some(msg),
                RowOutcome::Blank | RowOutcome::Valid(_) => None,
            })
            .collect();
        return BatchValidation::Err(errors);
    }

    let orders = outcomes
        .into_iter()
        .filter_map(|o| match o {
            RowOutcome::Valid(order) => Some(order),
            RowOutcome::Blank | RowOutcome::Invalid(_) => None,
        })
        .collect();

    BatchValidation::Ok(orders)
}

// =============================================================================
// Templates
// =============================================================================

/// One row of the batch form as rendered, with any validation error.
#[derive(Debug)]
pub struct FormRow {
    pub product: String,
    pub status: String,
    pub note: String,
    pub error: Option<String>,
}

impl FormRow {
    fn empty() -> Self {
        Self {
            product: String::new(),
            status: OrderStatus::default().to_string(),
            note: String::new(),
            error: None,
        }
    }
}

/// Batch order creation form template.
#[derive(Template, WebTemplate)]
#[template(path = "order_form.html")]
pub struct OrderFormTemplate {
    pub customer: Customer,
    pub products: Vec<Product>,
    pub statuses: Vec<OrderStatus>,
    pub rows: Vec<FormRow>,
    /// Form-level message shown when the submission had nothing usable.
    pub form_error: Option<String>,
}

/// Single-order edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "order_edit.html")]
pub struct OrderEditTemplate {
    pub order_id: OrderId,
    pub customer_name: String,
    pub products: Vec<Product>,
    pub statuses: Vec<OrderStatus>,
    pub product: String,
    pub status: String,
    pub note: String,
    pub error: Option<String>,
}

/// Delete confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "order_delete.html")]
pub struct OrderDeleteTemplate {
    pub order: OrderSummary,
}

// =============================================================================
// Batch creation routes
// =============================================================================

async fn load_customer(state: &AppState, id: i32) -> Result<Customer> {
    CustomerRepository::new(state.pool())
        .get_by_id(CustomerId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("customer {id}")))
}

/// Display the batch order form for a customer.
pub async fn create_page(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(customer_id): Path<i32>,
) -> Result<Response> {
    let customer = load_customer(&state, customer_id).await?;
    let products = ProductRepository::new(state.pool()).list_all().await?;

    Ok(OrderFormTemplate {
        customer,
        products,
        statuses: OrderStatus::ALL.to_vec(),
        rows: (0..FORM_ROWS).map(|_| FormRow::empty()).collect(),
        form_error: None,
    }
    .into_response())
}

/// Handle the batch order form submission.
///
/// Every non-blank row must validate; the batch is inserted in one
/// transaction or not at all. On error the form redisplays with the
/// submitted values and per-row messages. Bodies carrying more rows than
/// the form renders are rejected outright.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(customer_id): Path<i32>,
    RawForm(body): RawForm,
) -> Result<Response> {
    let customer = load_customer(&state, customer_id).await?;
    let products = ProductRepository::new(state.pool()).list_all().await?;
    let valid_products: HashSet<ProductId> = products.iter().map(|p| p.id).collect();

    let rows = parse_order_rows(&body);
    if rows.len() > FORM_ROWS {
        return Err(AppError::BadRequest(format!(
            "At most {FORM_ROWS} orders can be created at once"
        )));
    }

    match validate_rows(&rows, &valid_products) {
        BatchValidation::Ok(orders) => {
            let inserted = OrderRepository::new(state.pool())
                .create_batch(customer.id, &orders)
                .await?;
            tracing::info!(
                customer_id = %customer.id,
                count = inserted,
                "Orders created"
            );
            Ok(Redirect::to("/").into_response())
        }
        BatchValidation::Err(errors) => {
            let nothing_submitted = rows.iter().all(OrderRowInput::is_blank);
            let mut form_rows: Vec<FormRow> = rows
                .iter()
                .zip(errors)
                .map(|(row, error)| FormRow {
                    product: row.product.clone(),
                    status: row.status.clone(),
                    note: row.note.clone(),
                    error,
                })
                .collect();
            while form_rows.len() < FORM_ROWS {
                form_rows.push(FormRow::empty());
            }

            Ok(OrderFormTemplate {
                customer,
                products,
                statuses: OrderStatus::ALL.to_vec(),
                rows: form_rows,
                form_error: nothing_submitted
                    .then(|| "Fill in at least one order".to_string()),
            }
            .into_response())
        }
    }
}

// =============================================================================
// Update routes
// =============================================================================

/// Single-order edit form data.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderForm {
    pub product: String,
    pub status: String,
    #[serde(default)]
    pub note: String,
}

async fn load_order_summary(state: &AppState, id: i32) -> Result<OrderSummary> {
    OrderRepository::new(state.pool())
        .get_summary(OrderId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))
}

/// Display the edit form for an order, prefilled with its current values.
pub async fn update_page(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(order_id): Path<i32>,
) -> Result<Response> {
    let order = OrderRepository::new(state.pool())
        .get_by_id(OrderId::new(order_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {order_id}")))?;
    let summary = load_order_summary(&state, order_id).await?;
    let products = ProductRepository::new(state.pool()).list_all().await?;

    Ok(OrderEditTemplate {
        order_id: order.id,
        customer_name: summary.customer_name,
        products,
        statuses: OrderStatus::ALL.to_vec(),
        product: order.product_id.to_string(),
        status: order.status.to_string(),
        note: order.note.unwrap_or_default(),
        error: None,
    }
    .into_response())
}

/// Handle the edit form submission.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(order_id): Path<i32>,
    Form(form): Form<UpdateOrderForm>,
) -> Result<Response> {
    let summary = load_order_summary(&state, order_id).await?;
    let products = ProductRepository::new(state.pool()).list_all().await?;
    let valid_products: HashSet<ProductId> = products.iter().map(|p| p.id).collect();

    let row = OrderRowInput {
        product: form.product.clone(),
        status: form.status.clone(),
        note: form.note.clone(),
    };

    match validate_row(&row, &valid_products) {
        RowOutcome::Valid(change) => {
            OrderRepository::new(state.pool())
                .update(summary.id, &change)
                .await?;
            tracing::info!(order_id = %summary.id, "Order updated");
            Ok(Redirect::to("/").into_response())
        }
        outcome => {
            let error = match outcome {
                RowOutcome::Invalid(msg) => msg,
                _ => "Select a product".to_string(),
            };
            Ok(OrderEditTemplate {
                order_id: summary.id,
                customer_name: summary.customer_name,
                products,
                statuses: OrderStatus::ALL.to_vec(),
                product: form.product,
                status: form.status,
                note: form.note,
                error: Some(error),
            }
            .into_response())
        }
    }
}

// =============================================================================
// Delete routes
// =============================================================================

/// Display the delete confirmation page. Performs no writes.
pub async fn delete_page(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(order_id): Path<i32>,
) -> Result<Response> {
    let order = load_order_summary(&state, order_id).await?;

    Ok(OrderDeleteTemplate { order }.into_response())
}

/// Handle the confirmed delete.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(order_id): Path<i32>,
) -> Result<Response> {
    let id = OrderId::new(order_id);
    match OrderRepository::new(state.pool()).delete(id).await {
        Ok(()) => {
            tracing::info!(order_id = %id, "Order deleted");
            Ok(Redirect::to("/").into_response())
        }
        Err(crate::db::RepositoryError::NotFound) => {
            Err(AppError::NotFound(format!("order {order_id}")))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products(ids: &[i32]) -> HashSet<ProductId> {
        ids.iter().copied().map(ProductId::new).collect()
    }

    fn row(product: &str, status: &str, note: &str) -> OrderRowInput {
        OrderRowInput {
            product: product.to_string(),
            status: status.to_string(),
            note: note.to_string(),
        }
    }

    #[test]
    fn test_parse_order_rows_pairs_by_position() {
        let body = b"product=1&status=pending&note=first&product=2&status=delivered&note=";
        let rows = parse_order_rows(body);
        assert_eq!(
            rows,
            vec![
                row("1", "pending", "first"),
                row("2", "delivered", ""),
            ]
        );
    }

    #[test]
    fn test_parse_order_rows_ignores_unknown_fields() {
        let body = b"csrf=abc&product=1&status=pending&note=";
        let rows = parse_order_rows(body);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product, "1");
    }

    #[test]
    fn test_parse_order_rows_decodes_percent_encoding() {
        let body = b"product=1&status=pending&note=two+bags%2C+please";
        let rows = parse_order_rows(body);
        assert_eq!(rows[0].note, "two bags, please");
    }

    #[test]
    fn test_validate_skips_blank_rows() {
        let rows = vec![
            row("1", "pending", "first"),
            row("", "pending", ""),
            row("2", "delivered", ""),
        ];
        match validate_rows(&rows, &products(&[1, 2])) {
            BatchValidation::Ok(orders) => {
                assert_eq!(orders.len(), 2);
                assert_eq!(orders[0].product_id, ProductId::new(1));
                assert_eq!(orders[0].note.as_deref(), Some("first"));
                assert_eq!(orders[1].product_id, ProductId::new(2));
                assert_eq!(orders[1].note, None);
            }
            BatchValidation::Err(_) => panic!("expected valid batch"),
        }
    }

    #[test]
    fn test_validate_rejects_unknown_product() {
        let rows = vec![row("1", "pending", ""), row("99", "pending", "")];
        match validate_rows(&rows, &products(&[1])) {
            BatchValidation::Err(errors) => {
                assert_eq!(errors[0], None);
                assert_eq!(errors[1].as_deref(), Some("Select a product"));
            }
            BatchValidation::Ok(_) => panic!("expected errors"),
        }
    }

    #[test]
    fn test_validate_rejects_bad_status() {
        let rows = vec![row("1", "shipped", "")];
        match validate_rows(&rows, &products(&[1])) {
            BatchValidation::Err(errors) => {
                assert_eq!(errors[0].as_deref(), Some("Select a valid status"));
            }
            BatchValidation::Ok(_) => panic!("expected errors"),
        }
    }

    #[test]
    fn test_validate_note_without_product_is_an_error() {
        // A note on an otherwise empty row means the user forgot the product.
        let rows = vec![row("", "pending", "please hurry")];
        match validate_rows(&rows, &products(&[1])) {
            BatchValidation::Err(errors) => {
                assert_eq!(errors[0].as_deref(), Some("Select a product"));
            }
            BatchValidation::Ok(_) => panic!("expected errors"),
        }
    }

    #[test]
    fn test_validate_all_blank_is_an_error() {
        let rows = vec![row("", "pending", ""), row("", "pending", "")];
        assert!(matches!(
            validate_rows(&rows, &products(&[1])),
            BatchValidation::Err(_)
        ));
    }

    #[test]
    fn test_one_bad_row_fails_the_whole_batch() {
        let rows = vec![row("1", "pending", ""), row("not-a-number", "pending", "")];
        match validate_rows(&rows, &products(&[1])) {
            BatchValidation::Err(errors) => {
                assert_eq!(errors[0], None);
                assert!(errors[1].is_some());
            }
            BatchValidation::Ok(_) => panic!("one bad row must fail the batch"),
        }
    }
}
