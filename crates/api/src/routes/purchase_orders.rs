//! Purchase order placement and read-back endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::{CustomerId, ItemId, OrderId};
use domain::{ItemLine, PurchaseOrder};
use serde::{Deserialize, Serialize};
use store::{CustomerStore, ItemCatalog};

use crate::error::ApiError;
use crate::state::AppState;

// -- Request types --

#[derive(Deserialize)]
pub struct CreatePurchaseOrderRequest {
    pub customer_id: String,
    pub items: Vec<OrderItemRequest>,
}

#[derive(Deserialize)]
pub struct OrderItemRequest {
    pub item_id: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

// -- Response types --

#[derive(Serialize)]
pub struct PurchaseOrderResponse {
    pub id: String,
    pub customer_id: String,
    pub total_cents: i64,
    pub total: String,
    pub status: String,
    /// True if any line is a physical item, i.e. a slip is expected.
    pub requires_shipping: bool,
    pub item_lines: Vec<ItemLineResponse>,
    pub created_at: String,
    pub processed_at: Option<String>,
}

#[derive(Serialize)]
pub struct ItemLineResponse {
    pub id: String,
    pub item_name: String,
    pub item_type: String,
    pub quantity: u32,
}

impl From<&PurchaseOrder> for PurchaseOrderResponse {
    fn from(order: &PurchaseOrder) -> Self {
        Self {
            id: order.id().to_string(),
            customer_id: order.customer_id().to_string(),
            total_cents: order.total_price().cents(),
            total: order.total_price().to_string(),
            status: order.status().to_string(),
            requires_shipping: order.has_physical_items(),
            item_lines: order
                .lines()
                .iter()
                .map(|line| ItemLineResponse {
                    id: line.id.to_string(),
                    item_name: line.item.name.clone(),
                    item_type: line.item.type_name().to_string(),
                    quantity: line.quantity(),
                })
                .collect(),
            created_at: order.created_at().to_rfc3339(),
            processed_at: order.processed_at().map(|at| at.to_rfc3339()),
        }
    }
}

// -- Handlers --

/// POST /purchase-orders — resolve items, process the order and store the result.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreatePurchaseOrderRequest>,
) -> Result<(StatusCode, Json<PurchaseOrderResponse>), ApiError> {
    if req.items.is_empty() {
        return Err(ApiError::BadRequest(
            "Request body is invalid or contains no items.".to_string(),
        ));
    }

    let customer_id: CustomerId = req
        .customer_id
        .parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid customer_id: {e}")))?;

    if state.customers.get(customer_id).await?.is_none() {
        return Err(ApiError::NotFound(format!(
            "Customer with ID {customer_id} not found."
        )));
    }

    let mut lines = Vec::with_capacity(req.items.len());
    for item_req in &req.items {
        let item_id: ItemId = item_req
            .item_id
            .parse()
            .map_err(|e| ApiError::BadRequest(format!("Invalid item_id: {e}")))?;
        let item = state.catalog.get(item_id).await?.ok_or_else(|| {
            ApiError::BadRequest(format!("Item with ID {item_id} not found."))
        })?;
        lines.push(ItemLine::new(item, item_req.quantity)?);
    }

    let order = PurchaseOrder::new(customer_id, lines);
    let processed = state.processor.process(order).await?;
    metrics::counter!("purchase_orders_created_total").increment(1);

    let response = PurchaseOrderResponse::from(&processed);
    state.orders.write().await.insert(processed.id(), processed);

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /purchase-orders/{id} — return a previously processed order.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PurchaseOrderResponse>, ApiError> {
    let order_id: OrderId = id
        .parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid ID format: {e}")))?;

    let orders = state.orders.read().await;
    let order = orders
        .get(&order_id)
        .ok_or_else(|| ApiError::NotFound(format!("Purchase Order with ID {id} not found.")))?;

    Ok(Json(PurchaseOrderResponse::from(order)))
}
