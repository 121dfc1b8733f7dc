//! Shipping slip read endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use common::{OrderId, SlipId};
use domain::ShippingSlip;
use serde::Serialize;
use store::ShippingSlipStore;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ShippingSlipResponse {
    pub id: String,
    pub purchase_order_id: String,
    pub customer_id: String,
    pub customer_address: String,
    pub items_to_ship: Vec<String>,
}

impl From<ShippingSlip> for ShippingSlipResponse {
    fn from(slip: ShippingSlip) -> Self {
        Self {
            id: slip.id.to_string(),
            purchase_order_id: slip.order_id.to_string(),
            customer_id: slip.customer_id.to_string(),
            customer_address: slip.customer_address,
            items_to_ship: slip.items_to_ship,
        }
    }
}

/// GET /shipping-slips/{id} — a slip by its own ID.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ShippingSlipResponse>, ApiError> {
    let slip_id: SlipId = id
        .parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid ID format: {e}")))?;

    let slip = state
        .slips
        .get(slip_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Shipping slip with ID {id} not found.")))?;

    Ok(Json(slip.into()))
}

/// GET /shipping-slips/by-order/{order_id} — the slip generated for an order.
#[tracing::instrument(skip(state))]
pub async fn by_order(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
) -> Result<Json<ShippingSlipResponse>, ApiError> {
    let parsed: OrderId = order_id
        .parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid ID format: {e}")))?;

    let slip = state.slips.get_by_order(parsed).await?.ok_or_else(|| {
        ApiError::NotFound(format!(
            "No shipping slip found for Purchase Order ID {order_id}. \
             It might contain only non-physical items."
        ))
    })?;

    Ok(Json(slip.into()))
}
