//! Customer read endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use common::CustomerId;
use serde::Serialize;
use store::CustomerStore;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct CustomerResponse {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub active_memberships: Vec<String>,
}

/// GET /customers/{id} — load a customer and their active memberships.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let customer_id: CustomerId = id
        .parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid ID format: {e}")))?;

    let customer = state
        .customers
        .get(customer_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Customer with ID {id} not found.")))?;

    Ok(Json(CustomerResponse {
        id: customer.id.to_string(),
        name: customer.name,
        address: customer.address,
        active_memberships: customer
            .active_memberships
            .iter()
            .map(ToString::to_string)
            .collect(),
    }))
}
