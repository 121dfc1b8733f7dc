//! Shipping slips.

use chrono::{DateTime, Utc};
use common::{CustomerId, OrderId, SlipId};
use serde::{Deserialize, Serialize};

/// The per-order list of physical items to ship, with the delivery address.
///
/// At most one slip exists per order; later physical lines are appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingSlip {
    pub id: SlipId,
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    /// Snapshot of the customer's address when the slip was created.
    pub customer_address: String,
    pub items_to_ship: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl ShippingSlip {
    /// Creates a slip holding a single item description.
    pub fn new(
        order_id: OrderId,
        customer_id: CustomerId,
        customer_address: impl Into<String>,
        first_item: impl Into<String>,
    ) -> Self {
        Self {
            id: SlipId::new(),
            order_id,
            customer_id,
            customer_address: customer_address.into(),
            items_to_ship: vec![first_item.into()],
            created_at: Utc::now(),
        }
    }

    pub fn push_item(&mut self, description: impl Into<String>) {
        self.items_to_ship.push(description.into());
    }
}
