//! Domain error types.

use thiserror::Error;

use crate::order::OrderStatus;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Quantity must be positive.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },

    /// Order is not in a status that allows the requested action.
    #[error("Invalid status transition: cannot {action} from {current} status")]
    InvalidStatusTransition {
        current: OrderStatus,
        action: &'static str,
    },
}
