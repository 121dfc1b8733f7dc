//! Purchase order status machine.

use serde::{Deserialize, Serialize};

/// The status of a purchase order.
///
/// State transitions:
/// ```text
/// Pending ──► Processing ──┬──► Completed
///                          └──► FailedInvalidCustomer
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order has been assembled but not processed.
    #[default]
    Pending,

    /// The processor is working on the order.
    Processing,

    /// All lines were handled by every rule (terminal state).
    Completed,

    /// The customer could not be found; nothing was applied (terminal state).
    FailedInvalidCustomer,
}

impl OrderStatus {
    /// Returns true if processing can start in this status.
    pub fn can_start_processing(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }

    /// Returns true if the order can be finished (completed or failed).
    pub fn can_finish(&self) -> bool {
        matches!(self, OrderStatus::Processing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Completed => "Completed",
            OrderStatus::FailedInvalidCustomer => "Failed - Invalid Customer",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
