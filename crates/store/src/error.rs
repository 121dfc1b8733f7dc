use common::CustomerId;
use thiserror::Error;

/// Errors that can occur when interacting with a store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The customer to update does not exist.
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    /// The backing store could not serve the request.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
