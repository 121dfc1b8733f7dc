//! Shared types for the purchase order service.

pub mod types;

pub use types::{CustomerId, ItemId, LineId, OrderId, SlipId};
