//! HTTP route handlers.

pub mod customers;
pub mod health;
pub mod metrics;
pub mod purchase_orders;
pub mod shipping_slips;
