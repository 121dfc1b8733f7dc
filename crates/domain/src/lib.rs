//! Domain model for the purchase order service.
//!
//! This crate provides:
//! - Catalog items as a closed sum type (book, video, membership)
//! - Purchase orders with their lines and status machine
//! - Customer and shipping slip records

pub mod customer;
pub mod error;
pub mod item;
pub mod money;
pub mod order;
pub mod shipping;

pub use common::{CustomerId, ItemId, LineId, OrderId, SlipId};
pub use customer::Customer;
pub use error::DomainError;
pub use item::{Item, ItemDetails, MembershipKind};
pub use money::Money;
pub use order::{ItemLine, OrderStatus, PurchaseOrder};
pub use shipping::ShippingSlip;
