//! Store interfaces consumed by the order processor, with in-memory backends.
//!
//! Every store hands out owned copies of its records: mutating a value
//! returned by `get` never changes stored state until it is written back.

pub mod catalog;
pub mod customer;
pub mod error;
pub mod seed;
pub mod shipping;

pub use catalog::{InMemoryItemCatalog, ItemCatalog};
pub use customer::{CustomerStore, InMemoryCustomerStore};
pub use error::{Result, StoreError};
pub use shipping::{InMemoryShippingSlipStore, ShippingSlipStore};
