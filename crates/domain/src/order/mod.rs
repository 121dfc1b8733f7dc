//! Purchase orders and their lines.

mod line;
mod purchase_order;
mod status;

pub use line::ItemLine;
pub use purchase_order::PurchaseOrder;
pub use status::OrderStatus;
