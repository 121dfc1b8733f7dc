//! Shared application state.

use std::collections::HashMap;

use common::OrderId;
use domain::PurchaseOrder;
use processing::{MembershipActivationRule, OrderProcessor, ShippingSlipRule};
use store::{InMemoryCustomerStore, InMemoryItemCatalog, InMemoryShippingSlipStore};
use tokio::sync::RwLock;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub processor: OrderProcessor<InMemoryCustomerStore>,
    pub customers: InMemoryCustomerStore,
    pub catalog: InMemoryItemCatalog,
    pub slips: InMemoryShippingSlipStore,
    /// Orders processed by this instance, kept for read-back.
    pub orders: RwLock<HashMap<OrderId, PurchaseOrder>>,
}

impl AppState {
    /// Wires the processor and its rules to the given stores.
    pub fn new(
        customers: InMemoryCustomerStore,
        catalog: InMemoryItemCatalog,
        slips: InMemoryShippingSlipStore,
    ) -> Self {
        let processor = OrderProcessor::new(customers.clone())
            .with_rule(MembershipActivationRule::new(customers.clone()))
            .with_rule(ShippingSlipRule::new(customers.clone(), slips.clone()));

        Self {
            processor,
            customers,
            catalog,
            slips,
            orders: RwLock::new(HashMap::new()),
        }
    }
}
