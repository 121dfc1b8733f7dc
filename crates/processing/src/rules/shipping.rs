//! Collects physical items into one shipping slip per order.

use async_trait::async_trait;
use domain::{ItemLine, PurchaseOrder, ShippingSlip};
use store::{CustomerStore, ShippingSlipStore};

use crate::error::RuleError;
use crate::rule::OrderRule;

/// Adds physical lines to the order's shipping slip, creating it on the first one.
///
/// Each line contributes a `"<name> (x<quantity>)"` description. A customer
/// that is missing or has no address is logged and skipped, so the order can
/// still complete with an unshippable line.
pub struct ShippingSlipRule<C, S>
where
    C: CustomerStore,
    S: ShippingSlipStore,
{
    customers: C,
    slips: S,
}

impl<C, S> ShippingSlipRule<C, S>
where
    C: CustomerStore,
    S: ShippingSlipStore,
{
    pub fn new(customers: C, slips: S) -> Self {
        Self { customers, slips }
    }
}

#[async_trait]
impl<C, S> OrderRule for ShippingSlipRule<C, S>
where
    C: CustomerStore,
    S: ShippingSlipStore,
{
    fn name(&self) -> &'static str {
        "ShippingSlip"
    }

    #[tracing::instrument(
        skip_all,
        fields(order_id = %order.id(), line_id = %line.id)
    )]
    async fn apply(&self, order: &PurchaseOrder, line: &ItemLine) -> Result<(), RuleError> {
        if !line.item.is_physical() {
            return Ok(());
        }

        let Some(customer) = self.customers.get(order.customer_id()).await? else {
            tracing::error!(
                customer_id = %order.customer_id(),
                "customer not found for shipping slip generation"
            );
            return Ok(());
        };

        let Some(address) = customer.shipping_address() else {
            tracing::error!(
                customer_id = %customer.id,
                "customer has no address for shipping slip generation"
            );
            return Ok(());
        };

        let slip = ShippingSlip::new(order.id(), customer.id, address, line.describe());
        let new_slip_id = slip.id;
        let stored = self.slips.add_or_append(slip).await?;
        if stored.id == new_slip_id {
            tracing::info!(slip_id = %stored.id, "generated new shipping slip");
        } else {
            tracing::info!(
                slip_id = %stored.id,
                item = %line.item.name,
                "appended item to existing shipping slip"
            );
        }

        Ok(())
    }
}
