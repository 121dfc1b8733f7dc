//! Grants purchased memberships to the customer.

use async_trait::async_trait;
use domain::{ItemDetails, ItemLine, MembershipKind, PurchaseOrder};
use store::CustomerStore;

use crate::error::RuleError;
use crate::rule::OrderRule;

/// Activates the membership bought on a line.
///
/// Premium also activates BookClub and VideoClub. Activation is binary per
/// line: the quantity is ignored, and a kind the customer already holds
/// causes no store write.
pub struct MembershipActivationRule<C: CustomerStore> {
    customers: C,
}

impl<C: CustomerStore> MembershipActivationRule<C> {
    pub fn new(customers: C) -> Self {
        Self { customers }
    }
}

#[async_trait]
impl<C: CustomerStore> OrderRule for MembershipActivationRule<C> {
    fn name(&self) -> &'static str {
        "MembershipActivation"
    }

    #[tracing::instrument(
        skip_all,
        fields(order_id = %order.id(), line_id = %line.id)
    )]
    async fn apply(&self, order: &PurchaseOrder, line: &ItemLine) -> Result<(), RuleError> {
        let kind = match line.item.details {
            ItemDetails::Membership { kind } => kind,
            ItemDetails::Book { .. } | ItemDetails::Video { .. } => return Ok(()),
        };

        let Some(mut customer) = self.customers.get(order.customer_id()).await? else {
            tracing::error!(
                customer_id = %order.customer_id(),
                "customer not found for membership activation"
            );
            return Ok(());
        };

        if !customer.activate_membership(kind) {
            tracing::debug!(customer_id = %customer.id, membership = %kind, "membership already active");
            return Ok(());
        }

        tracing::info!(customer_id = %customer.id, membership = %kind, "membership activated");
        if kind == MembershipKind::Premium {
            tracing::info!(
                customer_id = %customer.id,
                "premium membership activated book and video clubs"
            );
        }

        self.customers.update(customer).await?;
        Ok(())
    }
}
