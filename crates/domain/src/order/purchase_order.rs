use chrono::{DateTime, Utc};
use common::{CustomerId, OrderId};
use serde::Serialize;

use super::{ItemLine, OrderStatus};
use crate::error::DomainError;
use crate::money::Money;

/// A purchase order: the unit of work handled by the order processor.
///
/// The total is only meaningful once [`PurchaseOrder::compute_total`] has run;
/// until then it is zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseOrder {
    id: OrderId,
    customer_id: CustomerId,
    lines: Vec<ItemLine>,
    total_price: Money,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    processed_at: Option<DateTime<Utc>>,
}

impl PurchaseOrder {
    /// Creates a pending order for `customer_id` with the given lines.
    pub fn new(customer_id: CustomerId, lines: Vec<ItemLine>) -> Self {
        Self {
            id: OrderId::new(),
            customer_id,
            lines,
            total_price: Money::zero(),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
            processed_at: None,
        }
    }

    /// Replaces the generated identifier.
    pub fn with_id(mut self, id: OrderId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn lines(&self) -> &[ItemLine] {
        &self.lines
    }

    pub fn total_price(&self) -> Money {
        self.total_price
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the order reached a terminal status.
    pub fn processed_at(&self) -> Option<DateTime<Utc>> {
        self.processed_at
    }

    /// Returns true if any line needs to be shipped.
    pub fn has_physical_items(&self) -> bool {
        self.lines.iter().any(|line| line.item.is_physical())
    }

    /// Sums every line's price contribution, stores and returns it.
    pub fn compute_total(&mut self) -> Money {
        self.total_price = self.lines.iter().map(ItemLine::total_price).sum();
        self.total_price
    }

    /// Moves the order from Pending to Processing.
    pub fn start_processing(&mut self) -> Result<(), DomainError> {
        self.transition(
            OrderStatus::Processing,
            self.status.can_start_processing(),
            "start processing",
        )
    }

    /// Marks the order as completed.
    pub fn complete(&mut self) -> Result<(), DomainError> {
        self.transition(OrderStatus::Completed, self.status.can_finish(), "complete")?;
        self.processed_at = Some(Utc::now());
        Ok(())
    }

    /// Marks the order as failed because its customer does not exist.
    pub fn fail_invalid_customer(&mut self) -> Result<(), DomainError> {
        self.transition(
            OrderStatus::FailedInvalidCustomer,
            self.status.can_finish(),
            "fail",
        )?;
        self.processed_at = Some(Utc::now());
        Ok(())
    }

    fn transition(
        &mut self,
        next: OrderStatus,
        allowed: bool,
        action: &'static str,
    ) -> Result<(), DomainError> {
        if !allowed {
            return Err(DomainError::InvalidStatusTransition {
                current: self.status,
                action,
            });
        }
        self.status = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Item, MembershipKind};

    fn sample_order() -> PurchaseOrder {
        PurchaseOrder::new(
            CustomerId::new(),
            vec![
                ItemLine::single(Item::book("Dune", "Frank Herbert", Money::from_cents(1099))),
                ItemLine::new(
                    Item::video("Alien", "Ridley Scott", Money::from_cents(1499)),
                    2,
                )
                .unwrap(),
                ItemLine::single(Item::membership("Book Club", MembershipKind::BookClub)),
            ],
        )
    }

    #[test]
    fn test_new_order_is_pending_with_zero_total() {
        let order = sample_order();
        assert_eq!(order.status(), OrderStatus::Pending);
        assert!(order.total_price().is_zero());
        assert!(order.processed_at().is_none());
    }

    #[test]
    fn test_compute_total() {
        let mut order = sample_order();
        let total = order.compute_total();
        assert_eq!(total.cents(), 1099 + 2 * 1499);
        assert_eq!(order.total_price(), total);
    }

    #[test]
    fn test_empty_order_totals_zero() {
        let mut order = PurchaseOrder::new(CustomerId::new(), vec![]);
        assert!(order.compute_total().is_zero());
    }

    #[test]
    fn test_happy_path_transitions() {
        let mut order = sample_order();
        order.start_processing().unwrap();
        assert_eq!(order.status(), OrderStatus::Processing);
        order.complete().unwrap();
        assert_eq!(order.status(), OrderStatus::Completed);
        assert!(order.processed_at().is_some());
    }

    #[test]
    fn test_cannot_complete_pending_order() {
        let mut order = sample_order();
        let err = order.complete().unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidStatusTransition {
                current: OrderStatus::Pending,
                ..
            }
        ));
    }

    #[test]
    fn test_never_reenters_processing() {
        let mut order = sample_order();
        order.start_processing().unwrap();
        order.fail_invalid_customer().unwrap();
        assert!(order.start_processing().is_err());
        assert!(order.complete().is_err());
        assert_eq!(order.status(), OrderStatus::FailedInvalidCustomer);
    }

    #[test]
    fn test_has_physical_items() {
        assert!(sample_order().has_physical_items());
        let digital = PurchaseOrder::new(
            CustomerId::new(),
            vec![ItemLine::single(Item::membership(
                "Premium",
                MembershipKind::Premium,
            ))],
        );
        assert!(!digital.has_physical_items());
    }
}
