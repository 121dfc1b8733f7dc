//! Integration tests for order processing with the built-in rules.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use common::{CustomerId, OrderId, SlipId};
use domain::{
    Customer, Item, ItemLine, MembershipKind, Money, OrderStatus, PurchaseOrder, ShippingSlip,
};
use processing::{
    MembershipActivationRule, OrderProcessor, OrderRule, ProcessingError, RuleError,
    ShippingSlipRule,
};
use store::{
    CustomerStore, InMemoryCustomerStore, InMemoryShippingSlipStore, ShippingSlipStore,
    StoreError,
};
use tokio::sync::Barrier;

struct TestHarness {
    processor: OrderProcessor<InMemoryCustomerStore>,
    customers: InMemoryCustomerStore,
    slips: InMemoryShippingSlipStore,
}

impl TestHarness {
    fn new() -> Self {
        let customers = InMemoryCustomerStore::new();
        let slips = InMemoryShippingSlipStore::new();
        let processor = OrderProcessor::new(customers.clone())
            .with_rule(MembershipActivationRule::new(customers.clone()))
            .with_rule(ShippingSlipRule::new(customers.clone(), slips.clone()));

        Self {
            processor,
            customers,
            slips,
        }
    }

    async fn add_customer(&self, customer: Customer) -> CustomerId {
        let id = customer.id;
        self.customers.add(customer).await.unwrap();
        id
    }

    async fn memberships(&self, customer_id: CustomerId) -> BTreeSet<MembershipKind> {
        self.customers
            .get(customer_id)
            .await
            .unwrap()
            .unwrap()
            .active_memberships
    }
}

fn book(name: &str, cents: i64, quantity: u32) -> ItemLine {
    ItemLine::new(
        Item::book(name, "Some Author", Money::from_cents(cents)),
        quantity,
    )
    .unwrap()
}

#[tokio::test]
async fn test_single_book_total() {
    let h = TestHarness::new();
    let customer_id = h
        .add_customer(Customer::new("Ada").with_address("123 Test St"))
        .await;

    let order = PurchaseOrder::new(customer_id, vec![book("A", 1099, 1)]);
    let processed = h.processor.process(order).await.unwrap();

    assert_eq!(processed.status(), OrderStatus::Completed);
    assert_eq!(processed.total_price(), Money::from_cents(1099));
}

#[tokio::test]
async fn test_total_multiplies_quantities() {
    let h = TestHarness::new();
    let customer_id = h.add_customer(Customer::new("Ada")).await;

    let order = PurchaseOrder::new(
        customer_id,
        vec![
            book("A", 1099, 3),
            ItemLine::new(
                Item::membership("Premium", MembershipKind::Premium)
                    .with_price(Money::from_cents(5500)),
                2,
            )
            .unwrap(),
        ],
    );
    let processed = h.processor.process(order).await.unwrap();

    assert_eq!(processed.total_price().cents(), 3 * 1099 + 2 * 5500);
}

#[tokio::test]
async fn test_missing_customer_has_no_side_effects() {
    let h = TestHarness::new();

    let order = PurchaseOrder::new(
        CustomerId::new(),
        vec![
            book("A", 1099, 1),
            ItemLine::single(Item::membership("Club", MembershipKind::BookClub)),
        ],
    );
    let order_id = order.id();
    let processed = h.processor.process(order).await.unwrap();

    assert_eq!(processed.status(), OrderStatus::FailedInvalidCustomer);
    assert!(processed.total_price().is_zero());
    assert_eq!(h.customers.update_count(), 0);
    assert_eq!(h.slips.add_count(), 0);
    assert!(h.slips.get_by_order(order_id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_held_membership_triggers_no_update() {
    let h = TestHarness::new();
    let customer_id = h
        .add_customer(Customer::new("Ada").with_membership(MembershipKind::VideoClub))
        .await;

    let order = PurchaseOrder::new(
        customer_id,
        vec![ItemLine::single(Item::membership(
            "Video Club",
            MembershipKind::VideoClub,
        ))],
    );
    let processed = h.processor.process(order).await.unwrap();

    assert_eq!(processed.status(), OrderStatus::Completed);
    assert_eq!(h.customers.update_count(), 0);
}

#[tokio::test]
async fn test_premium_cascade() {
    let h = TestHarness::new();
    let customer_id = h.add_customer(Customer::new("Ada")).await;

    let order = PurchaseOrder::new(
        customer_id,
        vec![ItemLine::single(Item::membership(
            "Premium",
            MembershipKind::Premium,
        ))],
    );
    h.processor.process(order).await.unwrap();

    assert_eq!(
        h.memberships(customer_id).await,
        BTreeSet::from([
            MembershipKind::Premium,
            MembershipKind::BookClub,
            MembershipKind::VideoClub,
        ])
    );
    assert_eq!(h.customers.update_count(), 1);
}

#[tokio::test]
async fn test_shipping_aggregation() {
    let h = TestHarness::new();
    let customer_id = h
        .add_customer(Customer::new("Ada").with_address("123 Test St"))
        .await;

    let order = PurchaseOrder::new(customer_id, vec![book("A", 1000, 1), book("B", 500, 2)]);
    let order_id = order.id();
    h.processor.process(order).await.unwrap();

    assert_eq!(h.slips.slip_count().await, 1);
    let slip = h.slips.get_by_order(order_id).await.unwrap().unwrap();
    assert_eq!(slip.customer_address, "123 Test St");
    assert_eq!(slip.items_to_ship, vec!["A (x1)", "B (x2)"]);
}

#[tokio::test]
async fn test_mixed_order() {
    let h = TestHarness::new();
    let customer_id = h
        .add_customer(Customer::new("Ada").with_address("123 Test St"))
        .await;

    let order = PurchaseOrder::new(
        customer_id,
        vec![
            ItemLine::single(Item::book("Dune", "Frank Herbert", Money::from_cents(1099))),
            ItemLine::single(Item::video("Alien", "Ridley Scott", Money::from_cents(1499))),
            ItemLine::single(Item::membership("Book Club", MembershipKind::BookClub)),
        ],
    );
    let order_id = order.id();
    let processed = h.processor.process(order).await.unwrap();

    assert_eq!(processed.status(), OrderStatus::Completed);
    assert_eq!(processed.total_price().cents(), 2598);
    assert_eq!(
        h.memberships(customer_id).await,
        BTreeSet::from([MembershipKind::BookClub])
    );
    assert_eq!(h.slips.slip_count().await, 1);
    let slip = h.slips.get_by_order(order_id).await.unwrap().unwrap();
    assert_eq!(slip.items_to_ship, vec!["Dune (x1)"]);
}

#[tokio::test]
async fn test_customer_without_address_still_completes() {
    let h = TestHarness::new();
    let customer_id = h.add_customer(Customer::new("Ada")).await;

    let order = PurchaseOrder::new(customer_id, vec![book("A", 1000, 1)]);
    let processed = h.processor.process(order).await.unwrap();

    assert_eq!(processed.status(), OrderStatus::Completed);
    assert_eq!(h.slips.slip_count().await, 0);
}

#[tokio::test]
async fn test_reprocessing_a_copy_appends_again() {
    let h = TestHarness::new();
    let customer_id = h
        .add_customer(Customer::new("Ada").with_address("123 Test St"))
        .await;

    let order = PurchaseOrder::new(customer_id, vec![book("A", 1000, 1)]);
    let order_id = order.id();
    h.processor.process(order.clone()).await.unwrap();
    h.processor.process(order).await.unwrap();

    let slip = h.slips.get_by_order(order_id).await.unwrap().unwrap();
    assert_eq!(slip.items_to_ship, vec!["A (x1)", "A (x1)"]);
}

#[tokio::test]
async fn test_rule_failure_leaves_earlier_effects_in_place() {
    let h = TestHarness::new();
    let customer_id = h
        .add_customer(Customer::new("Ada").with_address("123 Test St"))
        .await;

    let order = PurchaseOrder::new(
        customer_id,
        vec![
            ItemLine::single(Item::membership("Book Club", MembershipKind::BookClub)),
            book("A", 1000, 1),
            book("B", 1000, 1),
        ],
    );
    let order_id = order.id();
    h.slips.set_fail_on_write(true);

    let err = h.processor.process(order).await.unwrap_err();

    assert!(matches!(
        err,
        ProcessingError::RuleFailed {
            rule: "ShippingSlip",
            source: RuleError::Store(_),
            ..
        }
    ));
    // The membership from the first line was not rolled back.
    assert_eq!(
        h.memberships(customer_id).await,
        BTreeSet::from([MembershipKind::BookClub])
    );
    assert!(h.slips.get_by_order(order_id).await.unwrap().is_none());
}

/// Slip store that hands control back to the runtime before every call, so
/// concurrent writers for the same order interleave.
#[derive(Clone)]
struct YieldingSlipStore {
    inner: InMemoryShippingSlipStore,
}

#[async_trait]
impl ShippingSlipStore for YieldingSlipStore {
    async fn add_or_append(&self, slip: ShippingSlip) -> Result<ShippingSlip, StoreError> {
        tokio::task::yield_now().await;
        self.inner.add_or_append(slip).await
    }

    async fn get_by_order(&self, order_id: OrderId) -> Result<Option<ShippingSlip>, StoreError> {
        tokio::task::yield_now().await;
        self.inner.get_by_order(order_id).await
    }

    async fn get(&self, slip_id: SlipId) -> Result<Option<ShippingSlip>, StoreError> {
        tokio::task::yield_now().await;
        self.inner.get(slip_id).await
    }
}

#[tokio::test]
async fn test_concurrent_processing_of_one_order_shares_a_slip() {
    let customers = InMemoryCustomerStore::new();
    let customer = Customer::new("Ada").with_address("123 Test St");
    let customer_id = customer.id;
    customers.add(customer).await.unwrap();
    let slips = InMemoryShippingSlipStore::new();
    let processor = OrderProcessor::new(customers.clone()).with_rule(ShippingSlipRule::new(
        customers,
        YieldingSlipStore {
            inner: slips.clone(),
        },
    ));

    let order = PurchaseOrder::new(customer_id, vec![book("A", 1000, 1)]);
    let order_id = order.id();
    let (first, second) = tokio::join!(
        processor.process(order.clone()),
        processor.process(order.clone())
    );

    assert_eq!(first.unwrap().status(), OrderStatus::Completed);
    assert_eq!(second.unwrap().status(), OrderStatus::Completed);
    let slip = slips.get_by_order(order_id).await.unwrap().unwrap();
    assert_eq!(slip.items_to_ship, vec!["A (x1)", "A (x1)"]);
    assert_eq!(slips.slip_count().await, 1);
    assert_eq!(slips.add_count(), 1);
    assert_eq!(slips.append_count(), 1);
}

/// Waits on a shared barrier, which only completes if all rules on a line
/// are running at the same time.
struct RendezvousRule {
    name: &'static str,
    barrier: Arc<Barrier>,
    log: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl OrderRule for RendezvousRule {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn apply(&self, _order: &PurchaseOrder, line: &ItemLine) -> Result<(), RuleError> {
        self.log
            .lock()
            .unwrap()
            .push(format!("{} start {}", self.name, line.item.name));
        self.barrier.wait().await;
        self.log
            .lock()
            .unwrap()
            .push(format!("{} end {}", self.name, line.item.name));
        Ok(())
    }
}

#[tokio::test]
async fn test_rules_run_concurrently_and_lines_sequentially() {
    let customers = InMemoryCustomerStore::new();
    let customer = Customer::new("Ada");
    let customer_id = customer.id;
    customers.add(customer).await.unwrap();

    let barrier = Arc::new(Barrier::new(2));
    let log = Arc::new(Mutex::new(Vec::new()));
    let processor = OrderProcessor::new(customers)
        .with_rule(RendezvousRule {
            name: "first",
            barrier: barrier.clone(),
            log: log.clone(),
        })
        .with_rule(RendezvousRule {
            name: "second",
            barrier,
            log: log.clone(),
        });

    let order = PurchaseOrder::new(customer_id, vec![book("A", 100, 1), book("B", 100, 1)]);
    let processed = tokio::time::timeout(Duration::from_secs(5), processor.process(order))
        .await
        .expect("rules on a line must run concurrently")
        .unwrap();
    assert_eq!(processed.status(), OrderStatus::Completed);

    let log = log.lock().unwrap().clone();
    let position = |entry: &str| log.iter().position(|e| e == entry).unwrap();
    // Both rules finish line A before either starts line B.
    assert!(position("first end A") < position("first start B"));
    assert!(position("second end A") < position("first start B"));
    assert!(position("first end A") < position("second start B"));
    assert!(position("second end A") < position("second start B"));
}
