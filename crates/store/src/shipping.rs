//! Shipping slip store trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use common::{OrderId, SlipId};
use domain::ShippingSlip;
use tokio::sync::RwLock;

use crate::{Result, StoreError};

/// Persistence of shipping slips, at most one per order.
#[async_trait]
pub trait ShippingSlipStore: Send + Sync {
    /// Stores `slip` as the order's slip, or appends its items to the slip the
    /// order already has, and returns the stored slip.
    ///
    /// Lookup and write happen under one lock, so concurrent callers for the
    /// same order all end up on a single slip.
    async fn add_or_append(&self, slip: ShippingSlip) -> Result<ShippingSlip>;

    /// Returns the slip belonging to the order, if any.
    async fn get_by_order(&self, order_id: OrderId) -> Result<Option<ShippingSlip>>;

    /// Returns the slip with the given ID, if any.
    async fn get(&self, slip_id: SlipId) -> Result<Option<ShippingSlip>>;
}

#[derive(Debug, Default)]
struct Slips {
    by_id: HashMap<SlipId, ShippingSlip>,
    by_order: HashMap<OrderId, SlipId>,
}

#[derive(Debug, Default)]
struct InMemoryShippingSlipState {
    slips: RwLock<Slips>,
    add_count: AtomicUsize,
    append_count: AtomicUsize,
    fail_on_write: AtomicBool,
}

/// In-memory shipping slip store.
///
/// Clones share the same underlying slips.
#[derive(Debug, Clone, Default)]
pub struct InMemoryShippingSlipStore {
    state: Arc<InMemoryShippingSlipState>,
}

impl InMemoryShippingSlipStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to fail every subsequent write.
    pub fn set_fail_on_write(&self, fail: bool) {
        self.state.fail_on_write.store(fail, Ordering::SeqCst);
    }

    /// Returns how many slips were created.
    pub fn add_count(&self) -> usize {
        self.state.add_count.load(Ordering::SeqCst)
    }

    /// Returns how many writes were merged into an existing slip.
    pub fn append_count(&self) -> usize {
        self.state.append_count.load(Ordering::SeqCst)
    }

    /// Returns the number of stored slips.
    pub async fn slip_count(&self) -> usize {
        self.state.slips.read().await.by_id.len()
    }

    fn check_writable(&self) -> Result<()> {
        if self.state.fail_on_write.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "shipping slip store rejected write".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ShippingSlipStore for InMemoryShippingSlipStore {
    async fn add_or_append(&self, slip: ShippingSlip) -> Result<ShippingSlip> {
        self.check_writable()?;

        let mut slips = self.state.slips.write().await;
        let Slips { by_id, by_order } = &mut *slips;

        if let Some(existing) = by_order
            .get(&slip.order_id)
            .and_then(|slip_id| by_id.get_mut(slip_id))
        {
            for description in slip.items_to_ship {
                existing.push_item(description);
            }
            self.state.append_count.fetch_add(1, Ordering::SeqCst);
            return Ok(existing.clone());
        }

        by_order.insert(slip.order_id, slip.id);
        by_id.insert(slip.id, slip.clone());
        self.state.add_count.fetch_add(1, Ordering::SeqCst);
        Ok(slip)
    }

    async fn get_by_order(&self, order_id: OrderId) -> Result<Option<ShippingSlip>> {
        let slips = self.state.slips.read().await;
        Ok(slips
            .by_order
            .get(&order_id)
            .and_then(|slip_id| slips.by_id.get(slip_id))
            .cloned())
    }

    async fn get(&self, slip_id: SlipId) -> Result<Option<ShippingSlip>> {
        Ok(self.state.slips.read().await.by_id.get(&slip_id).cloned())
    }
}
