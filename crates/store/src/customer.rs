//! Customer store trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use common::CustomerId;
use domain::Customer;
use tokio::sync::RwLock;

use crate::{Result, StoreError};

/// Lookup and write-back of customer records.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Returns a snapshot of the customer, if it exists.
    async fn get(&self, customer_id: CustomerId) -> Result<Option<Customer>>;

    /// Replaces the stored customer with the given snapshot.
    ///
    /// Fails with [`StoreError::CustomerNotFound`] if the customer was never added.
    async fn update(&self, customer: Customer) -> Result<()>;

    /// Adds a customer, replacing any existing record with the same ID.
    async fn add(&self, customer: Customer) -> Result<()>;
}

#[derive(Debug, Default)]
struct InMemoryCustomerState {
    customers: RwLock<HashMap<CustomerId, Customer>>,
    update_count: AtomicUsize,
    fail_on_update: AtomicBool,
}

/// In-memory customer store.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerStore {
    state: Arc<InMemoryCustomerState>,
}

impl InMemoryCustomerStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to fail every subsequent update call.
    pub fn set_fail_on_update(&self, fail: bool) {
        self.state.fail_on_update.store(fail, Ordering::SeqCst);
    }

    /// Returns how many successful update calls were made.
    pub fn update_count(&self) -> usize {
        self.state.update_count.load(Ordering::SeqCst)
    }

    /// Returns the number of stored customers.
    pub async fn customer_count(&self) -> usize {
        self.state.customers.read().await.len()
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn get(&self, customer_id: CustomerId) -> Result<Option<Customer>> {
        Ok(self.state.customers.read().await.get(&customer_id).cloned())
    }

    async fn update(&self, customer: Customer) -> Result<()> {
        if self.state.fail_on_update.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "customer store rejected update".to_string(),
            ));
        }

        let mut customers = self.state.customers.write().await;
        let stored = customers
            .get_mut(&customer.id)
            .ok_or(StoreError::CustomerNotFound(customer.id))?;
        *stored = customer;
        self.state.update_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn add(&self, customer: Customer) -> Result<()> {
        tracing::debug!(customer_id = %customer.id, "customer added");
        self.state
            .customers
            .write()
            .await
            .insert(customer.id, customer);
        Ok(())
    }
}
