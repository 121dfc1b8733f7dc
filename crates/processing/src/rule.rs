//! The side-effect rule capability.

use std::sync::Arc;

use async_trait::async_trait;
use domain::{ItemLine, PurchaseOrder};

use crate::error::RuleError;

/// A pluggable handler invoked once per order line.
///
/// Rules are called for every line regardless of item kind and decide for
/// themselves whether the line concerns them. Rules running on the same line
/// execute concurrently and each fetches its own copies of store records, so
/// two rules that read-modify-write the same customer fields can lose an
/// update. The rules in this crate touch disjoint data.
#[async_trait]
pub trait OrderRule: Send + Sync {
    /// Returns the name of this rule, used in logs, metrics and errors.
    fn name(&self) -> &'static str;

    /// Applies the rule's side effect for one line of the order.
    async fn apply(&self, order: &PurchaseOrder, line: &ItemLine) -> Result<(), RuleError>;
}

#[async_trait]
impl<R: OrderRule + ?Sized> OrderRule for Arc<R> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn apply(&self, order: &PurchaseOrder, line: &ItemLine) -> Result<(), RuleError> {
        (**self).apply(order, line).await
    }
}
