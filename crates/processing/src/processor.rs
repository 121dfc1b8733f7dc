//! Order processor: validation, pricing and per-line rule dispatch.

use std::time::Instant;

use domain::{ItemLine, PurchaseOrder};
use futures_util::future::join_all;
use store::CustomerStore;

use crate::error::{ProcessingError, Result};
use crate::rule::OrderRule;

/// Processes purchase orders against an ordered set of rules.
///
/// The rule list is fixed at construction; adding a rule never requires
/// changing the processor. The processor itself only reads the customer
/// store, all writes happen inside rules.
pub struct OrderProcessor<C: CustomerStore> {
    customers: C,
    rules: Vec<Box<dyn OrderRule>>,
}

impl<C: CustomerStore> OrderProcessor<C> {
    /// Creates a processor with no rules.
    pub fn new(customers: C) -> Self {
        Self {
            customers,
            rules: Vec::new(),
        }
    }

    /// Adds a rule and returns the processor.
    pub fn with_rule(mut self, rule: impl OrderRule + 'static) -> Self {
        self.register(Box::new(rule));
        self
    }

    /// Registers a rule with this processor.
    pub fn register(&mut self, rule: Box<dyn OrderRule>) {
        self.rules.push(rule);
    }

    /// Returns the number of registered rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the names of registered rules in registration order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Processes a pending order and returns it with its total and final status.
    ///
    /// An unknown customer is not an error: the order comes back with status
    /// `FailedInvalidCustomer` and no rule is invoked. A rule failure aborts
    /// the remaining lines and is returned as [`ProcessingError::RuleFailed`];
    /// side effects already applied stay in place. Calling this twice for the
    /// same order runs every rule twice.
    #[tracing::instrument(
        skip(self, order),
        fields(order_id = %order.id(), customer_id = %order.customer_id())
    )]
    pub async fn process(&self, order: PurchaseOrder) -> Result<PurchaseOrder> {
        let started = Instant::now();
        tracing::info!("processing purchase order");

        let result = self.run(order).await;
        Self::record_outcome(outcome_label(&result), started);
        match &result {
            Ok(order) => {
                tracing::info!(status = %order.status(), "finished processing purchase order")
            }
            Err(error) => tracing::error!(%error, "purchase order processing failed"),
        }
        result
    }

    async fn run(&self, mut order: PurchaseOrder) -> Result<PurchaseOrder> {
        order.start_processing()?;

        if self.customers.get(order.customer_id()).await?.is_none() {
            tracing::error!("customer not found, aborting purchase order");
            order.fail_invalid_customer()?;
            return Ok(order);
        }

        let total = order.compute_total();
        tracing::info!(%total, "calculated total price");

        for line in order.lines() {
            self.dispatch_line(&order, line).await?;
        }

        order.complete()?;
        Ok(order)
    }

    /// Runs every rule on one line concurrently and waits for all of them.
    ///
    /// All rules finish before the first failure (in registration order) is
    /// reported.
    async fn dispatch_line(&self, order: &PurchaseOrder, line: &ItemLine) -> Result<()> {
        tracing::debug!(
            line_id = %line.id,
            item = %line.item.name,
            "dispatching item line to rules"
        );

        let results = join_all(self.rules.iter().map(|rule| rule.apply(order, line))).await;

        for (rule, result) in self.rules.iter().zip(results) {
            metrics::counter!("order_rule_invocations_total", "rule" => rule.name()).increment(1);
            if let Err(source) = result {
                metrics::counter!("order_rule_failures_total", "rule" => rule.name())
                    .increment(1);
                tracing::error!(
                    rule = rule.name(),
                    line_id = %line.id,
                    error = %source,
                    "rule failed, aborting remaining lines"
                );
                return Err(ProcessingError::RuleFailed {
                    rule: rule.name(),
                    line_id: line.id,
                    source,
                });
            }
        }

        Ok(())
    }

    fn record_outcome(status: &'static str, started: Instant) {
        metrics::counter!("orders_processed_total", "status" => status).increment(1);
        metrics::histogram!("order_processing_duration_seconds")
            .record(started.elapsed().as_secs_f64());
    }
}

/// Label for the `status` dimension of the processing metrics.
///
/// Runs that end in an error are reported as `"Failed"`.
fn outcome_label(result: &Result<PurchaseOrder>) -> &'static str {
    match result {
        Ok(order) => order.status().as_str(),
        Err(_) => "Failed",
    }
}
