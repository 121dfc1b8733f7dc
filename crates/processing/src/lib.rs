//! Purchase order processing.
//!
//! The [`OrderProcessor`] validates the customer, prices the order and then
//! hands every line to each registered [`OrderRule`]:
//! 1. Lines are handled one after another, in order
//! 2. All rules for a line run concurrently and are joined before the next line
//! 3. The first rule failure aborts the remaining lines; nothing is rolled back
//!
//! Two rules ship with the crate: [`MembershipActivationRule`] and
//! [`ShippingSlipRule`].

pub mod error;
pub mod processor;
pub mod rule;
pub mod rules;

pub use error::{ProcessingError, RuleError};
pub use processor::OrderProcessor;
pub use rule::OrderRule;
pub use rules::{MembershipActivationRule, ShippingSlipRule};
