//! Processing error types.

use common::LineId;
use domain::DomainError;
use store::StoreError;
use thiserror::Error;

/// Errors raised by a rule while handling one order line.
#[derive(Debug, Error)]
pub enum RuleError {
    /// A store call made by the rule failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The rule could not apply its side effect.
    #[error("{0}")]
    Failed(String),
}

/// Errors that abort processing of a purchase order.
///
/// A failed call may leave side effects of earlier lines, and of sibling
/// rules on the failing line, in place.
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// A rule failed while handling a line.
    #[error("Rule '{rule}' failed on line {line_id}: {source}")]
    RuleFailed {
        rule: &'static str,
        line_id: LineId,
        #[source]
        source: RuleError,
    },

    /// The customer lookup failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The order was not in a processable status.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

/// Convenience type alias for processing results.
pub type Result<T> = std::result::Result<T, ProcessingError>;
