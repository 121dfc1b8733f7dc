//! Side-effect rules shipped with the processor.

pub mod membership;
pub mod shipping;

pub use membership::MembershipActivationRule;
pub use shipping::ShippingSlipRule;
