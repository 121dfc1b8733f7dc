//! Customer records.

use std::collections::BTreeSet;

use common::CustomerId;
use serde::{Deserialize, Serialize};

use crate::item::MembershipKind;

/// A customer and the memberships they currently hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub address: Option<String>,
    #[serde(default)]
    pub active_memberships: BTreeSet<MembershipKind>,
}

impl Customer {
    /// Creates a customer without an address or memberships.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CustomerId::new(),
            name: name.into(),
            address: None,
            active_memberships: BTreeSet::new(),
        }
    }

    /// Replaces the generated identifier.
    pub fn with_id(mut self, id: CustomerId) -> Self {
        self.id = id;
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_membership(mut self, kind: MembershipKind) -> Self {
        self.active_memberships.insert(kind);
        self
    }

    pub fn has_membership(&self, kind: MembershipKind) -> bool {
        self.active_memberships.contains(&kind)
    }

    /// Activates `kind` and everything it grants.
    ///
    /// Returns `false` without touching the set when `kind` is already held,
    /// even if a cascaded kind happens to be missing.
    pub fn activate_membership(&mut self, kind: MembershipKind) -> bool {
        if self.has_membership(kind) {
            return false;
        }
        self.active_memberships.extend(kind.grants().iter().copied());
        true
    }

    /// The address to ship to, or `None` if it is missing or blank.
    ///
    /// A non-blank address is returned as stored, surrounding whitespace included.
    pub fn shipping_address(&self) -> Option<&str> {
        self.address
            .as_deref()
            .filter(|address| !address.trim().is_empty())
    }
}
