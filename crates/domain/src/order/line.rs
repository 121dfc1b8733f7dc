use common::LineId;
use serde::Serialize;

use crate::error::DomainError;
use crate::item::Item;
use crate::money::Money;

/// One (item, quantity) pair within a purchase order.
///
/// Lines are only built through [`ItemLine::new`] or [`ItemLine::single`], so
/// the quantity is always positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemLine {
    pub id: LineId,
    pub item: Item,
    quantity: u32,
}

impl ItemLine {
    /// Creates a line for `quantity` units of `item`.
    ///
    /// Returns [`DomainError::InvalidQuantity`] when `quantity` is zero.
    pub fn new(item: Item, quantity: u32) -> Result<Self, DomainError> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity { quantity });
        }
        Ok(Self {
            id: LineId::new(),
            item,
            quantity,
        })
    }

    /// Creates a line for a single unit.
    pub fn single(item: Item) -> Self {
        Self {
            id: LineId::new(),
            item,
            quantity: 1,
        }
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price contribution of this line: unit price times quantity.
    pub fn total_price(&self) -> Money {
        self.item.price.multiply(self.quantity)
    }

    /// Human-readable shipping description, e.g. `"Dune (x2)"`.
    pub fn describe(&self) -> String {
        format!("{} (x{})", self.item.name, self.quantity)
    }
}
