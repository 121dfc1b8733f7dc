//! Catalog items: books, videos and memberships.

use common::ItemId;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Kind of membership a customer can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MembershipKind {
    BookClub,
    VideoClub,
    Premium,
}

impl MembershipKind {
    /// Every kind that becomes active when this kind is granted.
    ///
    /// Premium includes both clubs.
    pub fn grants(&self) -> &'static [MembershipKind] {
        match self {
            MembershipKind::BookClub => &[MembershipKind::BookClub],
            MembershipKind::VideoClub => &[MembershipKind::VideoClub],
            MembershipKind::Premium => &[
                MembershipKind::Premium,
                MembershipKind::BookClub,
                MembershipKind::VideoClub,
            ],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipKind::BookClub => "BookClub",
            MembershipKind::VideoClub => "VideoClub",
            MembershipKind::Premium => "Premium",
        }
    }
}

impl std::fmt::Display for MembershipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant-specific data of an [`Item`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ItemDetails {
    /// A printed book; the only variant that ships.
    Book { author: String },
    /// A digital video.
    Video { director: String },
    /// A recurring membership.
    Membership { kind: MembershipKind },
}

/// A purchasable catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Unit price. Memberships default to zero when no price is set.
    #[serde(default)]
    pub price: Money,
    #[serde(flatten)]
    pub details: ItemDetails,
}

impl Item {
    /// Creates a book.
    pub fn book(name: impl Into<String>, author: impl Into<String>, price: Money) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            price,
            details: ItemDetails::Book {
                author: author.into(),
            },
        }
    }

    /// Creates a video.
    pub fn video(name: impl Into<String>, director: impl Into<String>, price: Money) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            price,
            details: ItemDetails::Video {
                director: director.into(),
            },
        }
    }

    /// Creates a membership priced at zero; use [`Item::with_price`] to set a price.
    pub fn membership(name: impl Into<String>, kind: MembershipKind) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            price: Money::zero(),
            details: ItemDetails::Membership { kind },
        }
    }

    /// Replaces the generated identifier.
    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = id;
        self
    }

    pub fn with_price(mut self, price: Money) -> Self {
        self.price = price;
        self
    }

    /// Returns true if the item has to be shipped.
    pub fn is_physical(&self) -> bool {
        matches!(self.details, ItemDetails::Book { .. })
    }

    /// Returns the membership kind if this item is a membership.
    pub fn membership_kind(&self) -> Option<MembershipKind> {
        match self.details {
            ItemDetails::Membership { kind } => Some(kind),
            _ => None,
        }
    }

    /// Short variant name, e.g. `"Book"`.
    pub fn type_name(&self) -> &'static str {
        match self.details {
            ItemDetails::Book { .. } => "Book",
            ItemDetails::Video { .. } => "Video",
            ItemDetails::Membership { .. } => "Membership",
        }
    }
}
