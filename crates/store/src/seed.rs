//! Demo catalog and customer used when the service starts with seeded data.

use common::{CustomerId, ItemId};
use domain::{Customer, Item, MembershipKind, Money};
use uuid::Uuid;

use crate::{CustomerStore, ItemCatalog, Result};

pub const BOOK_ID: Uuid = Uuid::from_u128(0xa1b2c3d4_e5f6_7788_99a0_b1c2d3e4f5a6);
pub const VIDEO_ID: Uuid = Uuid::from_u128(0xb2c3d4e5_f6a7_8899_a0b1_c2d3e4f5a6b7);
pub const BOOK_CLUB_ID: Uuid = Uuid::from_u128(0xc3d4e5f6_a7b8_99a0_b1c2_d3e4f5a6b7c8);
pub const VIDEO_CLUB_ID: Uuid = Uuid::from_u128(0xd4e5f6a7_b8c9_a0b1_c2d3_e4f5a6b7c8d9);
pub const PREMIUM_ID: Uuid = Uuid::from_u128(0xe5f6a7b8_c9d0_b1c2_d3e4_f5a6b7c8d9e0);
pub const DEFAULT_CUSTOMER_ID: Uuid = Uuid::from_u128(0xf2e1a0a3_1b9c_4a7e_8c3d_9b8e1a0f2b9c);

/// The demo catalog: one book, one video and the three memberships.
pub fn demo_items() -> Vec<Item> {
    vec![
        Item::book(
            "The Girl on the Train",
            "Paula Hawkins",
            Money::from_cents(1299),
        )
        .with_id(ItemId::from_uuid(BOOK_ID)),
        Item::video(
            "Comprehensive First Aid Training",
            "Jane Doe",
            Money::from_cents(999),
        )
        .with_id(ItemId::from_uuid(VIDEO_ID)),
        Item::membership("Book Club Membership", MembershipKind::BookClub)
            .with_price(Money::from_cents(2500))
            .with_id(ItemId::from_uuid(BOOK_CLUB_ID)),
        Item::membership("Video Club Membership", MembershipKind::VideoClub)
            .with_price(Money::from_cents(3500))
            .with_id(ItemId::from_uuid(VIDEO_CLUB_ID)),
        Item::membership("Premium Membership", MembershipKind::Premium)
            .with_price(Money::from_cents(5500))
            .with_id(ItemId::from_uuid(PREMIUM_ID)),
    ]
}

/// The demo customer, with an address and no memberships.
pub fn demo_customer() -> Customer {
    Customer::new("Default Customer")
        .with_id(CustomerId::from_uuid(DEFAULT_CUSTOMER_ID))
        .with_address("123 Default St")
}

/// Loads the demo catalog and customer into the given stores.
pub async fn load_demo_data<C, I>(customers: &C, catalog: &I) -> Result<()>
where
    C: CustomerStore + ?Sized,
    I: ItemCatalog + ?Sized,
{
    for item in demo_items() {
        catalog.add(item).await?;
    }
    customers.add(demo_customer()).await?;
    tracing::info!("demo catalog and customer loaded");
    Ok(())
}
