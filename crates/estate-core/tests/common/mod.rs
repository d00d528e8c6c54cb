#![allow(dead_code)]

use estate_core::{
    models::{AgentProfile, Profile, PropertyKind, RenterProfile},
    params::{AddressInput, CardInput, Login, PropertyInput, Register},
    Decimal, Marketplace, MarketplaceBuilder, Session,
};
use tempfile::TempDir;

pub const CARD: &str = "4111111111111111";

/// Helper function to create a test marketplace
pub async fn create_test_market() -> (TempDir, Marketplace) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let market = MarketplaceBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create marketplace");
    (temp_dir, market)
}

/// Registers a user and logs them in.
pub async fn sign_up(market: &Marketplace, email: &str, profile: Profile, join_rewards: bool) -> Session {
    market
        .register(&Register {
            email: email.to_string(),
            name: email.split('@').next().unwrap_or(email).to_string(),
            profile,
            join_rewards,
        })
        .await
        .expect("Failed to register");
    market
        .login(&Login {
            email: email.to_string(),
        })
        .await
        .expect("Failed to log in")
}

pub async fn renter(market: &Marketplace, email: &str, join_rewards: bool) -> Session {
    sign_up(market, email, Profile::Renter(RenterProfile::default()), join_rewards).await
}

pub async fn agent(market: &Marketplace, email: &str) -> Session {
    sign_up(market, email, Profile::Agent(AgentProfile::default()), false).await
}

/// Gives the renter a primary billing address and the test card.
pub async fn add_payment(market: &Marketplace, renter: &Session) {
    let address = market
        .add_address(
            renter,
            &AddressInput {
                street: "1 Main St".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip: "62701".to_string(),
                is_primary: true,
            },
        )
        .await
        .expect("Failed to add address");
    market
        .add_card(
            renter,
            &CardInput {
                card_number: CARD.to_string(),
                cvv: "123".to_string(),
                expiry: "2099-12".to_string(),
                billing_address_id: address.id,
            },
        )
        .await
        .expect("Failed to add card");
}

pub fn listing(city: &str, price: Decimal, kind: PropertyKind) -> PropertyInput {
    PropertyInput {
        street: "12 Elm St".to_string(),
        city: city.to_string(),
        state: "IL".to_string(),
        zip: "60601".to_string(),
        price,
        available: true,
        square_footage: None,
        description: None,
        neighborhood: None,
        kind,
    }
}
