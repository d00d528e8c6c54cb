//! Renter credit card operations.

use super::Marketplace;
use crate::{
    error::Result,
    models::{CreditCard, Role},
    params::{CardInput, CardNumber, UpdateCard},
    session::Session,
    validation::{parse_expiry, today, validate_card_number, validate_cvv},
};

impl Marketplace {
    /// Adds a card billed to one of the caller's addresses.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::InvalidInput` for a malformed number or CVV, an
    /// expiry that is not in the future or a billing address the caller
    /// does not own, and `MarketError::Conflict` for a duplicate card
    pub async fn add_card(&self, session: &Session, params: &CardInput) -> Result<CreditCard> {
        session.require(Role::Renter)?;
        let card_number = validate_card_number(&params.card_number)?;
        let cvv = validate_cvv(&params.cvv)?;
        let expiry = parse_expiry(&params.expiry, today())?;
        let billing_address_id = params.billing_address_id;
        let email = session.email.clone();

        self.with_db(move |db| db.add_card(&email, &card_number, &cvv, expiry, billing_address_id))
            .await
    }

    pub async fn list_cards(&self, session: &Session) -> Result<Vec<CreditCard>> {
        session.require(Role::Renter)?;
        let email = session.email.clone();

        self.with_db(move |db| db.list_cards(&email)).await
    }

    /// Changes the CVV, expiry or billing address of a card. Absent fields
    /// keep their current value.
    pub async fn update_card(&self, session: &Session, params: &UpdateCard) -> Result<CreditCard> {
        session.require(Role::Renter)?;
        let card_number = validate_card_number(&params.card_number)?;
        let cvv = params.cvv.as_deref().map(validate_cvv).transpose()?;
        let expiry = params
            .expiry
            .as_deref()
            .map(|e| parse_expiry(e, today()))
            .transpose()?;
        let billing_address_id = params.billing_address_id;
        let email = session.email.clone();

        self.with_db(move |db| {
            db.update_card(
                &email,
                &card_number,
                cvv.as_deref(),
                expiry,
                billing_address_id,
            )
        })
        .await
    }

    /// Deletes a card unless a booking was paid with it.
    pub async fn delete_card(&self, session: &Session, params: &CardNumber) -> Result<CreditCard> {
        session.require(Role::Renter)?;
        let card_number = validate_card_number(&params.card_number)?;
        let email = session.email.clone();

        self.with_db(move |db| db.delete_card(&email, &card_number))
            .await
    }
}
