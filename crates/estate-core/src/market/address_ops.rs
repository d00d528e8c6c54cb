//! Renter address operations.

use super::Marketplace;
use crate::{
    error::Result,
    models::{Address, Role},
    params::{AddressInput, Id, UpdateAddress},
    session::Session,
    validation::require_text,
};

fn normalize_address(input: &AddressInput) -> Result<AddressInput> {
    Ok(AddressInput {
        street: require_text("street", &input.street)?,
        city: require_text("city", &input.city)?,
        state: require_text("state", &input.state)?,
        zip: require_text("zip", &input.zip)?,
        is_primary: input.is_primary,
    })
}

impl Marketplace {
    pub async fn add_address(&self, session: &Session, params: &AddressInput) -> Result<Address> {
        session.require(Role::Renter)?;
        let input = normalize_address(params)?;
        let email = session.email.clone();

        self.with_db(move |db| db.add_address(&email, &input)).await
    }

    pub async fn list_addresses(&self, session: &Session) -> Result<Vec<Address>> {
        session.require(Role::Renter)?;
        let email = session.email.clone();

        self.with_db(move |db| db.list_addresses(&email)).await
    }

    /// Replaces an address the caller owns.
    pub async fn update_address(
        &self,
        session: &Session,
        params: &UpdateAddress,
    ) -> Result<Address> {
        session.require(Role::Renter)?;
        let input = normalize_address(&params.address)?;
        let email = session.email.clone();
        let id = params.id;

        self.with_db(move |db| db.update_address(&email, id, &input))
            .await
    }

    /// Deletes an address the caller owns.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::Conflict` if a card bills to the address or a
    /// booked property sits at it
    pub async fn delete_address(&self, session: &Session, params: &Id) -> Result<Address> {
        session.require(Role::Renter)?;
        let email = session.email.clone();
        let id = params.id;

        self.with_db(move |db| db.delete_address(&email, id)).await
    }
}
