//! Booking, listing and cancelling stays.

use log::debug;

use super::Marketplace;
use crate::{
    error::Result,
    models::{Booking, BookingReceipt, Role, StayPeriod},
    params::{BookProperty, Id},
    session::Session,
    validation::{parse_date, validate_card_number},
};

impl Marketplace {
    /// Books a property over `[start_date, end_date)` and pays with one of
    /// the caller's cards. Enrolled renters earn one point per whole unit of
    /// cost.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::InvalidInput` for malformed dates, an end date
    /// not after the start date or a card the caller does not own,
    /// `MarketError::NotFound` for an unknown property and
    /// `MarketError::Conflict` if the property is unavailable, the period
    /// overlaps an existing booking or the reward balance cannot take the
    /// credit
    pub async fn book(&self, session: &Session, params: &BookProperty) -> Result<BookingReceipt> {
        session.require(Role::Renter)?;
        let start = parse_date("start_date", &params.start_date)?;
        let end = parse_date("end_date", &params.end_date)?;
        let period = StayPeriod::new(start, end)?;
        let card_number = validate_card_number(&params.card_number)?;
        let email = session.email.clone();
        let property_id = params.property_id;

        self.with_db(move |db| db.book_property(&email, property_id, &card_number, period))
            .await
    }

    /// Renters see their own bookings; agents see bookings on their
    /// properties.
    pub async fn list_bookings(&self, session: &Session) -> Result<Vec<Booking>> {
        let session = session.clone();

        self.with_db(move |db| match session.role {
            Role::Renter => db.list_renter_bookings(&session.email),
            Role::Agent => db.list_agent_bookings(&session.email),
        })
        .await
    }

    /// Cancels a booking the caller made or one on a property they own.
    /// Returns whether anything was cancelled.
    pub async fn cancel_booking(&self, session: &Session, params: &Id) -> Result<bool> {
        let email = session.email.clone();
        let id = params.id;

        let cancelled = self
            .with_db(move |db| db.cancel_booking(&email, id))
            .await?;

        if !cancelled {
            debug!("Nothing cancelled for booking {id} requested by {}", session.email);
        }
        Ok(cancelled)
    }
}
