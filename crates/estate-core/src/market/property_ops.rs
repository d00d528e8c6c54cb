//! Agent listings and the public property search.

use log::info;
use rust_decimal::Decimal;

use super::Marketplace;
use crate::{
    error::{MarketError, Result},
    models::{Property, PropertyKind, PropertyMatch, Role, SearchFilter},
    params::{Id, PropertyInput, UpdateProperty},
    session::Session,
    validation::{optional_text, require_text, validate_amount, MAX_AMOUNT},
};

fn normalize_kind(kind: &PropertyKind) -> Result<PropertyKind> {
    Ok(match kind {
        PropertyKind::Commercial { business_type } => PropertyKind::Commercial {
            business_type: require_text("business_type", business_type)?,
        },
        PropertyKind::Land { purpose } => PropertyKind::Land {
            purpose: require_text("purpose", purpose)?,
        },
        PropertyKind::VacationHome { rooms, amenities } => PropertyKind::VacationHome {
            rooms: *rooms,
            amenities: optional_text(amenities.as_deref()),
        },
        other => other.clone(),
    })
}

fn normalize_property(input: &PropertyInput, max_price: Decimal) -> Result<PropertyInput> {
    Ok(PropertyInput {
        street: require_text("street", &input.street)?,
        city: require_text("city", &input.city)?,
        state: require_text("state", &input.state)?,
        zip: require_text("zip", &input.zip)?,
        price: validate_amount("price", input.price, max_price)?,
        available: input.available,
        square_footage: input.square_footage,
        description: optional_text(input.description.as_deref()),
        neighborhood: optional_text(input.neighborhood.as_deref()),
        kind: normalize_kind(&input.kind)?,
    })
}

impl Marketplace {
    /// Lists a new property owned by the calling agent.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::InvalidInput` for blank address fields, a
    /// price that is negative or above the marketplace ceiling, or an
    /// unknown neighborhood
    pub async fn add_property(&self, session: &Session, params: &PropertyInput) -> Result<Property> {
        session.require(Role::Agent)?;
        let input = normalize_property(params, self.max_daily_price)?;
        let email = session.email.clone();

        let property = self
            .with_db(move |db| db.create_property(&email, &input))
            .await?;

        info!(
            "{} listed {} {}",
            property.agent_email,
            property.property_type().as_str(),
            property.id
        );
        Ok(property)
    }

    /// The calling agent's own listings.
    pub async fn list_properties(&self, session: &Session) -> Result<Vec<Property>> {
        session.require(Role::Agent)?;
        let email = session.email.clone();

        self.with_db(move |db| db.list_agent_properties(&email))
            .await
    }

    /// Retrieves any property by ID.
    pub async fn get_property(&self, params: &Id) -> Result<Property> {
        let id = params.id;

        self.with_db(move |db| {
            db.get_property(id)?
                .ok_or_else(|| MarketError::not_found("Property", id))
        })
        .await
    }

    /// Replaces every field of a listing the caller owns. A change of kind
    /// swaps the subtype row.
    pub async fn update_property(
        &self,
        session: &Session,
        params: &UpdateProperty,
    ) -> Result<Property> {
        session.require(Role::Agent)?;
        let input = normalize_property(&params.property, self.max_daily_price)?;
        let email = session.email.clone();
        let id = params.id;

        self.with_db(move |db| db.update_property(&email, id, &input))
            .await
    }

    /// Deletes a listing the caller owns.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::Conflict` if the property has any booking
    pub async fn delete_property(&self, session: &Session, params: &Id) -> Result<Property> {
        session.require(Role::Agent)?;
        let email = session.email.clone();
        let id = params.id;

        let property = self
            .with_db(move |db| db.delete_property(&email, id))
            .await?;

        info!("{} removed property {}", property.agent_email, property.id);
        Ok(property)
    }

    /// Searches available properties. Open to everyone.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::InvalidInput` if a lower bound exceeds its upper
    /// bound or a price bound is negative
    pub async fn search(&self, filter: &SearchFilter) -> Result<Vec<PropertyMatch>> {
        if let (Some(min), Some(max)) = (filter.min_bedrooms, filter.max_bedrooms) {
            if min > max {
                return Err(MarketError::invalid_input("min_bedrooms")
                    .with_reason("must not exceed max_bedrooms"));
            }
        }
        if let Some(min) = filter.min_price {
            validate_amount("min_price", min, MAX_AMOUNT)?;
        }
        if let Some(max) = filter.max_price {
            validate_amount("max_price", max, MAX_AMOUNT)?;
        }
        if let (Some(min), Some(max)) = (filter.min_price, filter.max_price) {
            if min > max {
                return Err(MarketError::invalid_input("min_price")
                    .with_reason("must not exceed max_price"));
            }
        }

        let mut filter = filter.clone();
        filter.city = optional_text(filter.city.as_deref());

        self.with_db(move |db| db.search_properties(&filter)).await
    }
}
