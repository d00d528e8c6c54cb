//! Parameter structures for marketplace operations.
//!
//! These structures are shared by the command line and the web front end.
//! Each interface keeps its own argument or form types and converts them
//! into these with `From` impls, so the core stays free of clap and axum.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   Web Forms     │
//! │  (clap derives) │    │ (serde derives) │
//! └────────┬────────┘    └────────┬────────┘
//!          └──────────┬───────────┘
//!                     ▼
//!           ┌─────────────────┐
//!           │  Core Params    │
//!           └─────────────────┘
//! ```
//!
//! Raw user input such as dates, card numbers and emails stays textual here
//! and is validated by the [`Marketplace`](crate::Marketplace) so both front
//! ends report identical messages.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    error::{MarketError, Result},
    models::{Profile, PropertyKind, PropertyType},
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Register {
    pub email: String,
    pub name: String,
    /// Role-specific details; also decides the role
    pub profile: Profile,
    /// Renters only: enroll in the reward program immediately
    #[serde(default)]
    pub join_rewards: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Login {
    pub email: String,
}

/// Fields of a renter address.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddressInput {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    /// Make this the primary address, clearing any other primary
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAddress {
    pub id: u64,
    #[serde(flatten)]
    pub address: AddressInput,
}

/// Parameters for adding a credit card.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardInput {
    pub card_number: String,
    pub cvv: String,
    /// `YYYY-MM-DD` or `YYYY-MM`
    pub expiry: String,
    pub billing_address_id: u64,
}

/// Parameters for modifying a credit card. Absent fields are unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCard {
    pub card_number: String,
    pub cvv: Option<String>,
    pub expiry: Option<String>,
    pub billing_address_id: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardNumber {
    pub card_number: String,
}

/// Full description of a property listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyInput {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    /// Daily rental price
    pub price: Decimal,
    pub available: bool,
    pub square_footage: Option<u32>,
    pub description: Option<String>,
    pub neighborhood: Option<String>,
    pub kind: PropertyKind,
}

/// Replaces every field of a listing. Changing the kind discards the old
/// type-specific fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProperty {
    pub id: u64,
    #[serde(flatten)]
    pub property: PropertyInput,
}

/// Type-specific property fields as flat optional values, the shape both
/// command-line flags and HTML forms produce.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KindFields {
    pub rooms: Option<u32>,
    pub floor: Option<i32>,
    pub business_type: Option<String>,
    pub purpose: Option<String>,
    pub amenities: Option<String>,
}

impl KindFields {
    /// Builds the [`PropertyKind`] for `property_type`, requiring the fields
    /// that type needs and ignoring the rest.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::InvalidInput` naming the first missing field
    pub fn into_kind(self, property_type: PropertyType) -> Result<PropertyKind> {
        let missing = |field: &str| {
            MarketError::invalid_input(field).with_reason(format!(
                "is required for {} listings",
                property_type.label().to_lowercase()
            ))
        };

        Ok(match property_type {
            PropertyType::House => PropertyKind::House {
                rooms: self.rooms.ok_or_else(|| missing("rooms"))?,
            },
            PropertyType::Apartment => PropertyKind::Apartment {
                rooms: self.rooms.ok_or_else(|| missing("rooms"))?,
                floor: self.floor.ok_or_else(|| missing("floor"))?,
            },
            PropertyType::Commercial => PropertyKind::Commercial {
                business_type: self.business_type.ok_or_else(|| missing("business_type"))?,
            },
            PropertyType::Land => PropertyKind::Land {
                purpose: self.purpose.ok_or_else(|| missing("purpose"))?,
            },
            PropertyType::VacationHome => PropertyKind::VacationHome {
                rooms: self.rooms.ok_or_else(|| missing("rooms"))?,
                amenities: self.amenities,
            },
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NeighborhoodInput {
    pub name: String,
    pub crime_rate: f64,
    pub nearby_schools: u32,
}

/// Parameters for booking a property over `[start_date, end_date)`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookProperty {
    pub property_id: u64,
    pub card_number: String,
    /// `YYYY-MM-DD`, first night
    pub start_date: String,
    /// `YYYY-MM-DD`, checkout day
    pub end_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_fields_require_type_specific_values() {
        let fields = KindFields {
            rooms: Some(2),
            purpose: Some("Grazing".to_string()),
            ..Default::default()
        };

        assert_eq!(
            fields.clone().into_kind(PropertyType::House).unwrap(),
            PropertyKind::House { rooms: 2 }
        );
        assert_eq!(
            fields.clone().into_kind(PropertyType::Land).unwrap(),
            PropertyKind::Land {
                purpose: "Grazing".to_string()
            }
        );

        let err = fields.into_kind(PropertyType::Apartment).unwrap_err();
        assert!(matches!(err, MarketError::InvalidInput { ref field, .. } if field == "floor"));
    }
}
