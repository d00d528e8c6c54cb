//! Rental properties and their type-specific details.

use std::str::FromStr;

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Type tag stored on the property row; selects the subtype table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    House,
    Apartment,
    Commercial,
    Land,
    VacationHome,
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "house" => Ok(PropertyType::House),
            "apartment" => Ok(PropertyType::Apartment),
            "commercial" | "commercial_building" => Ok(PropertyType::Commercial),
            "land" => Ok(PropertyType::Land),
            "vacation_home" => Ok(PropertyType::VacationHome),
            _ => Err(format!("Invalid property type: {s}")),
        }
    }
}

impl PropertyType {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::House => "house",
            PropertyType::Apartment => "apartment",
            PropertyType::Commercial => "commercial",
            PropertyType::Land => "land",
            PropertyType::VacationHome => "vacation_home",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::House => "House",
            PropertyType::Apartment => "Apartment",
            PropertyType::Commercial => "Commercial Building",
            PropertyType::Land => "Land",
            PropertyType::VacationHome => "Vacation Home",
        }
    }

    /// Subtype table holding this type's fields.
    pub(crate) fn subtype_table(&self) -> &'static str {
        match self {
            PropertyType::House => "houses",
            PropertyType::Apartment => "apartments",
            PropertyType::Commercial => "commercial_buildings",
            PropertyType::Land => "lands",
            PropertyType::VacationHome => "vacation_homes",
        }
    }

    pub const ALL: [PropertyType; 5] = [
        PropertyType::House,
        PropertyType::Apartment,
        PropertyType::Commercial,
        PropertyType::Land,
        PropertyType::VacationHome,
    ];
}

/// Type-specific fields of a property, one variant per subtype table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyKind {
    House { rooms: u32 },
    Apartment { rooms: u32, floor: i32 },
    Commercial { business_type: String },
    Land { purpose: String },
    VacationHome { rooms: u32, amenities: Option<String> },
}

impl PropertyKind {
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyKind::House { .. } => PropertyType::House,
            PropertyKind::Apartment { .. } => PropertyType::Apartment,
            PropertyKind::Commercial { .. } => PropertyType::Commercial,
            PropertyKind::Land { .. } => PropertyType::Land,
            PropertyKind::VacationHome { .. } => PropertyType::VacationHome,
        }
    }

    /// Bedroom count, for the variants that have one.
    pub fn rooms(&self) -> Option<u32> {
        match self {
            PropertyKind::House { rooms }
            | PropertyKind::Apartment { rooms, .. }
            | PropertyKind::VacationHome { rooms, .. } => Some(*rooms),
            PropertyKind::Commercial { .. } | PropertyKind::Land { .. } => None,
        }
    }
}

/// A listed property.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub id: u64,
    pub agent_email: String,
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
    pub created_at: Timestamp,
}

impl Property {
    pub fn property_type(&self) -> PropertyType {
        self.kind.property_type()
    }

    /// One-line street address.
    pub fn location(&self) -> String {
        format!("{}, {}, {} {}", self.street, self.city, self.state, self.zip)
    }
}
