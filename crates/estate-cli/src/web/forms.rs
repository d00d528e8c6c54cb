//! Form bodies posted by the HTML pages.
//!
//! Browsers send every input as text and empty inputs as `""`, so the forms
//! keep plain strings and convert into core parameters here, reporting
//! unparseable numbers as `InvalidInput` like the core does.

use std::str::FromStr;

use estate_core::{
    models::{AgentProfile, Profile, PropertyType, RenterProfile, Role, SearchFilter, SortBy},
    params::{
        AddressInput, BookProperty, CardInput, KindFields, Login, NeighborhoodInput,
        PropertyInput, Register, UpdateCard,
    },
    validation::parse_date,
    MarketError, Result,
};
use serde::Deserialize;

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

fn text(value: &str) -> Option<String> {
    non_empty(value).map(str::to_string)
}

fn number<T: FromStr>(field: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        MarketError::invalid_input(field)
            .with_reason(format!("'{}' is not a valid number", value.trim()))
    })
}

fn optional_number<T: FromStr>(field: &str, value: &str) -> Result<Option<T>> {
    non_empty(value).map(|v| number(field, v)).transpose()
}

fn parsed<T: FromStr<Err = String>>(field: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|reason: String| MarketError::invalid_input(field).with_reason(reason))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
}

impl From<LoginForm> for Login {
    fn from(form: LoginForm) -> Self {
        Login { email: form.email }
    }
}

/// Registration for either role; the role-specific inputs of the other
/// role are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub email: String,
    pub name: String,
    pub role: String,
    pub budget: String,
    pub preferred_location: String,
    pub move_in_date: String,
    pub job_title: String,
    pub agency: String,
    pub contact_info: String,
    pub join_rewards: Option<String>,
}

impl TryFrom<RegisterForm> for Register {
    type Error = MarketError;

    fn try_from(form: RegisterForm) -> Result<Self> {
        let profile = match parsed::<Role>("role", &form.role)? {
            Role::Renter => Profile::Renter(RenterProfile {
                budget: optional_number("budget", &form.budget)?,
                preferred_location: text(&form.preferred_location),
                move_in_date: non_empty(&form.move_in_date)
                    .map(|date| parse_date("move_in_date", date))
                    .transpose()?,
            }),
            Role::Agent => Profile::Agent(AgentProfile {
                job_title: text(&form.job_title),
                agency: text(&form.agency),
                contact_info: text(&form.contact_info),
            }),
        };

        Ok(Register {
            email: form.email,
            name: form.name,
            profile,
            join_rewards: form.join_rewards.is_some(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddressForm {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub is_primary: Option<String>,
}

impl From<AddressForm> for AddressInput {
    fn from(form: AddressForm) -> Self {
        AddressInput {
            street: form.street,
            city: form.city,
            state: form.state,
            zip: form.zip,
            is_primary: form.is_primary.is_some(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CardForm {
    pub card_number: String,
    pub cvv: String,
    pub expiry: String,
    pub billing_address_id: String,
}

impl TryFrom<CardForm> for CardInput {
    type Error = MarketError;

    fn try_from(form: CardForm) -> Result<Self> {
        Ok(CardInput {
            billing_address_id: number("billing_address_id", &form.billing_address_id)?,
            card_number: form.card_number,
            cvv: form.cvv,
            expiry: form.expiry,
        })
    }
}

/// Card changes; blank inputs keep the current value.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EditCardForm {
    pub cvv: String,
    pub expiry: String,
    pub billing_address_id: String,
}

impl EditCardForm {
    pub fn into_params(self, card_number: String) -> Result<UpdateCard> {
        Ok(UpdateCard {
            card_number,
            cvv: text(&self.cvv),
            expiry: text(&self.expiry),
            billing_address_id: optional_number("billing_address_id", &self.billing_address_id)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PropertyForm {
    pub property_type: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub price: String,
    pub available: Option<String>,
    pub square_footage: String,
    pub description: String,
    pub neighborhood: String,
    pub rooms: String,
    pub floor: String,
    pub business_type: String,
    pub purpose: String,
    pub amenities: String,
}

impl TryFrom<PropertyForm> for PropertyInput {
    type Error = MarketError;

    fn try_from(form: PropertyForm) -> Result<Self> {
        let property_type = parsed::<PropertyType>("property_type", &form.property_type)?;
        let kind = KindFields {
            rooms: optional_number("rooms", &form.rooms)?,
            floor: optional_number("floor", &form.floor)?,
            business_type: text(&form.business_type),
            purpose: text(&form.purpose),
            amenities: text(&form.amenities),
        }
        .into_kind(property_type)?;

        Ok(PropertyInput {
            street: form.street,
            city: form.city,
            state: form.state,
            zip: form.zip,
            price: number("price", &form.price)?,
            available: form.available.is_some(),
            square_footage: optional_number("square_footage", &form.square_footage)?,
            description: text(&form.description),
            neighborhood: text(&form.neighborhood),
            kind,
        })
    }
}

/// Search inputs, accepted both as a query string and as a posted form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub city: String,
    pub property_type: String,
    pub min_bedrooms: String,
    pub max_bedrooms: String,
    pub min_price: String,
    pub max_price: String,
    pub available_on: String,
    pub sort_by: String,
}

impl TryFrom<SearchForm> for SearchFilter {
    type Error = MarketError;

    fn try_from(form: SearchForm) -> Result<Self> {
        Ok(SearchFilter {
            city: text(&form.city),
            property_type: non_empty(&form.property_type)
                .map(|value| parsed::<PropertyType>("property_type", value))
                .transpose()?,
            min_bedrooms: optional_number("min_bedrooms", &form.min_bedrooms)?,
            max_bedrooms: optional_number("max_bedrooms", &form.max_bedrooms)?,
            min_price: optional_number("min_price", &form.min_price)?,
            max_price: optional_number("max_price", &form.max_price)?,
            available_on: non_empty(&form.available_on)
                .map(|value| parse_date("available_on", value))
                .transpose()?,
            sort_by: non_empty(&form.sort_by)
                .map(|value| parsed::<SortBy>("sort_by", value))
                .transpose()?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BookForm {
    pub card_number: String,
    pub start_date: String,
    pub end_date: String,
}

impl BookForm {
    pub fn into_params(self, property_id: u64) -> BookProperty {
        BookProperty {
            property_id,
            card_number: self.card_number,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NeighborhoodForm {
    pub name: String,
    pub crime_rate: String,
    pub nearby_schools: String,
}

impl NeighborhoodForm {
    /// Uses `name` from the path when editing, else the posted name.
    pub fn into_params(self, name: Option<String>) -> Result<NeighborhoodInput> {
        Ok(NeighborhoodInput {
            name: name.unwrap_or(self.name),
            crime_rate: number("crime_rate", &self.crime_rate)?,
            nearby_schools: number("nearby_schools", &self.nearby_schools)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_register_form_builds_profile_for_role() {
        let form = RegisterForm {
            email: "ana@example.com".to_string(),
            name: "Ana".to_string(),
            role: "renter".to_string(),
            budget: "1500".to_string(),
            move_in_date: "2030-05-01".to_string(),
            join_rewards: Some("on".to_string()),
            agency: "ignored".to_string(),
            ..Default::default()
        };

        let params = Register::try_from(form).unwrap();
        assert!(params.join_rewards);
        match params.profile {
            Profile::Renter(profile) => {
                assert_eq!(profile.budget, Some(dec!(1500)));
                assert_eq!(profile.preferred_location, None);
                assert_eq!(profile.move_in_date.unwrap().to_string(), "2030-05-01");
            }
            Profile::Agent(_) => panic!("expected a renter profile"),
        }
    }

    #[test]
    fn test_register_form_rejects_unknown_role() {
        let form = RegisterForm {
            role: "landlord".to_string(),
            ..Default::default()
        };
        match Register::try_from(form) {
            Err(MarketError::InvalidInput { field, .. }) => assert_eq!(field, "role"),
            other => panic!("expected invalid role, got {other:?}"),
        }
    }

    #[test]
    fn test_property_form_parses_numbers_and_kind() {
        let form = PropertyForm {
            property_type: "apartment".to_string(),
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip: "62701".to_string(),
            price: "85.5".to_string(),
            available: Some("on".to_string()),
            rooms: "2".to_string(),
            floor: "3".to_string(),
            purpose: "ignored for apartments".to_string(),
            ..Default::default()
        };

        let input = PropertyInput::try_from(form).unwrap();
        assert_eq!(input.price, dec!(85.5));
        assert!(input.available);
        assert_eq!(input.square_footage, None);
        assert_eq!(input.kind.rooms(), Some(2));
        assert_eq!(input.kind.property_type(), PropertyType::Apartment);
    }

    #[test]
    fn test_property_form_reports_bad_number() {
        let form = PropertyForm {
            property_type: "house".to_string(),
            price: "cheap".to_string(),
            rooms: "3".to_string(),
            ..Default::default()
        };
        match PropertyInput::try_from(form) {
            Err(MarketError::InvalidInput { field, .. }) => assert_eq!(field, "price"),
            other => panic!("expected invalid price, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_search_form_matches_everything() {
        let filter = SearchFilter::try_from(SearchForm::default()).unwrap();
        assert_eq!(filter, SearchFilter::default());
    }

    #[test]
    fn test_search_form_filters() {
        let form = SearchForm {
            city: " Springfield ".to_string(),
            property_type: "vacation-home".to_string(),
            min_bedrooms: "2".to_string(),
            max_price: "149.99".to_string(),
            available_on: "2030-01-15".to_string(),
            sort_by: "bedrooms".to_string(),
            ..Default::default()
        };

        let filter = SearchFilter::try_from(form).unwrap();
        assert_eq!(filter.city.as_deref(), Some("Springfield"));
        assert_eq!(filter.property_type, Some(PropertyType::VacationHome));
        assert_eq!(filter.min_bedrooms, Some(2));
        assert_eq!(filter.max_bedrooms, None);
        assert_eq!(filter.min_price, None);
        assert_eq!(filter.max_price, Some(dec!(149.99)));
        assert_eq!(filter.sort_by, Some(SortBy::Bedrooms));
        assert!(filter.available_on.is_some());
    }

    #[test]
    fn test_edit_card_form_keeps_blank_fields() {
        let form = EditCardForm {
            expiry: "2031-04".to_string(),
            ..Default::default()
        };
        let params = form.into_params("4111111111111111".to_string()).unwrap();
        assert_eq!(params.cvv, None);
        assert_eq!(params.expiry.as_deref(), Some("2031-04"));
        assert_eq!(params.billing_address_id, None);
    }
}
