//! Command-line argument definitions using clap
//!
//! Each command has a clap `Args` wrapper that converts into the matching
//! core parameter type, keeping clap out of `estate-core`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Marketplace
//! ```
//!
//! Conversions that can fail (a property type whose required fields are
//! missing) use `TryFrom` and report the same `MarketError` the web forms do.

use clap::{Args, Subcommand, ValueEnum};
use estate_core::{
    models::{AgentProfile, Profile, PropertyType, RenterProfile, Role, SearchFilter, SortBy},
    params::{
        AddressInput, BookProperty, CardInput, CardNumber, Id, KindFields, Login,
        NeighborhoodInput, PropertyInput, Register, UpdateAddress, UpdateCard, UpdateProperty,
    },
    Decimal, MarketError,
};
use jiff::civil::Date;

/// Account role chosen at registration
#[derive(Clone, Copy, ValueEnum)]
pub enum RoleArg {
    Renter,
    Agent,
}

impl From<RoleArg> for Role {
    fn from(val: RoleArg) -> Self {
        match val {
            RoleArg::Renter => Role::Renter,
            RoleArg::Agent => Role::Agent,
        }
    }
}

/// Property type for listings and search
#[derive(Clone, Copy, ValueEnum)]
pub enum PropertyTypeArg {
    House,
    Apartment,
    #[value(alias = "commercial-building")]
    Commercial,
    Land,
    VacationHome,
}

impl From<PropertyTypeArg> for PropertyType {
    fn from(val: PropertyTypeArg) -> Self {
        match val {
            PropertyTypeArg::House => PropertyType::House,
            PropertyTypeArg::Apartment => PropertyType::Apartment,
            PropertyTypeArg::Commercial => PropertyType::Commercial,
            PropertyTypeArg::Land => PropertyType::Land,
            PropertyTypeArg::VacationHome => PropertyType::VacationHome,
        }
    }
}

/// Search result ordering
#[derive(Clone, Copy, ValueEnum)]
pub enum SortArg {
    Price,
    Bedrooms,
}

impl From<SortArg> for SortBy {
    fn from(val: SortArg) -> Self {
        match val {
            SortArg::Price => SortBy::Price,
            SortArg::Bedrooms => SortBy::Bedrooms,
        }
    }
}

// ============================================================================
// Accounts
// ============================================================================

#[derive(Args)]
pub struct LoginArgs {
    /// Email address of a registered user
    pub email: String,
}

impl From<LoginArgs> for Login {
    fn from(val: LoginArgs) -> Self {
        Login { email: val.email }
    }
}

/// Create a renter or agent account
///
/// Renter-only and agent-only options are ignored for the other role.
#[derive(Args)]
pub struct RegisterArgs {
    /// Email address, used to log in
    pub email: String,
    /// Display name
    #[arg(short, long)]
    pub name: String,
    #[arg(short, long, value_enum)]
    pub role: RoleArg,
    /// Monthly budget (renters)
    #[arg(long)]
    pub budget: Option<Decimal>,
    /// Preferred city or area (renters)
    #[arg(long)]
    pub preferred_location: Option<String>,
    /// Desired move-in date as YYYY-MM-DD (renters)
    #[arg(long)]
    pub move_in_date: Option<Date>,
    /// Job title (agents)
    #[arg(long)]
    pub job_title: Option<String>,
    /// Agency name (agents)
    #[arg(long)]
    pub agency: Option<String>,
    /// Phone number or other contact details (agents)
    #[arg(long)]
    pub contact_info: Option<String>,
    /// Enroll in the reward program right away (renters)
    #[arg(long)]
    pub join_rewards: bool,
}

impl From<RegisterArgs> for Register {
    fn from(val: RegisterArgs) -> Self {
        let profile = match Role::from(val.role) {
            Role::Renter => Profile::Renter(RenterProfile {
                budget: val.budget,
                preferred_location: val.preferred_location,
                move_in_date: val.move_in_date,
            }),
            Role::Agent => Profile::Agent(AgentProfile {
                job_title: val.job_title,
                agency: val.agency,
                contact_info: val.contact_info,
            }),
        };
        Register {
            email: val.email,
            name: val.name,
            profile,
            join_rewards: val.join_rewards,
        }
    }
}

// ============================================================================
// Addresses
// ============================================================================

#[derive(Args)]
pub struct AddressArgs {
    #[arg(long)]
    pub street: String,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub state: String,
    #[arg(long)]
    pub zip: String,
    /// Make this your primary address
    #[arg(long)]
    pub primary: bool,
}

impl From<AddressArgs> for AddressInput {
    fn from(val: AddressArgs) -> Self {
        AddressInput {
            street: val.street,
            city: val.city,
            state: val.state,
            zip: val.zip,
            is_primary: val.primary,
        }
    }
}

#[derive(Args)]
pub struct ModifyAddressArgs {
    /// ID of the address to replace
    pub id: u64,
    #[command(flatten)]
    pub address: AddressArgs,
}

impl From<ModifyAddressArgs> for UpdateAddress {
    fn from(val: ModifyAddressArgs) -> Self {
        UpdateAddress {
            id: val.id,
            address: val.address.into(),
        }
    }
}

#[derive(Args)]
pub struct IdArgs {
    pub id: u64,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum AddressCommands {
    /// Add an address
    #[command(alias = "a")]
    Add(AddressArgs),
    /// List your addresses
    #[command(aliases = ["v", "ls"])]
    View,
    /// Replace an address
    #[command(alias = "m")]
    Modify(ModifyAddressArgs),
    /// Delete an address that no card or booking depends on
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
}

// ============================================================================
// Credit cards
// ============================================================================

#[derive(Args)]
pub struct AddCardArgs {
    /// 16-digit card number; spaces and dashes are ignored
    pub card_number: String,
    /// 3-digit security code
    #[arg(long)]
    pub cvv: String,
    /// Expiry as YYYY-MM or YYYY-MM-DD
    #[arg(long)]
    pub expiry: String,
    /// ID of one of your addresses
    #[arg(long)]
    pub billing_address_id: u64,
}

impl From<AddCardArgs> for CardInput {
    fn from(val: AddCardArgs) -> Self {
        CardInput {
            card_number: val.card_number,
            cvv: val.cvv,
            expiry: val.expiry,
            billing_address_id: val.billing_address_id,
        }
    }
}

/// Change a card's CVV, expiry or billing address
#[derive(Args)]
pub struct ModifyCardArgs {
    pub card_number: String,
    #[arg(long)]
    pub cvv: Option<String>,
    #[arg(long)]
    pub expiry: Option<String>,
    #[arg(long)]
    pub billing_address_id: Option<u64>,
}

impl From<ModifyCardArgs> for UpdateCard {
    fn from(val: ModifyCardArgs) -> Self {
        UpdateCard {
            card_number: val.card_number,
            cvv: val.cvv,
            expiry: val.expiry,
            billing_address_id: val.billing_address_id,
        }
    }
}

#[derive(Args)]
pub struct CardNumberArgs {
    pub card_number: String,
}

impl From<CardNumberArgs> for CardNumber {
    fn from(val: CardNumberArgs) -> Self {
        CardNumber {
            card_number: val.card_number,
        }
    }
}

#[derive(Subcommand)]
pub enum PaymentCommands {
    /// Add a credit card
    #[command(alias = "a")]
    Add(AddCardArgs),
    /// Change a credit card
    #[command(alias = "m")]
    Modify(ModifyCardArgs),
    /// Delete a credit card no booking was paid with
    #[command(aliases = ["d", "rm"])]
    Delete(CardNumberArgs),
    /// List your credit cards
    #[command(aliases = ["v", "ls"])]
    View,
}

// ============================================================================
// Properties
// ============================================================================

/// Type-specific listing fields; which are required depends on `--type`
#[derive(Args)]
pub struct KindArgs {
    /// Bedrooms (house, apartment, vacation home)
    #[arg(long)]
    pub rooms: Option<u32>,
    /// Floor number (apartment)
    #[arg(long, allow_negative_numbers = true)]
    pub floor: Option<i32>,
    /// Kind of business (commercial)
    #[arg(long)]
    pub business_type: Option<String>,
    /// Intended use (land)
    #[arg(long)]
    pub purpose: Option<String>,
    /// Amenities (vacation home)
    #[arg(long)]
    pub amenities: Option<String>,
}

impl From<KindArgs> for KindFields {
    fn from(val: KindArgs) -> Self {
        KindFields {
            rooms: val.rooms,
            floor: val.floor,
            business_type: val.business_type,
            purpose: val.purpose,
            amenities: val.amenities,
        }
    }
}

#[derive(Args)]
pub struct PropertyArgs {
    #[arg(long = "type", value_enum)]
    pub property_type: PropertyTypeArg,
    #[arg(long)]
    pub street: String,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub state: String,
    #[arg(long)]
    pub zip: String,
    /// Daily rental price
    #[arg(long)]
    pub price: Decimal,
    /// List the property as not available for booking
    #[arg(long)]
    pub unavailable: bool,
    #[arg(long)]
    pub square_footage: Option<u32>,
    #[arg(short, long)]
    pub description: Option<String>,
    /// Name of an existing neighborhood
    #[arg(long)]
    pub neighborhood: Option<String>,
    #[command(flatten)]
    pub kind: KindArgs,
}

impl TryFrom<PropertyArgs> for PropertyInput {
    type Error = MarketError;

    fn try_from(val: PropertyArgs) -> Result<Self, Self::Error> {
        let kind = KindFields::from(val.kind).into_kind(val.property_type.into())?;
        Ok(PropertyInput {
            street: val.street,
            city: val.city,
            state: val.state,
            zip: val.zip,
            price: val.price,
            available: !val.unavailable,
            square_footage: val.square_footage,
            description: val.description,
            neighborhood: val.neighborhood,
            kind,
        })
    }
}

/// Replace every field of one of your listings
#[derive(Args)]
pub struct ModifyPropertyArgs {
    pub id: u64,
    #[command(flatten)]
    pub property: PropertyArgs,
}

impl TryFrom<ModifyPropertyArgs> for UpdateProperty {
    type Error = MarketError;

    fn try_from(val: ModifyPropertyArgs) -> Result<Self, Self::Error> {
        Ok(UpdateProperty {
            id: val.id,
            property: val.property.try_into()?,
        })
    }
}

#[derive(Subcommand)]
pub enum PropertyCommands {
    /// List a new property
    #[command(alias = "a")]
    Add(PropertyArgs),
    /// Replace a listing
    #[command(alias = "m")]
    Modify(ModifyPropertyArgs),
    /// Delete a listing without bookings
    #[command(aliases = ["d", "rm"])]
    Delete(IdArgs),
    /// List your properties
    #[command(aliases = ["v", "ls"])]
    View,
}

// ============================================================================
// Search and bookings
// ============================================================================

/// Search available properties
///
/// Every filter is optional. Properties without bedrooms (land, commercial)
/// count as 0 bedrooms for --min-bedrooms and 100 for --max-bedrooms.
#[derive(Args)]
pub struct SearchArgs {
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long = "type", value_enum)]
    pub property_type: Option<PropertyTypeArg>,
    #[arg(long)]
    pub min_bedrooms: Option<u32>,
    #[arg(long)]
    pub max_bedrooms: Option<u32>,
    #[arg(long)]
    pub min_price: Option<Decimal>,
    #[arg(long)]
    pub max_price: Option<Decimal>,
    /// Only properties free on this YYYY-MM-DD date
    #[arg(long)]
    pub available_on: Option<Date>,
    #[arg(long, value_enum)]
    pub sort_by: Option<SortArg>,
}

impl From<SearchArgs> for SearchFilter {
    fn from(val: SearchArgs) -> Self {
        SearchFilter {
            city: val.city,
            property_type: val.property_type.map(Into::into),
            min_bedrooms: val.min_bedrooms,
            max_bedrooms: val.max_bedrooms,
            min_price: val.min_price,
            max_price: val.max_price,
            available_on: val.available_on,
            sort_by: val.sort_by.map(Into::into),
        }
    }
}

/// Book a property from the start date up to (not including) the end date
#[derive(Args)]
pub struct BookPropertyArgs {
    pub property_id: u64,
    /// Card to pay with
    #[arg(long)]
    pub card: String,
    /// First night, YYYY-MM-DD
    #[arg(long)]
    pub start: String,
    /// Checkout day, YYYY-MM-DD
    #[arg(long)]
    pub end: String,
}

impl From<BookPropertyArgs> for BookProperty {
    fn from(val: BookPropertyArgs) -> Self {
        BookProperty {
            property_id: val.property_id,
            card_number: val.card,
            start_date: val.start,
            end_date: val.end,
        }
    }
}

#[derive(Subcommand)]
pub enum BookingCommands {
    /// List your bookings, or bookings on your properties for agents
    #[command(aliases = ["v", "ls"])]
    View,
    /// Cancel a booking
    #[command(alias = "c")]
    Cancel(IdArgs),
}

#[derive(Args)]
pub struct RewardsArgs {
    /// Show the points earned by each booking
    #[arg(long)]
    pub history: bool,
}

// ============================================================================
// Neighborhoods
// ============================================================================

#[derive(Args)]
pub struct NeighborhoodArgs {
    pub name: String,
    #[arg(long)]
    pub crime_rate: f64,
    /// Number of schools nearby
    #[arg(long)]
    pub schools: u32,
}

impl From<NeighborhoodArgs> for NeighborhoodInput {
    fn from(val: NeighborhoodArgs) -> Self {
        NeighborhoodInput {
            name: val.name,
            crime_rate: val.crime_rate,
            nearby_schools: val.schools,
        }
    }
}

#[derive(Args)]
pub struct ViewNeighborhoodArgs {
    /// Show a single neighborhood
    pub name: Option<String>,
}

#[derive(Subcommand)]
pub enum NeighborhoodCommands {
    /// Add a neighborhood
    #[command(alias = "a")]
    Add(NeighborhoodArgs),
    /// Change a neighborhood's crime rate and school count
    #[command(alias = "m")]
    Modify(NeighborhoodArgs),
    /// List neighborhoods
    #[command(aliases = ["v", "ls"])]
    View(ViewNeighborhoodArgs),
}

// ============================================================================
// Web server
// ============================================================================

#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "ESTATE_HOST", default_value = "127.0.0.1")]
    pub host: String,
    #[arg(long, env = "ESTATE_PORT", default_value_t = 8080)]
    pub port: u16,
    /// Secret of at least 64 bytes for encrypting session cookies; a random
    /// key is generated when absent, which logs everyone out on restart
    #[arg(long, env = "ESTATE_COOKIE_SECRET", hide_env_values = true)]
    pub cookie_secret: Option<String>,
}
