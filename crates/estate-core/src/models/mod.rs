//! Data models for the rental marketplace.
//!
//! These types mirror the persisted rows: users with a single [`Role`],
//! renter-owned [`Address`]es and [`CreditCard`]s, agent-owned
//! [`Property`] listings whose type-specific fields live in
//! [`PropertyKind`], [`Neighborhood`]s, [`Booking`]s over a half-open
//! [`StayPeriod`] and reward balances.
//!
//! Display implementations live in [`crate::display::models`] and render
//! markdown for the terminal and the web pages alike.

pub mod address;
pub mod booking;
pub mod card;
pub mod filters;
pub mod neighborhood;
pub mod property;
pub mod reward;
pub mod user;


pub use address::Address;
pub use booking::{reward_points_for, Booking, BookingReceipt, StayPeriod};
pub use card::CreditCard;
pub use filters::{PropertyMatch, SearchFilter, SortBy};
pub use neighborhood::Neighborhood;
pub use property::{Property, PropertyKind, PropertyType};
pub use reward::{RewardAccount, RewardEntry, RewardHistory};
pub use user::{Account, AgentProfile, Profile, RenterProfile, Role, User};
