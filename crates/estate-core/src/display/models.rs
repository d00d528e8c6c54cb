//! Display implementations for domain models.
//!
//! This module contains all Display trait implementations for the core domain
//! models, separated from the model definitions to maintain clean separation of
//! concerns. Every implementation renders markdown, which the terminal
//! renderer styles and the web pages show verbatim.

use std::fmt;

use rust_decimal::Decimal;

use super::datetime::LocalDateTime;
use crate::models::{
    card::mask_card_number, Account, Address, Booking, BookingReceipt, CreditCard, Neighborhood,
    Profile, Property, PropertyKind, PropertyMatch, PropertyType, RewardAccount, RewardHistory, Role, User,
};

/// Formats an amount of money.
struct Money(Decimal);

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.name)?;
        writeln!(f)?;
        writeln!(f, "- **Email**: {}", self.email)?;
        writeln!(f, "- **Role**: {}", self.role)?;
        writeln!(f, "- **Member since**: {}", LocalDateTime(&self.created_at))
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user)?;

        match &self.profile {
            Some(Profile::Renter(renter)) => {
                if let Some(budget) = renter.budget {
                    writeln!(f, "- **Budget**: {}", Money(budget))?;
                }
                if let Some(location) = &renter.preferred_location {
                    writeln!(f, "- **Preferred location**: {location}")?;
                }
                if let Some(date) = renter.move_in_date {
                    writeln!(f, "- **Move-in date**: {date}")?;
                }
            }
            Some(Profile::Agent(agent)) => {
                if let Some(title) = &agent.job_title {
                    writeln!(f, "- **Job title**: {title}")?;
                }
                if let Some(agency) = &agent.agency {
                    writeln!(f, "- **Agency**: {agency}")?;
                }
                if let Some(contact) = &agent.contact_info {
                    writeln!(f, "- **Contact**: {contact}")?;
                }
            }
            None => {}
        }

        match &self.rewards {
            Some(rewards) => writeln!(f, "- **Reward points**: {}", rewards.points),
            None if self.user.role == Role::Renter => {
                writeln!(f, "- **Reward points**: not enrolled")
            }
            None => Ok(()),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let primary = if self.is_primary { " (primary)" } else { "" };
        writeln!(f, "## Address {}{primary}", self.id)?;
        writeln!(f)?;
        writeln!(f, "{}, {}, {} {}", self.street, self.city, self.state, self.zip)?;
        writeln!(f)
    }
}

impl fmt::Display for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Card `{}`", self.masked_number())?;
        writeln!(f)?;
        writeln!(f, "- **Expires**: {}", self.expiry_date)?;
        writeln!(f, "- **Billing address**: {}", self.billing_address_id)?;
        writeln!(f)
    }
}

impl fmt::Display for Neighborhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}", self.name)?;
        writeln!(f)?;
        writeln!(f, "- **Crime rate**: {:.2}", self.crime_rate)?;
        writeln!(f, "- **Nearby schools**: {}", self.nearby_schools)?;
        writeln!(f)
    }
}

impl PropertyKind {
    fn fmt_details(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKind::House { rooms } => writeln!(f, "- **Bedrooms**: {rooms}"),
            PropertyKind::Apartment { rooms, floor } => {
                writeln!(f, "- **Bedrooms**: {rooms}")?;
                writeln!(f, "- **Floor**: {floor}")
            }
            PropertyKind::Commercial { business_type } => {
                writeln!(f, "- **Business type**: {business_type}")
            }
            PropertyKind::Land { purpose } => writeln!(f, "- **Purpose**: {purpose}"),
            PropertyKind::VacationHome { rooms, amenities } => {
                writeln!(f, "- **Bedrooms**: {rooms}")?;
                if let Some(amenities) = amenities {
                    writeln!(f, "- **Amenities**: {amenities}")?;
                }
                Ok(())
            }
        }
    }
}

impl Property {
    fn fmt_body(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.location(), self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Type**: {}", self.property_type())?;
        self.kind.fmt_details(f)?;
        writeln!(f, "- **Price**: {} per day", Money(self.price))?;
        writeln!(
            f,
            "- **Available**: {}",
            if self.available { "yes" } else { "no" }
        )?;
        if let Some(sqft) = self.square_footage {
            writeln!(f, "- **Square footage**: {sqft}")?;
        }
        if let Some(neighborhood) = &self.neighborhood {
            writeln!(f, "- **Neighborhood**: {neighborhood}")?;
        }
        writeln!(f, "- **Agent**: {}", self.agent_email)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_body(f)?;
        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for PropertyMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.property.fmt_body(f)?;
        if let Some(rate) = self.crime_rate {
            writeln!(f, "- **Crime rate**: {rate:.2}")?;
        }
        if let Some(schools) = self.nearby_schools {
            writeln!(f, "- **Nearby schools**: {schools}")?;
        }
        if let Some(desc) = &self.property.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Booking {}: {}", self.id, self.property_location)?;
        writeln!(f)?;
        writeln!(f, "- **Property ID**: {}", self.property_id)?;
        writeln!(
            f,
            "- **Dates**: {} to {} ({} nights)",
            self.period.start(),
            self.period.end(),
            self.period.nights()
        )?;
        writeln!(f, "- **Renter**: {}", self.renter_email)?;
        writeln!(
            f,
            "- **Card**: `{}`",
            mask_card_number(&self.card_number)
        )?;
        writeln!(f, "- **Total cost**: {}", Money(self.total_cost))?;
        writeln!(f, "- **Booked**: {}", LocalDateTime(&self.booked_at))?;
        writeln!(f)
    }
}

impl fmt::Display for BookingReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Booked {} nights for {}",
            self.booking.period.nights(),
            Money(self.booking.total_cost)
        )?;
        writeln!(f)?;
        write!(f, "{}", self.booking)?;
        if let (Some(earned), Some(balance)) = (self.points_earned, self.points_balance) {
            writeln!(f, "Earned {earned} reward points. New balance: {balance}.")?;
        }
        Ok(())
    }
}

impl fmt::Display for RewardAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Reward points: {}", self.points)?;
        writeln!(f)?;
        writeln!(f, "- **Member**: {}", self.email)?;
        writeln!(f, "- **Enrolled**: {}", LocalDateTime(&self.enrolled_at))
    }
}

impl fmt::Display for RewardHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.account)?;
        writeln!(f)?;

        if self.entries.is_empty() {
            return writeln!(f, "No bookings have earned points yet.");
        }

        writeln!(f, "| Booking | Property | Dates | Nights | Cost | Points |")?;
        writeln!(f, "|-|-|-|-:|-:|-:|")?;
        for entry in &self.entries {
            writeln!(
                f,
                "| {} | {} | {} to {} | {} | {} | {} |",
                entry.booking_id,
                entry.property_location,
                entry.start_date,
                entry.end_date,
                entry.nights,
                Money(entry.total_cost),
                entry.points_earned
            )?;
        }
        Ok(())
    }
}
