//! Property CRUD across the base table and the per-type subtype tables.

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, OptionalExtension, Row, Transaction};

use super::utils::{conversion_error, id_at, money_at, parsed_at, timestamp_at, to_cents};
use crate::{
    error::{DatabaseResultExt, MarketError, Result},
    models::{Property, PropertyKind, PropertyType},
    params::PropertyInput,
};

/// Columns of [`PROPERTY_FROM`], in the order [`property_from_row`] reads
/// them.
pub(crate) const PROPERTY_COLUMNS: &str = "p.id, p.agent_email, p.street, p.city, p.state, p.zip, \
     p.price_cents, p.available, p.square_footage, p.description, p.neighborhood, p.property_type, \
     p.created_at, h.rooms, a.rooms, a.floor, c.business_type, l.purpose, v.rooms, v.amenities";
pub(crate) const PROPERTY_FROM: &str = "FROM properties p \
     LEFT JOIN houses h ON h.property_id = p.id \
     LEFT JOIN apartments a ON a.property_id = p.id \
     LEFT JOIN commercial_buildings c ON c.property_id = p.id \
     LEFT JOIN lands l ON l.property_id = p.id \
     LEFT JOIN vacation_homes v ON v.property_id = p.id";

const INSERT_PROPERTY_SQL: &str = "INSERT INTO properties (agent_email, street, city, state, zip, price_cents, available, square_footage, description, neighborhood, property_type, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)";
const UPDATE_PROPERTY_SQL: &str = "UPDATE properties SET street = ?1, city = ?2, state = ?3, zip = ?4, price_cents = ?5, available = ?6, square_footage = ?7, description = ?8, neighborhood = ?9, property_type = ?10 WHERE id = ?11";
const DELETE_PROPERTY_SQL: &str = "DELETE FROM properties WHERE id = ?1";
const INSERT_HOUSE_SQL: &str = "INSERT INTO houses (property_id, rooms) VALUES (?1, ?2)";
const INSERT_APARTMENT_SQL: &str =
    "INSERT INTO apartments (property_id, rooms, floor) VALUES (?1, ?2, ?3)";
const INSERT_COMMERCIAL_SQL: &str =
    "INSERT INTO commercial_buildings (property_id, business_type) VALUES (?1, ?2)";
const INSERT_LAND_SQL: &str = "INSERT INTO lands (property_id, purpose) VALUES (?1, ?2)";
const INSERT_VACATION_HOME_SQL: &str =
    "INSERT INTO vacation_homes (property_id, rooms, amenities) VALUES (?1, ?2, ?3)";
const CHECK_NEIGHBORHOOD_EXISTS_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM neighborhoods WHERE name = ?1)";
const CHECK_PROPERTY_BOOKED_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM bookings WHERE property_id = ?1)";

/// Maps a row selected with [`PROPERTY_COLUMNS`].
pub(crate) fn property_from_row(row: &Row<'_>) -> rusqlite::Result<Property> {
    let property_type = parsed_at::<PropertyType>(row, 11)?;
    let missing = |idx: usize| {
        conversion_error(
            idx,
            format!("missing {} details", property_type.subtype_table()),
        )
    };
    let rooms_at = |idx: usize| -> rusqlite::Result<u32> {
        row.get::<_, Option<u32>>(idx)?.ok_or_else(|| missing(idx))
    };

    let kind = match property_type {
        PropertyType::House => PropertyKind::House { rooms: rooms_at(13)? },
        PropertyType::Apartment => PropertyKind::Apartment {
            rooms: rooms_at(14)?,
            floor: row.get::<_, Option<i32>>(15)?.ok_or_else(|| missing(15))?,
        },
        PropertyType::Commercial => PropertyKind::Commercial {
            business_type: row.get::<_, Option<String>>(16)?.ok_or_else(|| missing(16))?,
        },
        PropertyType::Land => PropertyKind::Land {
            purpose: row.get::<_, Option<String>>(17)?.ok_or_else(|| missing(17))?,
        },
        PropertyType::VacationHome => PropertyKind::VacationHome {
            rooms: rooms_at(18)?,
            amenities: row.get(19)?,
        },
    };

    Ok(Property {
        id: id_at(row, 0)?,
        agent_email: row.get(1)?,
        street: row.get(2)?,
        city: row.get(3)?,
        state: row.get(4)?,
        zip: row.get(5)?,
        price: money_at(row, 6)?,
        available: row.get(7)?,
        square_footage: row.get(8)?,
        description: row.get(9)?,
        neighborhood: row.get(10)?,
        kind,
        created_at: timestamp_at(row, 12)?,
    })
}

fn find_property(tx: &Transaction<'_>, id: u64) -> Result<Option<Property>> {
    let sql = format!("SELECT {PROPERTY_COLUMNS} {PROPERTY_FROM} WHERE p.id = ?1");
    tx.query_row(&sql, params![id as i64], property_from_row)
        .optional()
        .db_context("Failed to query property")
}

/// Loads a property the agent owns. Other agents' listings read as missing.
fn owned_property(tx: &Transaction<'_>, agent_email: &str, id: u64) -> Result<Property> {
    match find_property(tx, id)? {
        Some(property) if property.agent_email == agent_email => Ok(property),
        _ => Err(MarketError::not_found("Property", id)),
    }
}

fn ensure_neighborhood(tx: &Transaction<'_>, neighborhood: Option<&str>) -> Result<()> {
    let Some(name) = neighborhood else {
        return Ok(());
    };
    let exists: bool = tx
        .query_row(CHECK_NEIGHBORHOOD_EXISTS_SQL, params![name], |row| row.get(0))
        .db_context("Failed to check neighborhood")?;
    if exists {
        Ok(())
    } else {
        Err(MarketError::invalid_input("neighborhood")
            .with_reason(format!("unknown neighborhood '{name}'")))
    }
}

fn insert_subtype(tx: &Transaction<'_>, id: u64, kind: &PropertyKind) -> Result<()> {
    let id = id as i64;
    match kind {
        PropertyKind::House { rooms } => tx.execute(INSERT_HOUSE_SQL, params![id, rooms]),
        PropertyKind::Apartment { rooms, floor } => {
            tx.execute(INSERT_APARTMENT_SQL, params![id, rooms, floor])
        }
        PropertyKind::Commercial { business_type } => {
            tx.execute(INSERT_COMMERCIAL_SQL, params![id, business_type])
        }
        PropertyKind::Land { purpose } => tx.execute(INSERT_LAND_SQL, params![id, purpose]),
        PropertyKind::VacationHome { rooms, amenities } => {
            tx.execute(INSERT_VACATION_HOME_SQL, params![id, rooms, amenities])
        }
    }
    .db_context("Failed to insert property details")?;
    Ok(())
}

fn delete_subtype(tx: &Transaction<'_>, id: u64, property_type: PropertyType) -> Result<()> {
    let sql = format!(
        "DELETE FROM {} WHERE property_id = ?1",
        property_type.subtype_table()
    );
    tx.execute(&sql, params![id as i64])
        .db_context("Failed to delete property details")?;
    Ok(())
}

impl super::Database {
    /// Lists a property for an agent together with its subtype row.
    pub fn create_property(&mut self, agent_email: &str, input: &PropertyInput) -> Result<Property> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        ensure_neighborhood(&tx, input.neighborhood.as_deref())?;
        let price_cents = to_cents("price", input.price)?;

        let now = Timestamp::now();
        tx.execute(
            INSERT_PROPERTY_SQL,
            params![
                agent_email,
                input.street,
                input.city,
                input.state,
                input.zip,
                price_cents,
                input.available,
                input.square_footage,
                input.description,
                input.neighborhood,
                input.kind.property_type().as_str(),
                now.to_string()
            ],
        )
        .db_context("Failed to insert property")?;

        let id = tx.last_insert_rowid() as u64;
        insert_subtype(&tx, id, &input.kind)?;

        tx.commit().db_context("Failed to commit transaction")?;

        debug!(
            "Created {} property {id} for {agent_email}",
            input.kind.property_type().as_str()
        );

        Ok(Property {
            id,
            agent_email: agent_email.to_string(),
            street: input.street.clone(),
            city: input.city.clone(),
            state: input.state.clone(),
            zip: input.zip.clone(),
            price: input.price,
            available: input.available,
            square_footage: input.square_footage,
            description: input.description.clone(),
            neighborhood: input.neighborhood.clone(),
            kind: input.kind.clone(),
            created_at: now,
        })
    }

    /// Retrieves a property by its ID.
    pub fn get_property(&self, id: u64) -> Result<Option<Property>> {
        let sql = format!("SELECT {PROPERTY_COLUMNS} {PROPERTY_FROM} WHERE p.id = ?1");
        self.connection
            .query_row(&sql, params![id as i64], property_from_row)
            .optional()
            .db_context("Failed to query property")
    }

    /// Lists the properties owned by an agent.
    pub fn list_agent_properties(&self, agent_email: &str) -> Result<Vec<Property>> {
        let sql = format!(
            "SELECT {PROPERTY_COLUMNS} {PROPERTY_FROM} WHERE p.agent_email = ?1 ORDER BY p.id"
        );
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;

        let properties = stmt
            .query_map(params![agent_email], property_from_row)
            .db_context("Failed to query properties")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read property row")?;

        Ok(properties)
    }

    /// Replaces every field of an agent's listing. The old subtype row is
    /// always dropped and the new one inserted, so switching type discards
    /// the previous type's fields.
    pub fn update_property(
        &mut self,
        agent_email: &str,
        id: u64,
        input: &PropertyInput,
    ) -> Result<Property> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let existing = owned_property(&tx, agent_email, id)?;
        ensure_neighborhood(&tx, input.neighborhood.as_deref())?;
        let price_cents = to_cents("price", input.price)?;

        delete_subtype(&tx, id, existing.property_type())?;

        tx.execute(
            UPDATE_PROPERTY_SQL,
            params![
                input.street,
                input.city,
                input.state,
                input.zip,
                price_cents,
                input.available,
                input.square_footage,
                input.description,
                input.neighborhood,
                input.kind.property_type().as_str(),
                id as i64
            ],
        )
        .db_context("Failed to update property")?;

        insert_subtype(&tx, id, &input.kind)?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Property {
            street: input.street.clone(),
            city: input.city.clone(),
            state: input.state.clone(),
            zip: input.zip.clone(),
            price: input.price,
            available: input.available,
            square_footage: input.square_footage,
            description: input.description.clone(),
            neighborhood: input.neighborhood.clone(),
            kind: input.kind.clone(),
            ..existing
        })
    }

    /// Deletes an agent's listing and its subtype row. Refused while any
    /// booking references the property.
    pub fn delete_property(&mut self, agent_email: &str, id: u64) -> Result<Property> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let property = owned_property(&tx, agent_email, id)?;

        let booked: bool = tx
            .query_row(CHECK_PROPERTY_BOOKED_SQL, params![id as i64], |row| row.get(0))
            .db_context("Failed to check property bookings")?;
        if booked {
            return Err(MarketError::conflict(format!(
                "property {id} has bookings and cannot be deleted"
            )));
        }

        delete_subtype(&tx, id, property.property_type())?;
        tx.execute(DELETE_PROPERTY_SQL, params![id as i64])
            .db_context("Failed to delete property")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(property)
    }

    /// Number of subtype rows across all subtype tables for a property.
    pub fn count_property_details(&self, id: u64) -> Result<u32> {
        let mut total = 0;
        for property_type in PropertyType::ALL {
            let sql = format!(
                "SELECT COUNT(*) FROM {} WHERE property_id = ?1",
                property_type.subtype_table()
            );
            let count: u32 = self
                .connection
                .query_row(&sql, params![id as i64], |row| row.get(0))
                .db_context("Failed to count property details")?;
            total += count;
        }
        Ok(total)
    }
}
