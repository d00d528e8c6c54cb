//! Neighborhood records maintained by agents.

use super::Marketplace;
use crate::{
    error::{MarketError, Result},
    models::{Neighborhood, Role},
    params::NeighborhoodInput,
    session::Session,
    validation::{require_text, validate_rate},
};

fn normalize_neighborhood(input: &NeighborhoodInput) -> Result<Neighborhood> {
    Ok(Neighborhood {
        name: require_text("name", &input.name)?,
        crime_rate: validate_rate("crime_rate", input.crime_rate)?,
        nearby_schools: input.nearby_schools,
    })
}

impl Marketplace {
    pub async fn add_neighborhood(
        &self,
        session: &Session,
        params: &NeighborhoodInput,
    ) -> Result<Neighborhood> {
        session.require(Role::Agent)?;
        let neighborhood = normalize_neighborhood(params)?;

        self.with_db(move |db| db.add_neighborhood(&neighborhood))
            .await
    }

    /// Changes the crime rate and school count of a neighborhood.
    pub async fn update_neighborhood(
        &self,
        session: &Session,
        params: &NeighborhoodInput,
    ) -> Result<Neighborhood> {
        session.require(Role::Agent)?;
        let neighborhood = normalize_neighborhood(params)?;

        self.with_db(move |db| db.update_neighborhood(&neighborhood))
            .await
    }

    pub async fn list_neighborhoods(&self, session: &Session) -> Result<Vec<Neighborhood>> {
        session.require(Role::Agent)?;

        self.with_db(|db| db.list_neighborhoods()).await
    }

    pub async fn get_neighborhood(&self, session: &Session, name: &str) -> Result<Neighborhood> {
        session.require(Role::Agent)?;
        let name = require_text("name", name)?;

        self.with_db(move |db| {
            db.get_neighborhood(&name)?
                .ok_or_else(|| MarketError::not_found("Neighborhood", name))
        })
        .await
    }
}
