//! Registration, login and account lookup.

use log::info;

use super::Marketplace;
use crate::{
    error::{MarketError, Result},
    models::{Account, AgentProfile, Profile, RenterProfile, Role, User},
    params::{Login, Register},
    session::Session,
    validation::{optional_text, require_text, validate_amount, validate_email, MAX_AMOUNT},
};

fn normalize_profile(profile: &Profile) -> Result<Profile> {
    match profile {
        Profile::Renter(renter) => Ok(Profile::Renter(RenterProfile {
            budget: renter
                .budget
                .map(|b| validate_amount("budget", b, MAX_AMOUNT))
                .transpose()?,
            preferred_location: optional_text(renter.preferred_location.as_deref()),
            move_in_date: renter.move_in_date,
        })),
        Profile::Agent(agent) => Ok(Profile::Agent(AgentProfile {
            job_title: optional_text(agent.job_title.as_deref()),
            agency: optional_text(agent.agency.as_deref()),
            contact_info: optional_text(agent.contact_info.as_deref()),
        })),
    }
}

impl Marketplace {
    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::InvalidInput` for a malformed email, a blank
    /// name or an agent asking to join the reward program, and
    /// `MarketError::Conflict` if the email is already registered
    pub async fn register(&self, params: &Register) -> Result<User> {
        let email = validate_email(&params.email)?;
        let name = require_text("name", &params.name)?;
        let profile = normalize_profile(&params.profile)?;
        let join_rewards = params.join_rewards;

        if join_rewards && profile.role() != Role::Renter {
            return Err(MarketError::invalid_input("join_rewards")
                .with_reason("only renters can join the reward program"));
        }

        let user = self
            .with_db(move |db| db.register_user(&email, &name, &profile, join_rewards))
            .await?;

        info!("Registered {} as {}", user.email, user.role.as_str());
        Ok(user)
    }

    /// Looks up the user and returns a session carrying their role.
    pub async fn login(&self, params: &Login) -> Result<Session> {
        let email = validate_email(&params.email)?;

        let user = self
            .with_db(move |db| {
                db.get_user(&email)?
                    .ok_or_else(|| MarketError::not_found("User", email))
            })
            .await?;

        info!("{} logged in", user.email);
        Ok(Session::new(user.email, user.role))
    }

    /// The caller's account, profile and reward balance.
    pub async fn whoami(&self, session: &Session) -> Result<Account> {
        let session = session.clone();

        self.with_db(move |db| {
            let user = db
                .get_user(&session.email)?
                .ok_or(MarketError::NotLoggedIn)?;
            let profile = db.get_profile(&user.email, user.role)?;
            let rewards = match user.role {
                Role::Renter => db.get_reward_account(&user.email)?,
                Role::Agent => None,
            };
            Ok(Account {
                user,
                profile,
                rewards,
            })
        })
        .await
    }
}
