//! User registration and lookup.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::utils::{optional_date_at, optional_money_at, parsed_at, timestamp_at, to_cents};
use crate::{
    error::{DatabaseResultExt, MarketError, Result},
    models::{AgentProfile, Profile, RenterProfile, Role, User},
};

const CHECK_USER_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1)";
const INSERT_USER_SQL: &str =
    "INSERT INTO users (email, name, role, created_at) VALUES (?1, ?2, ?3, ?4)";
const INSERT_RENTER_SQL: &str = "INSERT INTO renters (email, budget_cents, preferred_location, move_in_date) VALUES (?1, ?2, ?3, ?4)";
const INSERT_AGENT_SQL: &str =
    "INSERT INTO agents (email, job_title, agency, contact_info) VALUES (?1, ?2, ?3, ?4)";
const INSERT_REWARD_ACCOUNT_SQL: &str =
    "INSERT INTO reward_accounts (email, points, enrolled_at) VALUES (?1, 0, ?2)";
const SELECT_USER_SQL: &str = "SELECT email, name, role, created_at FROM users WHERE email = ?1";
const SELECT_RENTER_SQL: &str =
    "SELECT budget_cents, preferred_location, move_in_date FROM renters WHERE email = ?1";
const SELECT_AGENT_SQL: &str =
    "SELECT job_title, agency, contact_info FROM agents WHERE email = ?1";

impl super::Database {
    /// Registers a user with their role-specific profile. Renters may be
    /// enrolled in the reward program in the same transaction.
    pub fn register_user(
        &mut self,
        email: &str,
        name: &str,
        profile: &Profile,
        join_rewards: bool,
    ) -> Result<User> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_USER_EXISTS_SQL, params![email], |row| row.get(0))
            .db_context("Failed to check for existing user")?;
        if exists {
            return Err(MarketError::conflict(format!(
                "an account with email {email} already exists"
            )));
        }

        let role = profile.role();
        let now = Timestamp::now();

        tx.execute(
            INSERT_USER_SQL,
            params![email, name, role.as_str(), now.to_string()],
        )
        .db_context("Failed to insert user")?;

        match profile {
            Profile::Renter(renter) => {
                tx.execute(
                    INSERT_RENTER_SQL,
                    params![
                        email,
                        renter.budget.map(|b| to_cents("budget", b)).transpose()?,
                        renter.preferred_location,
                        renter.move_in_date.map(|d| d.to_string())
                    ],
                )
                .db_context("Failed to insert renter profile")?;

                if join_rewards {
                    tx.execute(INSERT_REWARD_ACCOUNT_SQL, params![email, now.to_string()])
                        .db_context("Failed to enroll in reward program")?;
                }
            }
            Profile::Agent(agent) => {
                tx.execute(
                    INSERT_AGENT_SQL,
                    params![email, agent.job_title, agent.agency, agent.contact_info],
                )
                .db_context("Failed to insert agent profile")?;
            }
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(User {
            email: email.to_string(),
            name: name.to_string(),
            role,
            created_at: now,
        })
    }

    /// Retrieves a user by email.
    pub fn get_user(&self, email: &str) -> Result<Option<User>> {
        self.connection
            .query_row(SELECT_USER_SQL, params![email], |row| {
                Ok(User {
                    email: row.get(0)?,
                    name: row.get(1)?,
                    role: parsed_at::<Role>(row, 2)?,
                    created_at: timestamp_at(row, 3)?,
                })
            })
            .optional()
            .db_context("Failed to query user")
    }

    /// Retrieves the role-specific profile of a user.
    pub fn get_profile(&self, email: &str, role: Role) -> Result<Option<Profile>> {
        match role {
            Role::Renter => self
                .connection
                .query_row(SELECT_RENTER_SQL, params![email], |row| {
                    Ok(RenterProfile {
                        budget: optional_money_at(row, 0)?,
                        preferred_location: row.get(1)?,
                        move_in_date: optional_date_at(row, 2)?,
                    })
                })
                .optional()
                .map(|p| p.map(Profile::Renter))
                .db_context("Failed to query renter profile"),
            Role::Agent => self
                .connection
                .query_row(SELECT_AGENT_SQL, params![email], |row| {
                    Ok(AgentProfile {
                        job_title: row.get(0)?,
                        agency: row.get(1)?,
                        contact_info: row.get(2)?,
                    })
                })
                .optional()
                .map(|p| p.map(Profile::Agent))
                .db_context("Failed to query agent profile"),
        }
    }
}
