//! Reward program enrollment, balance and history.

use log::info;

use super::Marketplace;
use crate::{
    error::{MarketError, Result},
    models::{RewardAccount, RewardHistory, Role},
    session::Session,
};

impl Marketplace {
    /// Enrolls the calling renter with a zero balance.
    ///
    /// # Errors
    ///
    /// Returns `MarketError::Conflict` if the renter is already enrolled
    pub async fn enroll_rewards(&self, session: &Session) -> Result<RewardAccount> {
        session.require(Role::Renter)?;
        let email = session.email.clone();

        let account = self.with_db(move |db| db.enroll_rewards(&email)).await?;

        info!("{} joined the reward program", account.email);
        Ok(account)
    }

    /// The calling renter's current balance.
    pub async fn reward_summary(&self, session: &Session) -> Result<RewardAccount> {
        session.require(Role::Renter)?;
        let email = session.email.clone();

        self.with_db(move |db| {
            db.get_reward_account(&email)?
                .ok_or(MarketError::NotEnrolled { email })
        })
        .await
    }

    /// The balance together with the points each booking earned.
    pub async fn reward_history(&self, session: &Session) -> Result<RewardHistory> {
        session.require(Role::Renter)?;
        let email = session.email.clone();

        self.with_db(move |db| {
            let account = db
                .get_reward_account(&email)?
                .ok_or_else(|| MarketError::NotEnrolled {
                    email: email.clone(),
                })?;
            let entries = db.list_reward_entries(&email)?;
            Ok(RewardHistory { account, entries })
        })
        .await
    }
}
