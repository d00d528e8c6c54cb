//! Command handlers for the terminal front end.
//!
//! [`Cli`] loads the stored session for restricted commands, converts clap
//! arguments into core parameters and renders the markdown result. Errors
//! bubble up to `main`, which prints them and exits non-zero.

use std::fmt::Display;

use anyhow::Result;
use estate_core::{
    display::{
        Addresses, Bookings, Cards, CreateResult, DeleteResult, Neighborhoods, OperationStatus,
        Properties, PropertyMatches, UpdateResult,
    },
    models::SearchFilter,
    params::{Id, PropertyInput, UpdateCard, UpdateProperty},
    Marketplace, Session, SessionStore,
};
use log::debug;

use crate::{
    cli::{
        AddressCommands, BookPropertyArgs, BookingCommands, LoginArgs, NeighborhoodCommands,
        PaymentCommands, PropertyCommands, RegisterArgs, RewardsArgs,
    },
    renderer::TerminalRenderer,
};

pub struct Cli {
    market: Marketplace,
    renderer: TerminalRenderer,
    sessions: SessionStore,
}

impl Cli {
    pub fn new(market: Marketplace, renderer: TerminalRenderer, sessions: SessionStore) -> Self {
        Self {
            market,
            renderer,
            sessions,
        }
    }

    /// The stored session; restricted commands fail without one.
    fn session(&self) -> Result<Session> {
        let session = self.sessions.require()?;
        debug!("Acting as {session}");
        Ok(session)
    }

    fn render(&self, content: impl Display) -> Result<()> {
        self.renderer.render(&content.to_string())
    }

    pub async fn login(&self, args: LoginArgs) -> Result<()> {
        let session = self.market.login(&args.into()).await?;
        self.sessions.save(&session)?;
        self.render(OperationStatus::success(format!("Logged in as {session}")))
    }

    pub fn logout(&self) -> Result<()> {
        let status = if self.sessions.clear()? {
            OperationStatus::success("Logged out")
        } else {
            OperationStatus::failure("Not logged in")
        };
        self.render(status)
    }

    pub async fn register(&self, args: RegisterArgs) -> Result<()> {
        let user = self.market.register(&args.into()).await?;
        self.render(CreateResult::new(user))
    }

    pub async fn whoami(&self) -> Result<()> {
        let session = self.session()?;
        let account = self.market.whoami(&session).await?;
        self.render(account)
    }

    pub async fn search(&self, filter: impl Into<SearchFilter>) -> Result<()> {
        let filter = filter.into();
        let matches = self.market.search(&filter).await?;
        self.render(PropertyMatches(matches))
    }

    pub async fn book(&self, args: BookPropertyArgs) -> Result<()> {
        let session = self.session()?;
        let receipt = self.market.book(&session, &args.into()).await?;
        self.render(receipt)
    }

    pub async fn view_rewards(&self, args: RewardsArgs) -> Result<()> {
        let session = self.session()?;
        if args.history {
            let history = self.market.reward_history(&session).await?;
            self.render(history)
        } else {
            let account = self.market.reward_summary(&session).await?;
            self.render(account)
        }
    }

    pub async fn join_rewards(&self) -> Result<()> {
        let session = self.session()?;
        let account = self.market.enroll_rewards(&session).await?;
        self.render(OperationStatus::success(format!(
            "{} joined the reward program",
            account.email
        )))
    }

    pub async fn handle_address_command(&self, command: AddressCommands) -> Result<()> {
        let session = self.session()?;
        match command {
            AddressCommands::Add(args) => {
                let address = self.market.add_address(&session, &args.into()).await?;
                self.render(CreateResult::new(address))
            }
            AddressCommands::View => {
                let addresses = self.market.list_addresses(&session).await?;
                self.render(Addresses(addresses))
            }
            AddressCommands::Modify(args) => {
                let address = self.market.update_address(&session, &args.into()).await?;
                self.render(UpdateResult::new(address))
            }
            AddressCommands::Delete(args) => {
                let address = self.market.delete_address(&session, &args.into()).await?;
                self.render(DeleteResult::new(address))
            }
        }
    }

    pub async fn handle_payment_command(&self, command: PaymentCommands) -> Result<()> {
        let session = self.session()?;
        match command {
            PaymentCommands::Add(args) => {
                let card = self.market.add_card(&session, &args.into()).await?;
                self.render(CreateResult::new(card))
            }
            PaymentCommands::Modify(args) => {
                let params = UpdateCard::from(args);
                let mut changes = Vec::new();
                if params.cvv.is_some() {
                    changes.push("Changed CVV".to_string());
                }
                if let Some(expiry) = &params.expiry {
                    changes.push(format!("Changed expiry to {expiry}"));
                }
                if let Some(id) = params.billing_address_id {
                    changes.push(format!("Changed billing address to {id}"));
                }
                let card = self.market.update_card(&session, &params).await?;
                self.render(UpdateResult::with_changes(card, changes))
            }
            PaymentCommands::Delete(args) => {
                let card = self.market.delete_card(&session, &args.into()).await?;
                self.render(DeleteResult::new(card))
            }
            PaymentCommands::View => {
                let cards = self.market.list_cards(&session).await?;
                self.render(Cards(cards))
            }
        }
    }

    pub async fn handle_property_command(&self, command: PropertyCommands) -> Result<()> {
        let session = self.session()?;
        match command {
            PropertyCommands::Add(args) => {
                let input = PropertyInput::try_from(args)?;
                let property = self.market.add_property(&session, &input).await?;
                self.render(CreateResult::new(property))
            }
            PropertyCommands::Modify(args) => {
                let params = UpdateProperty::try_from(args)?;
                let property = self.market.update_property(&session, &params).await?;
                self.render(UpdateResult::new(property))
            }
            PropertyCommands::Delete(args) => {
                let property = self.market.delete_property(&session, &args.into()).await?;
                self.render(DeleteResult::new(property))
            }
            PropertyCommands::View => {
                let properties = self.market.list_properties(&session).await?;
                self.render(Properties(properties))
            }
        }
    }

    pub async fn handle_booking_command(&self, command: BookingCommands) -> Result<()> {
        let session = self.session()?;
        match command {
            BookingCommands::View => {
                let bookings = self.market.list_bookings(&session).await?;
                self.render(Bookings(bookings))
            }
            BookingCommands::Cancel(args) => {
                let id = Id::from(args);
                let status = if self.market.cancel_booking(&session, &id).await? {
                    OperationStatus::success(format!("Cancelled booking {}", id.id))
                } else {
                    OperationStatus::failure(format!("No booking {} was cancelled", id.id))
                };
                self.render(status)
            }
        }
    }

    pub async fn handle_neighborhood_command(&self, command: NeighborhoodCommands) -> Result<()> {
        let session = self.session()?;
        match command {
            NeighborhoodCommands::Add(args) => {
                let neighborhood = self.market.add_neighborhood(&session, &args.into()).await?;
                self.render(CreateResult::new(neighborhood))
            }
            NeighborhoodCommands::Modify(args) => {
                let neighborhood = self
                    .market
                    .update_neighborhood(&session, &args.into())
                    .await?;
                self.render(UpdateResult::new(neighborhood))
            }
            NeighborhoodCommands::View(args) => match args.name {
                Some(name) => {
                    let neighborhood = self.market.get_neighborhood(&session, &name).await?;
                    self.render(neighborhood)
                }
                None => {
                    let neighborhoods = self.market.list_neighborhoods(&session).await?;
                    self.render(Neighborhoods(neighborhoods))
                }
            },
        }
    }
}
