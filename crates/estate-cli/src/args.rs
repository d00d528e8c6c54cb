use std::path::PathBuf;

use clap::{Parser, Subcommand};
use estate_core::Decimal;

use crate::cli::{
    AddressCommands, BookPropertyArgs, BookingCommands, LoginArgs, NeighborhoodCommands,
    PaymentCommands, PropertyCommands, RegisterArgs, RewardsArgs, SearchArgs, ServeArgs,
};

/// Command-line interface for the Estate rental marketplace
///
/// Renters search and book properties, paying with saved cards and earning
/// reward points; agents list and manage properties. Restricted commands act
/// as the user stored by `estate login`. The `serve` command runs the same
/// marketplace as a web application.
#[derive(Parser)]
#[command(version, about, name = "estate")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/estate/estate.db
    #[arg(long, global = true, env = "ESTATE_DATABASE_FILE")]
    pub database_file: Option<PathBuf>,

    /// Path to the session file. Defaults to
    /// $XDG_STATE_HOME/estate/session.txt
    #[arg(long, global = true, env = "ESTATE_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// Highest daily price a property may be listed at
    #[arg(long, global = true, env = "ESTATE_MAX_DAILY_PRICE")]
    pub max_daily_price: Option<Decimal>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Estate CLI
///
/// Running `estate` without a command lists every available property.
#[derive(Subcommand)]
pub enum Commands {
    /// Log in as an existing user
    Login(LoginArgs),
    /// Forget the stored session
    Logout,
    /// Create a renter or agent account
    Register(RegisterArgs),
    /// Show the logged-in account
    Whoami,
    /// Manage your credit cards (renters)
    #[command(name = "manage_payment", alias = "manage-payment")]
    ManagePayment {
        #[command(subcommand)]
        command: PaymentCommands,
    },
    /// Manage your property listings (agents)
    #[command(name = "manage_properties", alias = "manage-properties")]
    ManageProperties {
        #[command(subcommand)]
        command: PropertyCommands,
    },
    /// Search available properties
    #[command(name = "search_properties", aliases = ["search-properties", "search"])]
    SearchProperties(SearchArgs),
    /// Book a property (renters)
    #[command(name = "book_property", aliases = ["book-property", "book"])]
    BookProperty(BookPropertyArgs),
    /// View or cancel bookings
    #[command(name = "manage_bookings", alias = "manage-bookings")]
    ManageBookings {
        #[command(subcommand)]
        command: BookingCommands,
    },
    /// Manage your addresses (renters)
    #[command(name = "manage_address", alias = "manage-address")]
    ManageAddress {
        #[command(subcommand)]
        command: AddressCommands,
    },
    /// Show your reward points (renters)
    #[command(name = "view_rewards", alias = "view-rewards")]
    ViewRewards(RewardsArgs),
    /// Join the reward program (renters)
    #[command(name = "join_rewards", alias = "join-rewards")]
    JoinRewards,
    /// Manage neighborhood records (agents)
    #[command(name = "manage_neighborhoods", alias = "manage-neighborhoods")]
    ManageNeighborhoods {
        #[command(subcommand)]
        command: NeighborhoodCommands,
    },
    /// Start the web server
    Serve(ServeArgs),
}
