//! Estate command-line application
//!
//! Runs one marketplace command against the local database, or serves the
//! web interface with `estate serve`.

mod args;
mod cli;
mod commands;
mod renderer;
mod web;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use commands::Cli;
use estate_core::{models::SearchFilter, MarketplaceBuilder, SessionStore};
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        session_file,
        max_daily_price,
        no_color,
        command,
    } = Args::parse();

    let market = MarketplaceBuilder::new()
        .with_database_path(database_file)
        .with_max_daily_price(max_daily_price)
        .build()
        .await
        .context("Failed to initialize marketplace")?;

    info!("Estate started");

    let sessions = SessionStore::new(session_file).context("Failed to locate session file")?;
    let cli = Cli::new(market.clone(), TerminalRenderer::new(!no_color), sessions);

    match command {
        Some(Login(args)) => cli.login(args).await,
        Some(Logout) => cli.logout(),
        Some(Register(args)) => cli.register(args).await,
        Some(Whoami) => cli.whoami().await,
        Some(ManagePayment { command }) => cli.handle_payment_command(command).await,
        Some(ManageProperties { command }) => cli.handle_property_command(command).await,
        Some(SearchProperties(args)) => cli.search(args).await,
        Some(BookProperty(args)) => cli.book(args).await,
        Some(ManageBookings { command }) => cli.handle_booking_command(command).await,
        Some(ManageAddress { command }) => cli.handle_address_command(command).await,
        Some(ViewRewards(args)) => cli.view_rewards(args).await,
        Some(JoinRewards) => cli.join_rewards().await,
        Some(ManageNeighborhoods { command }) => cli.handle_neighborhood_command(command).await,
        Some(Serve(args)) => {
            info!("Starting Estate web server");
            web::serve(market, args).await.context("Web server failed")
        }
        None => cli.search(SearchFilter::default()).await,
    }
}
