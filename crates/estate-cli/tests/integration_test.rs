//! Integration tests comparing CLI output with the core Display impls
//!
//! The CLI and a `Marketplace` opened on the same database file must agree:
//! plain output is exactly the markdown the display types produce.

use std::{path::Path, process::Command};

use estate_core::{
    display::{Properties, PropertyMatches},
    models::{AgentProfile, Profile, PropertyKind, SearchFilter},
    params::{Login, NeighborhoodInput, PropertyInput, Register},
    Marketplace, MarketplaceBuilder, Role, SessionStore,
};
use rust_decimal_macros::dec;
use tempfile::TempDir;

/// Helper function to create a test marketplace with temporary database
async fn create_test_market() -> (Marketplace, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");

    let market = MarketplaceBuilder::new()
        .with_database_path(Some(db_path))
        .build()
        .await
        .expect("Failed to create marketplace");

    (market, temp_dir)
}

/// Run a CLI command and capture its output
fn run_cli_command(dir: &Path, args: &[&str]) -> String {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_estate"));
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(dir.join("test.db"))
        .arg("--session-file")
        .arg(dir.join("session.txt"));

    for arg in args {
        cmd.arg(arg);
    }

    let output = cmd.output().expect("Failed to run CLI command");
    assert!(
        output.status.success(),
        "estate {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output")
}

async fn seed_listing(market: &Marketplace) {
    market
        .register(&Register {
            email: "alex@example.com".to_string(),
            name: "Alex".to_string(),
            profile: Profile::Agent(AgentProfile::default()),
            join_rewards: false,
        })
        .await
        .expect("Failed to register agent");
    let session = market
        .login(&Login {
            email: "alex@example.com".to_string(),
        })
        .await
        .expect("Failed to log in");

    market
        .add_neighborhood(
            &session,
            &NeighborhoodInput {
                name: "Riverside".to_string(),
                crime_rate: 2.5,
                nearby_schools: 4,
            },
        )
        .await
        .expect("Failed to add neighborhood");

    market
        .add_property(
            &session,
            &PropertyInput {
                street: "5 River Rd".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip: "62703".to_string(),
                price: dec!(80),
                available: true,
                square_footage: Some(900),
                description: Some("Bright corner unit".to_string()),
                neighborhood: Some("Riverside".to_string()),
                kind: PropertyKind::Apartment { rooms: 2, floor: 4 },
            },
        )
        .await
        .expect("Failed to add property");
}

/// Search output from the CLI matches the PropertyMatches display
#[tokio::test]
async fn test_search_display_consistency() {
    let (market, temp_dir) = create_test_market().await;
    seed_listing(&market).await;

    let cli_output = run_cli_command(temp_dir.path(), &["search_properties"]);

    let matches = market
        .search(&SearchFilter::default())
        .await
        .expect("Failed to search");
    let direct_output = PropertyMatches(matches).to_string();

    assert_eq!(cli_output, direct_output);
    assert!(cli_output.contains("Bright corner unit"));
    assert!(cli_output.contains("**Crime rate**: 2.50"));
}

/// A session stored by `estate login` is usable from the library
#[tokio::test]
async fn test_cli_session_is_shared_with_library() {
    let (market, temp_dir) = create_test_market().await;
    seed_listing(&market).await;

    run_cli_command(temp_dir.path(), &["login", "alex@example.com"]);

    let session = SessionStore::new(Some(temp_dir.path().join("session.txt")))
        .expect("Failed to open session store")
        .require()
        .expect("CLI login did not store a session");
    assert_eq!(session.email, "alex@example.com");
    assert_eq!(session.role, Role::Agent);

    let cli_output = run_cli_command(temp_dir.path(), &["manage_properties", "view"]);
    let properties = market
        .list_properties(&session)
        .await
        .expect("Failed to list properties");
    assert_eq!(cli_output, Properties(properties).to_string());
}

/// Filters passed on the command line reach the search
#[tokio::test]
async fn test_search_filters_from_cli() {
    let (market, temp_dir) = create_test_market().await;
    seed_listing(&market).await;

    let too_expensive = run_cli_command(temp_dir.path(), &["search", "--max-price", "50"]);
    assert!(too_expensive.contains("No properties match your search."));

    let by_type = run_cli_command(temp_dir.path(), &["search", "--type", "apartment"]);
    assert!(by_type.contains("5 River Rd"));

    let by_rooms = run_cli_command(temp_dir.path(), &["search", "--min-bedrooms", "3"]);
    assert!(by_rooms.contains("No properties match your search."));
}
