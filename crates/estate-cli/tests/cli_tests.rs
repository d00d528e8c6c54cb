use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CARD: &str = "4111111111111111";

/// Temporary database and session file shared by the commands of one test
struct CliEnv {
    _dir: TempDir,
    db_path: PathBuf,
    session_path: PathBuf,
}

impl CliEnv {
    fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temporary directory");
        Self {
            db_path: dir.path().join("cli_test.db"),
            session_path: dir.path().join("session.txt"),
            _dir: dir,
        }
    }

    /// An `estate` command with --no-color and this environment's files
    fn estate(&self) -> Command {
        let mut cmd = Command::cargo_bin("estate").expect("Failed to find estate binary");
        cmd.arg("--no-color")
            .arg("--database-file")
            .arg(&self.db_path)
            .arg("--session-file")
            .arg(&self.session_path);
        cmd
    }

    fn run(&self, args: &[&str]) {
        self.estate().args(args).assert().success();
    }

    fn renter(&self, email: &str, extra: &[&str]) {
        let mut args = vec!["register", email, "--name", "Rita", "--role", "renter"];
        args.extend_from_slice(extra);
        self.run(&args);
        self.run(&["login", email]);
    }

    fn agent(&self, email: &str) {
        self.run(&["register", email, "--name", "Alex", "--role", "agent"]);
        self.run(&["login", email]);
    }

    /// Gives the logged-in renter address 1 and the test card
    fn add_payment(&self) {
        self.run(&[
            "manage_address",
            "add",
            "--street",
            "9 Elm St",
            "--city",
            "Springfield",
            "--state",
            "IL",
            "--zip",
            "62702",
            "--primary",
        ]);
        self.run(&[
            "manage_payment",
            "add",
            CARD,
            "--cvv",
            "123",
            "--expiry",
            "2099-12",
            "--billing-address-id",
            "1",
        ]);
    }

    fn list_house(&self, price: &str) {
        self.run(&[
            "manage_properties",
            "add",
            "--type",
            "house",
            "--street",
            "1 Main St",
            "--city",
            "Springfield",
            "--state",
            "IL",
            "--zip",
            "62701",
            "--price",
            price,
            "--rooms",
            "3",
        ]);
    }
}

#[test]
fn test_cli_register_and_whoami() {
    let env = CliEnv::new();

    env.estate()
        .args(["register", "rita@example.com", "--name", "Rita", "--role", "renter"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Created account with email: rita@example.com",
        ));

    env.estate()
        .args(["login", "rita@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Success: Logged in as rita@example.com (renter)",
        ));

    env.estate()
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("rita@example.com"));
}

#[test]
fn test_cli_duplicate_registration_fails() {
    let env = CliEnv::new();
    env.run(&["register", "rita@example.com", "--name", "Rita", "--role", "renter"]);

    env.estate()
        .args(["register", "rita@example.com", "--name", "Rita", "--role", "agent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Conflict"));
}

#[test]
fn test_cli_restricted_command_requires_login() {
    let env = CliEnv::new();

    env.estate()
        .args(["manage_payment", "view"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_cli_role_mismatch_is_denied() {
    let env = CliEnv::new();
    env.renter("rita@example.com", &[]);

    env.estate()
        .args(["manage_properties", "view"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Access denied"));
}

#[test]
fn test_cli_logout_clears_session() {
    let env = CliEnv::new();
    env.renter("rita@example.com", &[]);

    env.estate()
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Logged out"));
    env.estate()
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: Not logged in"));
    env.estate().arg("whoami").assert().failure();
}

#[test]
fn test_cli_empty_search() {
    let env = CliEnv::new();

    env.estate()
        .assert()
        .success()
        .stdout(predicate::str::contains("No properties match your search."));
}

#[test]
fn test_cli_address_management() {
    let env = CliEnv::new();
    env.renter("rita@example.com", &[]);
    env.add_payment();

    env.estate()
        .args(["manage_address", "view"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Address 1 (primary)"));

    // Address 1 bills the card.
    env.estate()
        .args(["manage_address", "delete", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("billing address"));

    env.estate()
        .args([
            "manage-address",
            "modify",
            "1",
            "--street",
            "10 Elm St",
            "--city",
            "Springfield",
            "--state",
            "IL",
            "--zip",
            "62702",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated address with ID: 1"))
        .stdout(predicate::str::contains("10 Elm St"));
}

#[test]
fn test_cli_card_validation() {
    let env = CliEnv::new();
    env.renter("rita@example.com", &[]);
    env.add_payment();

    env.estate()
        .args([
            "manage_payment",
            "add",
            "1234",
            "--cvv",
            "123",
            "--expiry",
            "2099-12",
            "--billing-address-id",
            "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be exactly 16 digits"));

    env.estate()
        .args(["manage_payment", "modify", CARD, "--cvv", "456"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Changed CVV"));

    env.estate()
        .args(["manage_payment", "view"])
        .assert()
        .success()
        .stdout(predicate::str::contains("**** 1111"))
        .stdout(predicate::str::contains(CARD).not());
}

#[test]
fn test_cli_price_ceiling_and_exact_totals() {
    let env = CliEnv::new();
    env.agent("alex@example.com");

    env.estate()
        .args([
            "--max-daily-price",
            "150",
            "manage_properties",
            "add",
            "--type",
            "house",
            "--street",
            "1 Main St",
            "--city",
            "Springfield",
            "--state",
            "IL",
            "--zip",
            "62701",
            "--price",
            "200",
            "--rooms",
            "3",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not exceed 150"));

    env.list_house("19.99");
    env.renter("rita@example.com", &["--join-rewards"]);
    env.add_payment();

    env.estate()
        .args([
            "book_property",
            "1",
            "--card",
            CARD,
            "--start",
            "2031-01-01",
            "--end",
            "2031-04-11",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Booked 100 nights for $1999.00"))
        .stdout(predicate::str::contains(
            "Earned 1999 reward points. New balance: 1999.",
        ));
}

#[test]
fn test_cli_booking_earns_reward_points() {
    let env = CliEnv::new();
    env.agent("alex@example.com");
    env.list_house("100");

    env.renter("rita@example.com", &["--join-rewards"]);
    env.add_payment();

    env.estate()
        .args([
            "book_property",
            "1",
            "--card",
            CARD,
            "--start",
            "2031-03-01",
            "--end",
            "2031-03-04",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Booked 3 nights for $300.00"))
        .stdout(predicate::str::contains(
            "Earned 300 reward points. New balance: 300.",
        ));

    env.estate()
        .args([
            "book",
            "1",
            "--card",
            CARD,
            "--start",
            "2031-03-03",
            "--end",
            "2031-03-05",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already booked"));

    env.estate()
        .args(["view_rewards", "--history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Reward points: 300"))
        .stdout(predicate::str::contains("| 3 |"));

    env.estate()
        .args(["manage_bookings", "view"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Booking 1: 1 Main St"));

    env.estate()
        .args(["manage_bookings", "cancel", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Cancelled booking 1"));

    env.estate()
        .arg("view_rewards")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Reward points: 0"));
}

#[test]
fn test_cli_view_rewards_without_enrollment() {
    let env = CliEnv::new();
    env.renter("rita@example.com", &[]);

    env.estate()
        .arg("view_rewards")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not enrolled"));

    env.estate()
        .arg("join_rewards")
        .assert()
        .success()
        .stdout(predicate::str::contains("joined the reward program"));
}

#[test]
fn test_cli_property_lifecycle() {
    let env = CliEnv::new();
    env.agent("alex@example.com");

    env.estate()
        .args(["manage_neighborhoods", "add", "Riverside", "--crime-rate", "1.5", "--schools", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created neighborhood with name: Riverside"));

    env.estate()
        .args([
            "manage_properties",
            "add",
            "--type",
            "apartment",
            "--street",
            "5 River Rd",
            "--city",
            "Springfield",
            "--state",
            "IL",
            "--zip",
            "62703",
            "--price",
            "80",
            "--rooms",
            "2",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("floor"));

    env.estate()
        .args([
            "manage_properties",
            "add",
            "--type",
            "apartment",
            "--street",
            "5 River Rd",
            "--city",
            "Springfield",
            "--state",
            "IL",
            "--zip",
            "62703",
            "--price",
            "80",
            "--rooms",
            "2",
            "--floor",
            "4",
            "--neighborhood",
            "Riverside",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created property with ID: 1"));

    env.estate()
        .args(["search_properties", "--city", "springfield", "--max-price", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("5 River Rd"));

    env.estate()
        .args(["manage_properties", "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted property with ID: 1"));

    env.estate()
        .args(["manage_properties", "view"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No properties found."));
}

#[test]
fn test_cli_invalid_subcommand() {
    let env = CliEnv::new();

    env.estate()
        .args(["manage_payment", "explode"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}
