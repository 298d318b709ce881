use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bank_ledger_cli").expect("binary built");
    cmd.env("BANK_LEDGER_CLI_SCRIPT", "1")
        .env("BANK_LEDGER_HOME", home.path())
        .env("RUST_LOG", "bank_ledger=warn");
    cmd
}

#[test]
fn employee_creates_customer_and_posts_lodgement() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .write_stdin(
            "employee A1234\n\
             create-customer Alice Johnson alice@example.com\n\
             transact aj-12-01-10 savings deposit 100\n\
             list-customers\n\
             exit\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Customer created successfully."))
        .stdout(predicate::str::contains("Account Number: aj-12-01-10  PIN: 0110"))
        .stdout(predicate::str::contains("Deposit successful."))
        .stdout(predicate::str::contains("Savings Balance: 100.00"));

    let database = home.path().join("database");
    let roster = fs::read_to_string(database.join("customers.txt")).unwrap();
    assert_eq!(
        roster,
        "Alice\tJohnson\talice@example.com\taj-12-01-10\t100.00\t0.00\n"
    );
    let savings = fs::read_to_string(database.join("savings").join("aj-12-01-10.txt")).unwrap();
    assert!(savings.ends_with("\tLodgement\t100.00\t100.00\n"));
}

#[test]
fn customer_session_survives_restart() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .write_stdin(
            "employee A1234\n\
             create-customer Bob Williams bob@example.com\n\
             transact bw-11-02-23 current deposit 40\n",
        )
        .assert()
        .success();

    cli(&home)
        .write_stdin(
            "login Bob Williams bw-11-02-23 0223\n\
             withdraw current 15.5\n\
             withdraw current 100\n\
             history current\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome, Bob Williams"))
        .stdout(predicate::str::contains("Withdrawal successful."))
        .stdout(predicate::str::contains("Insufficient funds."))
        .stdout(predicate::str::contains("Transaction History for Current Account"))
        .stdout(predicate::str::contains("\tWithdrawal\t15.50\t24.50"));
}

#[test]
fn denied_commands_do_not_stop_the_script() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .write_stdin(
            "employee wrong\n\
             create-customer Alice Johnson alice@example.com\n\
             login Alice Johnson aj-12-01-10 0110\n\
             version\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid PIN. Access denied."))
        .stdout(predicate::str::contains("Invalid credentials. Access denied."))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));

    assert!(!home.path().join("database").join("customers.txt").exists());
}

#[test]
fn unknown_commands_are_reported_on_stderr() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .write_stdin("frobnicate\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("unknown command `frobnicate`"));
}

#[test]
fn malformed_roster_is_fatal() {
    let home = TempDir::new().unwrap();
    let database = home.path().join("database");
    fs::create_dir_all(&database).unwrap();
    fs::write(database.join("customers.txt"), "only\ttwo\n").unwrap();

    cli(&home)
        .write_stdin("help\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed roster line 1"));
}
