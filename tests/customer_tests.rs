mod common;

use std::fs;

use bank_ledger::{
    ledger::{AccountKind, Customer},
    BankError,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use common::{test_clock, test_layout};

#[test]
fn derives_account_number_and_pin_from_names() {
    let layout = test_layout();
    let customer = Customer::new("Alice", "Johnson", "alice@example.com", &layout, test_clock())
        .expect("create customer");

    assert_eq!(customer.account_number(), "aj-12-01-10");
    assert_eq!(customer.pin(), "0110");
    assert_eq!(customer.full_name(), "Alice Johnson");
}

#[test]
fn both_accounts_share_the_customer_number() {
    let layout = test_layout();
    let customer = Customer::new("Bob", "Williams", "bob@example.com", &layout, test_clock())
        .unwrap();

    assert_eq!(customer.savings_account().account_number(), "bw-11-02-23");
    assert_eq!(customer.current_account().account_number(), "bw-11-02-23");
    assert_eq!(customer.savings_account().kind(), AccountKind::Savings);
    assert_eq!(customer.current_account().kind(), AccountKind::Current);
    assert_eq!(
        customer.account(AccountKind::Current).log().path(),
        layout.account_path(AccountKind::Current, "bw-11-02-23")
    );
}

#[test]
fn rejects_blank_or_malformed_email() {
    let layout = test_layout();
    for email in ["", "   ", "alice.example.com"] {
        let err = Customer::new("Alice", "Johnson", email, &layout, test_clock()).unwrap_err();
        assert!(matches!(err, BankError::InvalidArgument(_)), "email {email:?}");
    }
}

#[test]
fn rejects_names_without_usable_initials() {
    let layout = test_layout();
    for (first, last) in [("", "Johnson"), ("Alice", ""), ("1lice", "Johnson")] {
        assert!(Customer::new(first, last, "a@b.c", &layout, test_clock())
            .unwrap_err()
            .is_validation());
    }
}

#[test]
fn existing_account_files_win_over_opening_balances() {
    let layout = test_layout();
    let path = layout.account_path(AccountKind::Savings, "aj-12-01-10");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "01-01-2024\tLodgement\t40.00\t40.00\n").unwrap();

    let customer = Customer::with_balances(
        "Alice",
        "Johnson",
        "alice@example.com",
        dec!(99),
        dec!(7.25),
        &layout,
        test_clock(),
    )
    .unwrap();

    assert_eq!(customer.savings_account().balance(), dec!(40));
    assert_eq!(customer.current_account().balance(), dec!(7.25));
    assert!(!customer.is_settled());
}

#[test]
fn settled_only_when_both_balances_are_zero() {
    let layout = test_layout();
    let mut customer =
        Customer::new("Alice", "Johnson", "alice@example.com", &layout, test_clock()).unwrap();
    assert!(customer.is_settled());

    customer
        .account_mut(AccountKind::Current)
        .deposit(dec!(0.01))
        .unwrap();
    assert!(!customer.is_settled());

    assert!(customer
        .account_mut(AccountKind::Current)
        .withdraw(dec!(0.01))
        .unwrap());
    assert_eq!(customer.current_account().balance(), Decimal::ZERO);
    assert!(customer.is_settled());
}

#[test]
fn rejects_separator_characters_in_stored_fields() {
    let layout = test_layout();
    for (first, last, email) in [
        ("Al\tice", "Johnson", "alice@example.com"),
        ("Alice", "John\nson", "alice@example.com"),
        ("Alice", "Johnson", "alice@example.com\r"),
        ("Alice", "Johnson", "alice@exa\tmple.com"),
    ] {
        let err = Customer::new(first, last, email, &layout, test_clock()).unwrap_err();
        assert!(matches!(err, BankError::InvalidArgument(_)), "{first:?} {last:?} {email:?}");
    }
}
