use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{
    core::clock::Clock,
    errors::{BankError, Result},
    storage::DataLayout,
};

use super::{
    account::{Account, AccountKind},
    identity::derive_identity,
};

/// A bank customer together with the savings and current accounts they own.
#[derive(Debug, Clone)]
pub struct Customer {
    first_name: String,
    last_name: String,
    email: String,
    account_number: String,
    pin: String,
    savings: Account,
    current: Account,
}

impl Customer {
    /// Creates a customer whose accounts start empty unless their files already hold history.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        layout: &DataLayout,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        Self::with_balances(
            first_name,
            last_name,
            email,
            Decimal::ZERO,
            Decimal::ZERO,
            layout,
            clock,
        )
    }

    /// Like [`Customer::new`], seeding each account with a fallback balance used only
    /// when its transaction file is empty or missing.
    pub fn with_balances(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        savings_balance: Decimal,
        current_balance: Decimal,
        layout: &DataLayout,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let first_name = first_name.into();
        let last_name = last_name.into();
        let email = email.into();
        validate_field("first name", &first_name)?;
        validate_field("last name", &last_name)?;
        validate_field("email", &email)?;
        validate_email(&email)?;

        let identity = derive_identity(&first_name, &last_name)?;
        let savings = Account::open(
            AccountKind::Savings,
            identity.account_number.clone(),
            layout,
            savings_balance,
            Arc::clone(&clock),
        )?;
        let current = Account::open(
            AccountKind::Current,
            identity.account_number.clone(),
            layout,
            current_balance,
            clock,
        )?;

        Ok(Self {
            first_name,
            last_name,
            email,
            account_number: identity.account_number,
            pin: identity.pin,
            savings,
            current,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn pin(&self) -> &str {
        &self.pin
    }

    pub fn savings_account(&self) -> &Account {
        &self.savings
    }

    pub fn current_account(&self) -> &Account {
        &self.current
    }

    pub fn account(&self, kind: AccountKind) -> &Account {
        match kind {
            AccountKind::Savings => &self.savings,
            AccountKind::Current => &self.current,
        }
    }

    pub fn account_mut(&mut self, kind: AccountKind) -> &mut Account {
        match kind {
            AccountKind::Savings => &mut self.savings,
            AccountKind::Current => &mut self.current,
        }
    }

    /// True when both balances are exactly zero.
    pub fn is_settled(&self) -> bool {
        self.savings.balance().is_zero() && self.current.balance().is_zero()
    }
}

/// Fields land in tab-separated, line-oriented files.
fn validate_field(field: &str, value: &str) -> Result<()> {
    if value.contains(['\t', '\n', '\r']) {
        return Err(BankError::InvalidArgument(format!(
            "{field} must not contain tabs or line breaks"
        )));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<()> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(BankError::InvalidArgument(format!(
            "invalid email format: `{email}`"
        )));
    }
    Ok(())
}
