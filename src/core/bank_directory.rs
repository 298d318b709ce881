use std::{collections::HashSet, sync::Arc};

use rust_decimal::Decimal;

use crate::{
    errors::{BankError, Result},
    ledger::{AccountKind, Customer},
    storage::{DataLayout, RosterFile, RosterRecord},
};

use super::clock::{Clock, SystemClock};

/// Owns the in-memory roster and keeps `customers.txt` in step with it.
///
/// All mutation goes through `&mut self`; callers hold the directory by value or
/// reference rather than through any shared global.
pub struct BankDirectory {
    layout: DataLayout,
    roster: RosterFile,
    customers: Vec<Customer>,
    clock: Arc<dyn Clock>,
}

impl BankDirectory {
    /// Loads the roster under `layout` using the wall clock for new transactions.
    pub fn open(layout: DataLayout) -> Result<Self> {
        Self::open_with_clock(layout, Arc::new(SystemClock))
    }

    pub fn open_with_clock(layout: DataLayout, clock: Arc<dyn Clock>) -> Result<Self> {
        let roster = RosterFile::new(layout.roster_path());
        let mut directory = Self {
            layout,
            roster,
            customers: Vec::new(),
            clock,
        };
        directory.load_roster()?;
        Ok(directory)
    }

    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Get-or-create keyed on email (case-insensitive).
    ///
    /// An existing customer with the same email is returned unchanged. A new customer
    /// whose derived account number is already taken by someone else is refused.
    pub fn create_customer(
        &mut self,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<&Customer> {
        if let Some(idx) = self.position_by_email(email) {
            tracing::info!(email, "customer already exists, returning existing record");
            return Ok(&self.customers[idx]);
        }

        let customer = Customer::new(
            first_name,
            last_name,
            email,
            &self.layout,
            Arc::clone(&self.clock),
        )?;
        if let Some(holder) = self.find_customer(customer.account_number()) {
            return Err(BankError::AccountNumberCollision {
                account_number: customer.account_number().to_string(),
                existing_email: holder.email().to_string(),
            });
        }

        self.customers.push(customer);
        if let Err(err) = self.save_roster() {
            self.customers.pop();
            return Err(err);
        }

        let created = &self.customers[self.customers.len() - 1];
        tracing::info!(
            account_number = created.account_number(),
            "created customer {}",
            created.full_name()
        );
        Ok(created)
    }

    /// Removes the customer holding `account_number` when both balances are exactly zero.
    ///
    /// Returns `Ok(false)` with no side effects otherwise. Account files are removed on a
    /// best-effort basis once the roster has been rewritten.
    pub fn delete_customer(&mut self, account_number: &str) -> Result<bool> {
        let Some(idx) = self
            .customers
            .iter()
            .position(|c| c.account_number() == account_number && c.is_settled())
        else {
            return Ok(false);
        };

        let removed = self.customers.remove(idx);
        if let Err(err) = self.save_roster() {
            self.customers.insert(idx, removed);
            return Err(err);
        }

        for kind in AccountKind::ALL {
            let log = removed.account(kind).log();
            if let Err(err) = log.remove() {
                tracing::warn!("failed to delete {} account file: {err}", kind.dir_name());
            }
        }
        tracing::info!(account_number, "deleted customer {}", removed.full_name());
        Ok(true)
    }

    /// Credential lookup: names compare case-insensitively, account number and PIN exactly.
    pub fn get_customer(
        &self,
        first_name: &str,
        last_name: &str,
        account_number: &str,
        pin: &str,
    ) -> Option<&Customer> {
        self.customers.iter().find(|c| {
            eq_ignore_case(c.first_name(), first_name)
                && eq_ignore_case(c.last_name(), last_name)
                && c.account_number() == account_number
                && c.pin() == pin
        })
    }

    pub fn find_customer(&self, account_number: &str) -> Option<&Customer> {
        self.customers
            .iter()
            .find(|c| c.account_number() == account_number)
    }

    /// Snapshot of the whole roster in insertion order.
    pub fn all_customers(&self) -> Vec<Customer> {
        self.customers.clone()
    }

    /// Lodges into one of a customer's accounts and rewrites the roster balances.
    pub fn deposit(&mut self, account_number: &str, kind: AccountKind, amount: Decimal) -> Result<()> {
        self.customer_mut(account_number)?
            .account_mut(kind)
            .deposit(amount)?;
        self.save_roster()
    }

    /// Withdraws from one of a customer's accounts; `Ok(false)` means insufficient funds.
    pub fn withdraw(
        &mut self,
        account_number: &str,
        kind: AccountKind,
        amount: Decimal,
    ) -> Result<bool> {
        let withdrawn = self
            .customer_mut(account_number)?
            .account_mut(kind)
            .withdraw(amount)?;
        if withdrawn {
            self.save_roster()?;
        }
        Ok(withdrawn)
    }

    fn customer_mut(&mut self, account_number: &str) -> Result<&mut Customer> {
        self.customers
            .iter_mut()
            .find(|c| c.account_number() == account_number)
            .ok_or_else(|| BankError::CustomerNotFound(account_number.to_string()))
    }

    fn position_by_email(&self, email: &str) -> Option<usize> {
        self.customers
            .iter()
            .position(|c| eq_ignore_case(c.email(), email))
    }

    fn load_roster(&mut self) -> Result<()> {
        let mut seen = HashSet::new();
        for (line, record) in self.roster.load()? {
            let customer = Customer::with_balances(
                record.first_name,
                record.last_name,
                record.email,
                record.savings_balance,
                record.current_balance,
                &self.layout,
                Arc::clone(&self.clock),
            )
            .map_err(|err| match err {
                BankError::InvalidArgument(reason) => BankError::MalformedRoster { line, reason },
                other => other,
            })?;

            if customer.account_number() != record.account_number {
                tracing::warn!(
                    line,
                    stored = %record.account_number,
                    derived = customer.account_number(),
                    "stored account number differs from derived one"
                );
            }
            if !seen.insert(customer.account_number().to_string()) {
                tracing::warn!(
                    line,
                    account_number = customer.account_number(),
                    "account number shared with an earlier roster entry"
                );
            }
            self.customers.push(customer);
        }
        tracing::info!(
            customers = self.customers.len(),
            path = %self.roster.path().display(),
            "roster loaded"
        );
        Ok(())
    }

    fn save_roster(&self) -> Result<()> {
        let records: Vec<RosterRecord> = self
            .customers
            .iter()
            .map(|c| RosterRecord {
                first_name: c.first_name().to_string(),
                last_name: c.last_name().to_string(),
                email: c.email().to_string(),
                account_number: c.account_number().to_string(),
                savings_balance: c.savings_account().balance(),
                current_balance: c.current_account().balance(),
            })
            .collect();
        self.roster.save(&records)
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
