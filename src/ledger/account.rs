use std::{fmt, str::FromStr, sync::Arc};

use rust_decimal::Decimal;

use crate::{
    core::clock::Clock,
    errors::{BankError, Result},
    storage::{DataLayout, SkippedLine, TransactionLog},
};

use super::transaction::{Transaction, TransactionAction};

/// Enumerates the two account flavours every customer holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountKind {
    Savings,
    Current,
}

impl AccountKind {
    pub const ALL: [AccountKind; 2] = [AccountKind::Savings, AccountKind::Current];

    /// Directory name under the data root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            AccountKind::Savings => "savings",
            AccountKind::Current => "current",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccountKind::Savings => "Savings",
            AccountKind::Current => "Current",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AccountKind {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "savings" => Ok(AccountKind::Savings),
            "c" | "current" => Ok(AccountKind::Current),
            other => Err(BankError::InvalidArgument(format!(
                "unknown account type `{other}` (expected savings or current)"
            ))),
        }
    }
}

/// A balance plus its ordered history, mirrored line-for-line in an append-only file.
#[derive(Clone)]
pub struct Account {
    kind: AccountKind,
    account_number: String,
    balance: Decimal,
    transactions: Vec<Transaction>,
    skipped: Vec<SkippedLine>,
    log: TransactionLog,
    clock: Arc<dyn Clock>,
}

impl Account {
    /// Opens the account file and replays its history.
    ///
    /// The balance is taken from the last readable line rather than recomputed from the
    /// amounts. `opening_balance` applies only when the file holds no readable entries.
    pub fn open(
        kind: AccountKind,
        account_number: impl Into<String>,
        layout: &DataLayout,
        opening_balance: Decimal,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let account_number = account_number.into();
        let log = TransactionLog::new(layout.account_path(kind, &account_number));
        let report = log.load()?;
        let balance = report
            .transactions
            .last()
            .map(|txn| txn.balance)
            .unwrap_or(opening_balance);
        Ok(Self {
            kind,
            account_number,
            balance,
            transactions: report.transactions,
            skipped: report.skipped,
            log,
            clock,
        })
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn log(&self) -> &TransactionLog {
        &self.log
    }

    /// Lines of the account file left out of the history when it was opened.
    pub fn skipped_lines(&self) -> &[SkippedLine] {
        &self.skipped
    }

    /// Records a lodgement. Non-positive or sub-cent amounts are rejected without touching state.
    pub fn deposit(&mut self, amount: Decimal) -> Result<()> {
        ensure_positive(amount)?;
        self.record(TransactionAction::Lodgement, amount, self.balance + amount)
    }

    /// Records a withdrawal. Returns `false`, leaving everything untouched, when the
    /// balance does not cover `amount`.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<bool> {
        ensure_positive(amount)?;
        if amount > self.balance {
            return Ok(false);
        }
        self.record(TransactionAction::Withdrawal, amount, self.balance - amount)?;
        Ok(true)
    }

    /// Copy of the full history, oldest first.
    pub fn transaction_history(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    // The line hits disk before memory changes, so a failed write leaves both in step.
    fn record(&mut self, action: TransactionAction, amount: Decimal, balance: Decimal) -> Result<()> {
        let transaction = Transaction::new(self.clock.today(), action, amount, balance);
        self.log.append(&transaction)?;
        self.balance = balance;
        self.transactions.push(transaction);
        Ok(())
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("kind", &self.kind)
            .field("account_number", &self.account_number)
            .field("balance", &self.balance)
            .field("transactions", &self.transactions.len())
            .field("skipped", &self.skipped.len())
            .field("path", &self.log.path())
            .finish()
    }
}

fn ensure_positive(amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(BankError::InvalidArgument(format!(
            "amount must be positive, got {amount}"
        )));
    }
    // Files store two decimal places; anything finer would not survive a reload.
    if amount != amount.round_dp(2) {
        return Err(BankError::InvalidArgument(format!(
            "amount must not have more than two decimal places, got {amount}"
        )));
    }
    Ok(())
}
