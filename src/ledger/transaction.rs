use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

const DATE_FORMAT: &str = "%d-%m-%Y";
const FIELD_COUNT: usize = 4;

/// One immutable ledger entry: what happened, when, and the balance it left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub action: TransactionAction,
    pub amount: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionAction {
    Lodgement,
    Withdrawal,
}

impl TransactionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionAction::Lodgement => "Lodgement",
            TransactionAction::Withdrawal => "Withdrawal",
        }
    }
}

impl fmt::Display for TransactionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionAction {
    type Err = LineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Lodgement" => Ok(TransactionAction::Lodgement),
            "Withdrawal" => Ok(TransactionAction::Withdrawal),
            other => Err(LineError::UnknownAction(other.to_string())),
        }
    }
}

/// Reasons a stored line could not be turned back into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("expected {expected} tab-separated fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("date `{0}` is not in DD-MM-YYYY form")]
    Date(String),
    #[error("unknown action `{0}`")]
    UnknownAction(String),
    #[error("`{0}` is not a decimal number")]
    Number(String),
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        action: TransactionAction,
        amount: Decimal,
        balance: Decimal,
    ) -> Self {
        Self {
            date,
            action,
            amount,
            balance,
        }
    }

    /// Renders the record as `DD-MM-YYYY\tAction\tAmount\tBalance` with two decimal places.
    pub fn to_line(&self) -> String {
        format!(
            "{}\t{}\t{:.2}\t{:.2}",
            self.date.format(DATE_FORMAT),
            self.action,
            self.amount,
            self.balance
        )
    }

    pub fn parse_line(line: &str) -> Result<Self, LineError> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != FIELD_COUNT {
            return Err(LineError::FieldCount {
                expected: FIELD_COUNT,
                found: fields.len(),
            });
        }
        Ok(Self {
            date: parse_date(fields[0])?,
            action: fields[1].parse()?,
            amount: parse_decimal(fields[2])?,
            balance: parse_decimal(fields[3])?,
        })
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}

/// Accepts only the exact `DD-MM-YYYY` shape; chrono alone would take unpadded days.
fn parse_date(raw: &str) -> Result<NaiveDate, LineError> {
    let bytes = raw.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[2] == b'-'
        && bytes[5] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(idx, b)| idx == 2 || idx == 5 || b.is_ascii_digit());
    if !shaped {
        return Err(LineError::Date(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| LineError::Date(raw.to_string()))
}

pub(crate) fn parse_decimal(raw: &str) -> Result<Decimal, LineError> {
    Decimal::from_str(raw.trim()).map_err(|_| LineError::Number(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn renders_fixed_width_line() {
        let txn = Transaction::new(
            date(2024, 3, 7),
            TransactionAction::Lodgement,
            dec!(100),
            dec!(150.5),
        );
        assert_eq!(txn.to_line(), "07-03-2024\tLodgement\t100.00\t150.50");
    }

    #[test]
    fn parses_what_it_renders() {
        let txn = Transaction::new(
            date(2023, 12, 31),
            TransactionAction::Withdrawal,
            dec!(12.34),
            dec!(0.66),
        );
        let parsed = Transaction::parse_line(&txn.to_line()).expect("parse line");
        assert_eq!(parsed, txn);
    }

    #[test]
    fn rejects_wrong_field_count() {
        let err = Transaction::parse_line("07-03-2024\tLodgement\t100.00").unwrap_err();
        assert_eq!(
            err,
            LineError::FieldCount {
                expected: 4,
                found: 3
            }
        );
    }

    #[test]
    fn rejects_unpadded_or_reordered_dates() {
        for raw in ["7-03-2024", "2024-03-07", "07/03/2024", "32-01-2024"] {
            let line = format!("{raw}\tLodgement\t1.00\t1.00");
            assert!(
                matches!(Transaction::parse_line(&line), Err(LineError::Date(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_unknown_action_and_bad_numbers() {
        assert!(matches!(
            Transaction::parse_line("07-03-2024\tTransfer\t1.00\t1.00"),
            Err(LineError::UnknownAction(_))
        ));
        assert!(matches!(
            Transaction::parse_line("07-03-2024\tLodgement\tabc\t1.00"),
            Err(LineError::Number(_))
        ));
    }
}
