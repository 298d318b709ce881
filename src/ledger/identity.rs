//! Deterministic account number and PIN derivation.
//!
//! Both values are a pure function of the first and last name, so two people whose
//! names share initials and combined length receive the same identity.

use crate::errors::{BankError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountIdentity {
    pub account_number: String,
    pub pin: String,
}

/// Builds `<initials>-<name length>-<first pos>-<last pos>` and the matching PIN.
///
/// Initials are lowercased, positions are 1-based alphabet indices padded to two
/// digits, and the PIN is the two position fields concatenated.
pub fn derive_identity(first_name: &str, last_name: &str) -> Result<AccountIdentity> {
    let first_initial = initial_of("first name", first_name)?;
    let last_initial = initial_of("last name", last_name)?;
    let name_length = first_name.chars().count() + last_name.chars().count();
    let first_pos = alphabet_position(first_initial);
    let last_pos = alphabet_position(last_initial);

    Ok(AccountIdentity {
        account_number: format!(
            "{}{}-{}-{:02}-{:02}",
            first_initial.to_ascii_lowercase(),
            last_initial.to_ascii_lowercase(),
            name_length,
            first_pos,
            last_pos
        ),
        pin: format!("{first_pos:02}{last_pos:02}"),
    })
}

fn initial_of(field: &str, name: &str) -> Result<char> {
    let initial = name
        .chars()
        .next()
        .ok_or_else(|| BankError::InvalidArgument(format!("{field} must not be empty")))?;
    if !initial.is_ascii_alphabetic() {
        return Err(BankError::InvalidArgument(format!(
            "{field} must start with a letter A-Z, got `{initial}`"
        )));
    }
    Ok(initial)
}

fn alphabet_position(letter: char) -> u32 {
    (letter.to_ascii_uppercase() as u32) - ('A' as u32) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alice_johnson() {
        let id = derive_identity("Alice", "Johnson").unwrap();
        assert_eq!(id.account_number, "aj-12-01-10");
        assert_eq!(id.pin, "0110");
    }

    #[test]
    fn lowercase_names_derive_the_same_positions() {
        let id = derive_identity("bob", "williams").unwrap();
        assert_eq!(id.account_number, "bw-11-02-23");
        assert_eq!(id.pin, "0223");
    }

    #[test]
    fn same_shape_names_collide() {
        let a = derive_identity("Charlie", "Brown").unwrap();
        let b = derive_identity("Cynthia", "Baker").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_empty_and_non_letter_initials() {
        assert!(derive_identity("", "Smith").unwrap_err().is_validation());
        assert!(derive_identity("Jo", "").unwrap_err().is_validation());
        assert!(derive_identity("9lives", "Cat").unwrap_err().is_validation());
    }
}
