//! Card domain types and structural validation.
//!
//! The field mappers delegate every card-shape check to this module; they
//! never inspect card digits themselves. A [`CardNumber`] is Luhn-checked at
//! construction, so holding one is proof the number is well formed.

use std::{fmt, ops::Deref, str::FromStr};

use error_stack::ResultExt;
use masking::{PeekInterface, Secret, Strategy, StrongSecret, WithType};
use serde::Serialize;

use crate::errors::{ConnectorError, CustomResult};

/// Raised when a card number fails the checksum or digit-shape test.
#[derive(Debug, thiserror::Error)]
#[error("not a valid credit card number")]
pub struct CardNumberError;

/// A validated card number. Stored as a [`StrongSecret`] so it is wiped on
/// drop and masked to its BIN in any debug output.
#[derive(Clone, Debug, Serialize)]
pub struct CardNumber(StrongSecret<String, CardNumberStrategy>);

impl FromStr for CardNumber {
    type Err = CardNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number: String = s.split_whitespace().collect();
        if luhn_valid(&number) {
            Ok(Self(StrongSecret::new(number)))
        } else {
            Err(CardNumberError)
        }
    }
}

impl TryFrom<String> for CardNumber {
    type Error = CardNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl Deref for CardNumber {
    type Target = StrongSecret<String, CardNumberStrategy>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Masking strategy showing only the first six digits.
pub enum CardNumberStrategy {}

impl<T> Strategy<T> for CardNumberStrategy
where
    T: AsRef<str>,
{
    fn fmt(val: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let val_str: &str = val.as_ref();
        if val_str.len() < 15 || val_str.len() > 19 {
            return WithType::fmt(val, f);
        }
        match val_str.get(..6) {
            Some(bin) => write!(f, "{}{}", bin, "*".repeat(val_str.len() - 6)),
            None => WithType::fmt(val, f),
        }
    }
}

fn luhn_valid(number: &str) -> bool {
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let sum: u32 = number
        .chars()
        .rev()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(idx, digit)| {
            if idx % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                digit
            }
        })
        .sum();
    sum % 10 == 0
}

/// A billing or shipping address block.
#[derive(Clone, Debug, Default)]
pub struct Address {
    pub line1: Option<Secret<String>>,
    pub line2: Option<Secret<String>>,
    pub city: Option<String>,
    pub state: Option<Secret<String>>,
    pub country: Option<String>,
    pub zip: Option<Secret<String>>,
    pub phone: Option<Secret<String>>,
}

/// Cardholder and card data for a single call. The email lives on the card,
/// not on the parameter set; mappers read it from here.
#[derive(Clone, Debug)]
pub struct Card {
    pub first_name: Secret<String>,
    pub last_name: Secret<String>,
    pub number: CardNumber,
    pub exp_month: Secret<String>,
    pub exp_year: Secret<String>,
    pub cvv: Secret<String>,
    pub email: Option<Secret<String>>,
    pub billing: Address,
    pub shipping: Option<Address>,
}

impl Card {
    /// Name as embossed, sent under `NameOnCard`/`CardName`.
    pub fn name_on_card(&self) -> Secret<String> {
        Secret::new(format!(
            "{} {}",
            self.first_name.peek(),
            self.last_name.peek()
        ))
    }

    /// Structural validation: expiry in range and not in the past, CVV of
    /// plausible shape. The number itself was already Luhn-checked at
    /// construction.
    pub fn validate(&self) -> CustomResult<(), ConnectorError> {
        let month: u8 = self
            .exp_month
            .peek()
            .parse::<u8>()
            .change_context(ConnectorError::InvalidDataFormat {
                field_name: "card_exp_month",
            })?;
        if !(1..=12).contains(&month) {
            return Err(ConnectorError::InvalidDataFormat {
                field_name: "card_exp_month",
            }
            .into());
        }

        let year = normalized_expiry_year(self.exp_year.peek()).ok_or(
            ConnectorError::InvalidDataFormat {
                field_name: "card_exp_year",
            },
        )?;
        let now = time::OffsetDateTime::now_utc();
        let current_year = now.year();
        let current_month: u8 = now.month().into();
        if year < current_year || (year == current_year && month < current_month) {
            return Err(ConnectorError::InvalidDataFormat {
                field_name: "card_exp_year",
            }
            .into());
        }

        let cvv = self.cvv.peek();
        if !(3..=4).contains(&cvv.len()) || !cvv.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConnectorError::InvalidDataFormat {
                field_name: "card_cvv",
            }
            .into());
        }
        Ok(())
    }
}

/// Two-digit years are taken to mean the current century.
fn normalized_expiry_year(year: &str) -> Option<i32> {
    let parsed: i32 = year.parse().ok()?;
    match year.len() {
        2 => Some(2000 + parsed),
        4 => Some(parsed),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn card_with_expiry(month: &str, year: &str) -> Card {
        Card {
            first_name: Secret::new("Example".to_string()),
            last_name: Secret::new("Customer".to_string()),
            number: CardNumber::from_str("4242424242424242").unwrap(),
            exp_month: Secret::new(month.to_string()),
            exp_year: Secret::new(year.to_string()),
            cvv: Secret::new("123".to_string()),
            email: None,
            billing: Address::default(),
            shipping: None,
        }
    }

    #[test]
    fn luhn_accepts_valid_numbers() {
        assert!(CardNumber::from_str("4242424242424242").is_ok());
        assert!(CardNumber::from_str("4242 4242 4242 4242").is_ok());
        assert!(CardNumber::from_str("5555555555554444").is_ok());
    }

    #[test]
    fn luhn_rejects_invalid_numbers() {
        assert!(CardNumber::from_str("4242424242424241").is_err());
        assert!(CardNumber::from_str("not-a-card").is_err());
        assert!(CardNumber::from_str("").is_err());
    }

    #[test]
    fn card_number_debug_is_masked() {
        let number = CardNumber::from_str("4242424242424242").unwrap();
        let debug = format!("{:?}", number.0);
        assert!(!debug.contains("4242424242424242"));
    }

    #[test]
    fn expiry_in_the_past_is_rejected() {
        let card = card_with_expiry("01", "2020");
        assert!(card.validate().is_err());
    }

    #[test]
    fn two_digit_expiry_year_is_accepted() {
        let card = card_with_expiry("12", "90");
        assert!(card.validate().is_ok());
    }

    #[test]
    fn out_of_range_month_is_rejected() {
        let card = card_with_expiry("13", "2090");
        assert!(card.validate().is_err());
    }
}
