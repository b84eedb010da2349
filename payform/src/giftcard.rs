//! Gift card number and PIN validation.
//!
//! Gift cards are not Luhn-checked: closed-loop programs assign numbers from
//! their own ranges, so the widget only enforces shape (digits and length)
//! and leaves real verification to the gateway.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Shortest gift-card number any supported program issues.
pub const MIN_GIFT_CARD_LENGTH: usize = 14;

/// Longest gift-card number any supported program issues.
pub const MAX_GIFT_CARD_LENGTH: usize = 25;

/// Minimum PIN length.
pub const MIN_PIN_LENGTH: usize = 4;

/// A gift card number, held as bare digits.
///
/// Constructed via [`FromStr`], which strips spaces and rejects any other
/// non-digit character. Length must fall in
/// `14..=25` digits.
#[derive(Clone, PartialEq, Eq)]
pub struct GiftCardNumber(String);

/// Reason a candidate gift-card number was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GiftCardNumberError {
    /// Input contained a character other than a digit or space.
    #[error("gift card number must contain only digits")]
    NonDigit,
    /// Input was outside the supported length range.
    #[error("gift card number must be {MIN_GIFT_CARD_LENGTH} to {MAX_GIFT_CARD_LENGTH} digits")]
    Length,
}

impl FromStr for GiftCardNumber {
    type Err = GiftCardNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: String = s.chars().filter(|c| *c != ' ').collect();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GiftCardNumberError::NonDigit);
        }
        if digits.len() < MIN_GIFT_CARD_LENGTH || digits.len() > MAX_GIFT_CARD_LENGTH {
            return Err(GiftCardNumberError::Length);
        }
        Ok(Self(digits))
    }
}

impl GiftCardNumber {
    /// Returns the bare digit string for the gateway transport.
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for GiftCardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cut = self.0.len().saturating_sub(4);
        write!(f, "GiftCardNumber(\u{2022}\u{2022}\u{2022}\u{2022} {})", &self.0[cut..])
    }
}

impl Serialize for GiftCardNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for GiftCardNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Validates a gift-card PIN: all digits, at least [`MIN_PIN_LENGTH`] long.
#[must_use]
pub fn is_valid_pin(pin: &str) -> bool {
    pin.len() >= MIN_PIN_LENGTH && pin.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_lengths() {
        assert!("62734010001104878".parse::<GiftCardNumber>().is_ok());
        assert!("1".repeat(MIN_GIFT_CARD_LENGTH).parse::<GiftCardNumber>().is_ok());
        assert!("1".repeat(MAX_GIFT_CARD_LENGTH).parse::<GiftCardNumber>().is_ok());
    }

    #[test]
    fn test_out_of_range_lengths_rejected() {
        assert_eq!(
            "1".repeat(MIN_GIFT_CARD_LENGTH - 1).parse::<GiftCardNumber>(),
            Err(GiftCardNumberError::Length)
        );
        assert_eq!(
            "1".repeat(MAX_GIFT_CARD_LENGTH + 1).parse::<GiftCardNumber>(),
            Err(GiftCardNumberError::Length)
        );
    }

    #[test]
    fn test_spaces_stripped_non_digits_rejected() {
        let number: GiftCardNumber = "6273 4010 0011 0487 8".parse().unwrap();
        assert_eq!(number.digits(), "62734010001104878");
        assert_eq!(
            "6273-4010-0011-0487".parse::<GiftCardNumber>(),
            Err(GiftCardNumberError::NonDigit)
        );
    }

    #[test]
    fn test_pin_rules() {
        assert!(is_valid_pin("1234"));
        assert!(is_valid_pin("123456"));
        assert!(!is_valid_pin("123"));
        assert!(!is_valid_pin("12a4"));
        assert!(!is_valid_pin(""));
    }

    #[test]
    fn test_debug_shows_only_last_four() {
        let number: GiftCardNumber = "62734010001104878".parse().unwrap();
        assert!(!format!("{number:?}").contains("627340"));
    }
}
