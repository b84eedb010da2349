//! Primary account number (PAN) parsing and Luhn validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::CardScheme;

/// The shortest PAN the gateway will tokenize.
///
/// IIN-era account numbers bottom out at 8 digits; anything shorter cannot
/// carry a meaningful checksum and is rejected before Luhn runs.
pub const MIN_PAN_LENGTH: usize = 8;

/// The longest PAN defined by ISO/IEC 7812.
pub const MAX_PAN_LENGTH: usize = 19;

/// A primary account number, held as bare digits.
///
/// Constructed via [`FromStr`], which strips spaces and rejects any other
/// non-digit character. Holding the digits behind a newtype keeps raw card
/// data out of `Debug` output and log lines: both [`fmt::Debug`] and
/// [`fmt::Display`] show only the last four digits.
///
/// # Serialization
///
/// Serialized as the bare digit string, since that is the form the gateway's
/// `card_number` field expects.
///
/// # Example
///
/// ```
/// use payform::card::CardNumber;
///
/// let pan: CardNumber = "4532 0151 1283 0366".parse().unwrap();
/// assert!(pan.is_valid());
/// assert_eq!(pan.to_string(), "•••• 0366");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct CardNumber(String);

/// Reason a candidate PAN was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CardNumberError {
    /// Input contained a character other than a digit or space.
    #[error("card number must contain only digits")]
    NonDigit,
    /// Input was empty or outside the 8..=19 digit range.
    #[error("card number must be {MIN_PAN_LENGTH} to {MAX_PAN_LENGTH} digits")]
    Length,
}

impl FromStr for CardNumber {
    type Err = CardNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: String = s.chars().filter(|c| *c != ' ').collect();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CardNumberError::NonDigit);
        }
        if digits.len() < MIN_PAN_LENGTH || digits.len() > MAX_PAN_LENGTH {
            return Err(CardNumberError::Length);
        }
        Ok(Self(digits))
    }
}

impl CardNumber {
    /// Returns the bare digit string.
    ///
    /// Only the gateway transport should need this; everything else works
    /// with the newtype.
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.0
    }

    /// Returns the number of digits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`: construction rejects empty input.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Detects the issuing scheme from the leading digits.
    #[must_use]
    pub fn scheme(&self) -> CardScheme {
        CardScheme::detect(&self.0)
    }

    /// Runs the Luhn checksum over the digits.
    ///
    /// Processes digits right to left, doubling every second digit and
    /// subtracting 9 when the doubled value exceeds 9; the number is valid
    /// iff the running sum is divisible by 10.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        luhn(&self.0)
    }

    /// Returns the last four digits, for display.
    #[must_use]
    pub fn last_four(&self) -> &str {
        let cut = self.0.len().saturating_sub(4);
        &self.0[cut..]
    }
}

/// Luhn checksum over an all-digit string.
fn luhn(digits: &str) -> bool {
    let mut sum = 0u32;
    for (i, b) in digits.bytes().rev().enumerate() {
        let mut d = u32::from(b - b'0');
        if i % 2 == 1 {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
    }
    sum % 10 == 0
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\u{2022}\u{2022}\u{2022}\u{2022} {}", self.last_four())
    }
}

impl fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CardNumber").field(&self.to_string()).finish()
    }
}

impl Serialize for CardNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CardNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_valid_number_passes_luhn() {
        let pan: CardNumber = "4532015112830366".parse().unwrap();
        assert!(pan.is_valid());
    }

    #[test]
    fn test_spaces_are_stripped_before_checking() {
        let pan: CardNumber = "4532 0151 1283 0366".parse().unwrap();
        assert!(pan.is_valid());
        assert_eq!(pan.digits(), "4532015112830366");
    }

    #[test]
    fn test_single_altered_digit_fails_luhn() {
        let pan: CardNumber = "4532015112830367".parse().unwrap();
        assert!(!pan.is_valid());
    }

    #[test]
    fn test_non_digit_input_rejected() {
        assert_eq!(
            "4532-0151-1283-0366".parse::<CardNumber>(),
            Err(CardNumberError::NonDigit)
        );
        assert_eq!("".parse::<CardNumber>(), Err(CardNumberError::NonDigit));
    }

    #[test]
    fn test_too_short_input_rejected() {
        assert_eq!("4111111".parse::<CardNumber>(), Err(CardNumberError::Length));
    }

    #[test]
    fn test_too_long_input_rejected() {
        assert_eq!(
            "41111111111111111111".parse::<CardNumber>(),
            Err(CardNumberError::Length)
        );
    }

    #[test]
    fn test_display_and_debug_show_only_last_four() {
        let pan: CardNumber = "4532015112830366".parse().unwrap();
        assert_eq!(pan.to_string(), "\u{2022}\u{2022}\u{2022}\u{2022} 0366");
        assert!(!format!("{pan:?}").contains("4532"));
    }

    #[test]
    fn test_serialize_as_bare_digits() {
        let pan: CardNumber = "4532015112830366".parse().unwrap();
        assert_eq!(
            serde_json::to_string(&pan).unwrap(),
            "\"4532015112830366\""
        );
    }

    #[test]
    fn test_deserialize_invalid_rejected() {
        let result: Result<CardNumber, _> = serde_json::from_str("\"not-a-pan\"");
        assert!(result.is_err());
    }
}
