//! Card expiry parsing and validation.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Utc};

/// Two-digit years are anchored here: `"25"` means 2025, never 1925.
const BASE_YEAR: i32 = 2000;

/// A card expiry month, parsed from a 4-digit `MMYY` string.
///
/// A card is valid through the end of its expiry month: an expiry equal to
/// the current month still passes.
///
/// # Example
///
/// ```
/// use payform::card::CardExpiry;
///
/// let expiry: CardExpiry = "0139".parse().unwrap();
/// assert_eq!(expiry.month(), 1);
/// assert_eq!(expiry.year(), 2039);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CardExpiry {
    year: i32,
    month: u32,
}

/// Reason an expiry string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CardExpiryError {
    /// Input was not exactly four digits.
    #[error("expiry must be exactly 4 digits (MMYY)")]
    Malformed,
    /// Month was outside `01..=12`.
    #[error("expiry month must be between 01 and 12")]
    MonthOutOfRange,
}

impl FromStr for CardExpiry {
    type Err = CardExpiryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CardExpiryError::Malformed);
        }
        let (mm, yy) = s.split_at(2);
        let month: u32 = mm.parse().map_err(|_| CardExpiryError::Malformed)?;
        let year: i32 = yy.parse().map_err(|_| CardExpiryError::Malformed)?;
        if !(1..=12).contains(&month) {
            return Err(CardExpiryError::MonthOutOfRange);
        }
        Ok(Self {
            year: BASE_YEAR + year,
            month,
        })
    }
}

impl CardExpiry {
    /// The expiry month, `1..=12`.
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// The full four-digit expiry year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Whether the card has not yet expired as of the system clock.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.is_valid_at(Utc::now().date_naive())
    }

    /// Whether the card has not yet expired as of `today`.
    ///
    /// Split out from [`Self::is_valid`] so expiry logic can be tested
    /// against a fixed date.
    #[must_use]
    pub fn is_valid_at(self, today: NaiveDate) -> bool {
        (self.year, self.month) >= (today.year(), today.month())
    }
}

impl fmt::Display for CardExpiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year % 100)
    }
}
