//! Issuer scheme detection from IIN/BIN prefixes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A card issuing scheme, detected from the leading digits of the PAN.
///
/// Prefixes with no entry in the IIN table map to [`CardScheme::Other`];
/// detection never fails, it only degrades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardScheme {
    /// American Express.
    Amex,
    /// Australian Bankcard (defunct but still present in stored vaults).
    Ausbc,
    /// Diners Club International.
    Diners,
    /// Discover.
    Discover,
    /// Japan Credit Bureau.
    Jcb,
    /// Maestro.
    Maestro,
    /// Mastercard.
    Mastercard,
    /// Solo (UK debit).
    Solo,
    /// UnionPay.
    UnionPay,
    /// Visa.
    Visa,
    /// Unrecognized prefix.
    Other,
}

/// The flavor of security code a scheme prints on its cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SecurityCodeKind {
    /// Card Verification Value (Visa and most others).
    Cvv,
    /// Card Validation Code (Mastercard).
    Cvc,
    /// Card Identification Number (American Express, Diners Club).
    Cid,
}

/// One IIN range: PANs whose leading `digits(low)` digits fall in
/// `low..=high` belong to `scheme`. Bounds must have equal digit counts.
struct IinRange {
    low: u32,
    high: u32,
    scheme: CardScheme,
}

const fn range(low: u32, high: u32, scheme: CardScheme) -> IinRange {
    IinRange { low, high, scheme }
}

/// The IIN table, checked in order. Longer prefixes come first so that
/// carve-outs (e.g. Solo's `6334` inside Maestro territory, Discover's
/// `6011` ahead of the broad `6x` ranges) win over the broader range.
const IIN_TABLE: &[IinRange] = &[
    range(560221, 560225, CardScheme::Ausbc),
    range(6334, 6334, CardScheme::Solo),
    range(6767, 6767, CardScheme::Solo),
    range(5018, 5018, CardScheme::Maestro),
    range(5020, 5020, CardScheme::Maestro),
    range(5038, 5038, CardScheme::Maestro),
    range(6304, 6304, CardScheme::Maestro),
    range(6759, 6759, CardScheme::Maestro),
    range(6761, 6763, CardScheme::Maestro),
    range(2221, 2720, CardScheme::Mastercard),
    range(3528, 3589, CardScheme::Jcb),
    range(6011, 6011, CardScheme::Discover),
    range(300, 305, CardScheme::Diners),
    range(309, 309, CardScheme::Diners),
    range(644, 649, CardScheme::Discover),
    range(34, 34, CardScheme::Amex),
    range(37, 37, CardScheme::Amex),
    range(36, 36, CardScheme::Diners),
    range(38, 39, CardScheme::Diners),
    range(51, 55, CardScheme::Mastercard),
    range(62, 62, CardScheme::UnionPay),
    range(65, 65, CardScheme::Discover),
    range(4, 4, CardScheme::Visa),
];

const fn digit_count(mut n: u32) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

impl CardScheme {
    /// Detects the scheme from the leading digits of a PAN.
    ///
    /// Accepts partial input: detection runs on whatever prefix the user has
    /// typed so far, so the widget can adjust the security-code hint and
    /// display grouping mid-entry. Non-digit characters or an unmatched
    /// prefix yield [`CardScheme::Other`].
    #[must_use]
    pub fn detect(digits: &str) -> Self {
        for entry in IIN_TABLE {
            let len = digit_count(entry.low);
            let Some(prefix) = digits.get(..len) else {
                continue;
            };
            let Ok(prefix) = prefix.parse::<u32>() else {
                return Self::Other;
            };
            if prefix >= entry.low && prefix <= entry.high {
                return entry.scheme;
            }
        }
        Self::Other
    }

    /// The flavor of security code printed on this scheme's cards.
    #[must_use]
    pub const fn security_code_kind(self) -> SecurityCodeKind {
        match self {
            Self::Amex | Self::Diners => SecurityCodeKind::Cid,
            Self::Mastercard | Self::Maestro => SecurityCodeKind::Cvc,
            _ => SecurityCodeKind::Cvv,
        }
    }

    /// The exact security-code length this scheme requires.
    #[must_use]
    pub const fn security_code_length(self) -> usize {
        match self {
            Self::Amex | Self::Diners => 4,
            _ => 3,
        }
    }

    /// Digit grouping used when formatting the PAN for display.
    ///
    /// Amex and Diners print 4-6-5; everything else groups in fours.
    #[must_use]
    pub const fn display_grouping(self) -> &'static [usize] {
        match self {
            Self::Amex | Self::Diners => &[4, 6, 5],
            _ => &[4, 4, 4, 4, 4],
        }
    }
}

impl fmt::Display for CardScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Amex => "American Express",
            Self::Ausbc => "Australian Bank Card",
            Self::Diners => "Diners Club",
            Self::Discover => "Discover",
            Self::Jcb => "JCB",
            Self::Maestro => "Maestro",
            Self::Mastercard => "Mastercard",
            Self::Solo => "Solo",
            Self::UnionPay => "UnionPay",
            Self::Visa => "Visa",
            Self::Other => "Other",
        };
        f.write_str(name)
    }
}
