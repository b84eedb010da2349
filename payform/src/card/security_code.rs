//! Security code (CVV/CVC/CID) validation.

use std::fmt;

use super::CardScheme;

/// A candidate security code, paired with the scheme it must match.
///
/// Valid iff the input is all digits and its length exactly equals the
/// scheme's expected length (4 for American Express and Diners Club,
/// 3 otherwise). A partially typed code is simply not yet valid.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SecurityCode<'a> {
    code: &'a str,
    scheme: CardScheme,
}

impl<'a> SecurityCode<'a> {
    /// Pairs a raw input string with the scheme detected from the PAN.
    #[must_use]
    pub const fn new(code: &'a str, scheme: CardScheme) -> Self {
        Self { code, scheme }
    }

    /// The number of digits this code must have to be valid.
    #[must_use]
    pub const fn expected_length(self) -> usize {
        self.scheme.security_code_length()
    }

    /// Whether the code is complete and well-formed for its scheme.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.code.len() == self.expected_length()
            && self.code.bytes().all(|b| b.is_ascii_digit())
    }
}

impl fmt::Debug for SecurityCode<'_> {
    // Never echo the code itself.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityCode")
            .field("scheme", &self.scheme)
            .field("len", &self.code.len())
            .finish()
    }
}
