//! Cardholder name validation.

/// Maximum length the gateway accepts for `card_name`.
pub const MAX_HOLDER_NAME_LENGTH: usize = 100;

/// Validates a cardholder name.
///
/// The name must be non-empty after trimming, at most
/// [`MAX_HOLDER_NAME_LENGTH`] characters, contain at least one letter, and
/// use only letters, digits, spaces and common name punctuation
/// (hyphen, apostrophe, period, comma). Embossed names are upper-ASCII in
/// practice but the gateway accepts any Unicode letter.
#[must_use]
pub fn is_valid_holder_name(name: &str) -> bool {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_HOLDER_NAME_LENGTH {
        return false;
    }
    if !trimmed.chars().any(char::is_alphabetic) {
        return false;
    }
    trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '\'' | '.' | ','))
}
