//! Masked-input display formatting for card numbers.
//!
//! The card widget shows the PAN grouped the way it is embossed: fours for
//! most schemes, 4-6-5 for American Express and Diners Club. These helpers
//! transform between the raw digit string the validators work on and the
//! grouped form the text field displays.

use super::CardScheme;

/// Strips display formatting back to bare digits.
///
/// Removes spaces only; any other character is preserved so that validation
/// still sees (and rejects) genuinely bad input.
#[must_use]
pub fn strip(input: &str) -> String {
    input.chars().filter(|c| *c != ' ').collect()
}

/// Formats a raw digit string into the scheme's display grouping.
///
/// Accepts partial input: the last group may be shorter than its slot, and
/// digits beyond the grouping's capacity are appended ungrouped so the user
/// never loses keystrokes.
///
/// # Example
///
/// ```
/// use payform::card::CardScheme;
/// use payform::card::format::group;
///
/// assert_eq!(group("4532015112830366", CardScheme::Visa), "4532 0151 1283 0366");
/// assert_eq!(group("378282246310005", CardScheme::Amex), "3782 822463 10005");
/// assert_eq!(group("4532 01", CardScheme::Visa), "4532 01");
/// ```
#[must_use]
pub fn group(input: &str, scheme: CardScheme) -> String {
    let digits = strip(input);
    let mut out = String::with_capacity(digits.len() + 5);
    let mut rest = digits.as_str();
    for width in scheme.display_grouping() {
        if rest.is_empty() {
            break;
        }
        let cut = (*width).min(rest.len());
        let Some((chunk, tail)) = rest.split_at_checked(cut) else {
            break;
        };
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(chunk);
        rest = tail;
    }
    if !rest.is_empty() {
        out.push(' ');
        out.push_str(rest);
    }
    out
}
