//! Billing address model and field validation.
//!
//! Address search via a device geocoder is a platform concern; this module
//! only models the collected result and its required-field rules.

use serde::{Deserialize, Serialize};

/// A billing address collected by the address widget.
///
/// Line 2 is the only optional field; everything else must be non-blank for
/// the address to be usable on a tokenization request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingAddress {
    /// Street address, first line.
    pub address_line1: String,
    /// Street address, second line (unit, suite). Optional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    /// City or locality.
    pub city: String,
    /// State, province, or region.
    pub state: String,
    /// Postal or ZIP code.
    pub postcode: String,
    /// Country name or ISO code, as the gateway expects it.
    pub country: String,
}

impl BillingAddress {
    /// Whether every required field is non-blank.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        let required = [
            &self.address_line1,
            &self.city,
            &self.state,
            &self.postcode,
            &self.country,
        ];
        required.iter().all(|field| !field.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_address() -> BillingAddress {
        BillingAddress {
            address_line1: "1 Market St".into(),
            address_line2: Some("Unit 4".into()),
            city: "Sydney".into(),
            state: "NSW".into(),
            postcode: "2000".into(),
            country: "AU".into(),
        }
    }

    #[test]
    fn test_complete_address() {
        assert!(full_address().is_complete());
    }

    #[test]
    fn test_line2_is_optional() {
        let mut address = full_address();
        address.address_line2 = None;
        assert!(address.is_complete());
    }

    #[test]
    fn test_blank_required_field_fails() {
        for field in ["line1", "city", "state", "postcode", "country"] {
            let mut address = full_address();
            match field {
                "line1" => address.address_line1 = "  ".into(),
                "city" => address.city = String::new(),
                "state" => address.state = String::new(),
                "postcode" => address.postcode = String::new(),
                _ => address.country = String::new(),
            }
            assert!(!address.is_complete(), "{field} should be required");
        }
    }

    #[test]
    fn test_serialize_omits_missing_line2() {
        let mut address = full_address();
        address.address_line2 = None;
        let json = serde_json::to_string(&address).unwrap();
        assert!(!json.contains("address_line2"));
    }
}
