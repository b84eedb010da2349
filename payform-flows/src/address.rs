//! The billing address collection flow.
//!
//! Unlike the tokenization flows, collecting an address involves no gateway
//! call: the flow validates field by field and hands the finished
//! [`BillingAddress`] back to the host (or to a parent card flow).

use payform::address::BillingAddress;
use payform::error::WidgetError;

/// State machine for the address widget.
///
/// # Example
///
/// ```
/// use payform_flows::AddressFlow;
///
/// let mut flow = AddressFlow::new();
/// flow.set_address_line1("1 Market St");
/// flow.set_city("Sydney");
/// flow.set_state("NSW");
/// flow.set_postcode("2000");
/// flow.set_country("AU");
/// let address = flow.complete().unwrap();
/// assert_eq!(address.city, "Sydney");
/// ```
#[derive(Debug, Clone, Default)]
pub struct AddressFlow {
    input: BillingAddress,
}

impl AddressFlow {
    /// Creates an empty flow.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-fills the flow, e.g. from a geocoder lookup done by the host.
    #[must_use]
    pub const fn prefilled(address: BillingAddress) -> Self {
        Self { input: address }
    }

    /// The current input.
    #[must_use]
    pub const fn input(&self) -> &BillingAddress {
        &self.input
    }

    /// Updates the first address line.
    pub fn set_address_line1(&mut self, value: &str) {
        self.input.address_line1 = value.to_owned();
    }

    /// Updates the optional second address line.
    pub fn set_address_line2(&mut self, value: &str) {
        self.input.address_line2 = if value.trim().is_empty() {
            None
        } else {
            Some(value.to_owned())
        };
    }

    /// Updates the city.
    pub fn set_city(&mut self, value: &str) {
        self.input.city = value.to_owned();
    }

    /// Updates the state or region.
    pub fn set_state(&mut self, value: &str) {
        self.input.state = value.to_owned();
    }

    /// Updates the postcode.
    pub fn set_postcode(&mut self, value: &str) {
        self.input.postcode = value.to_owned();
    }

    /// Updates the country.
    pub fn set_country(&mut self, value: &str) {
        self.input.country = value.to_owned();
    }

    /// Whether every required field is currently non-blank.
    #[must_use]
    pub fn is_data_valid(&self) -> bool {
        self.input.is_complete()
    }

    /// Yields the validated address.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError::InvalidInput`] if a required field is blank.
    pub fn complete(&self) -> Result<BillingAddress, WidgetError> {
        if self.input.is_complete() {
            Ok(self.input.clone())
        } else {
            Err(WidgetError::InvalidInput(
                "billing address is incomplete".to_owned(),
            ))
        }
    }

    /// Clears all input.
    pub fn reset(&mut self) {
        self.input = BillingAddress::default();
    }
}
