//! Card input validation and scheme detection.
//!
//! This module contains the pure validation logic that backs the card widget:
//!
//! - [`CardNumber`] - PAN newtype with Luhn checksum validation
//! - [`CardScheme`] - Issuer scheme detected from IIN/BIN prefixes
//! - [`CardExpiry`] - MMYY expiry parsing and current-month validity
//! - [`SecurityCode`] - CVV/CVC/CID validation against the detected scheme
//! - [`holder`] - Cardholder name validation
//! - [`format`] - Masked-input display grouping
//!
//! Everything here is a pure function of its input; the flow state machines
//! in `payform-flows` re-run these validators on every keystroke.

mod expiry;
mod number;
mod scheme;
mod security_code;

pub mod format;
pub mod holder;

pub use expiry::*;
pub use number::*;
pub use scheme::*;
pub use security_code::*;
