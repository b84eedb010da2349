#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the payform payment-collection SDK.
//!
//! This crate provides the foundational types used throughout the payform
//! ecosystem for collecting and tokenizing payment data. It is designed to be
//! transport-agnostic, with the HTTP gateway implementation provided by the
//! `payform-http` crate and flow orchestration by `payform-flows`.
//!
//! # Overview
//!
//! A host application embeds a payment widget (card, gift card, address, or
//! wallet). The widget validates user input field by field, and on submit
//! sends the sensitive data to the payment gateway in exchange for an opaque
//! token. Raw card data never leaves the widget in any other form.
//!
//! # Modules
//!
//! - [`address`] - Billing address model and field validation
//! - [`card`] - Card number (Luhn), expiry, security code, scheme detection
//! - [`config`] - Widget configuration and gateway environments
//! - [`error`] - Per-payment-method error taxonomy
//! - [`gateway`] - The [`Gateway`](gateway::Gateway) trait implemented by transports
//! - [`giftcard`] - Gift card number and PIN validation
//! - [`state`] - The [`WidgetState`](state::WidgetState) lifecycle variants

pub mod address;
pub mod card;
pub mod config;
pub mod error;
pub mod gateway;
pub mod giftcard;
pub mod state;
