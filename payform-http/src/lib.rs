#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! HTTP gateway client for the payform payment-collection SDK.
//!
//! This crate provides [`GatewayClient`], the production implementation of
//! the [`payform::gateway::Gateway`] trait. It speaks JSON over HTTPS to the
//! payment gateway API: tokenizing card and gift-card details, capturing and
//! declining wallet charges, and fetching wallet callback URLs.
//!
//! # Modules
//!
//! - [`client`] - The [`GatewayClient`] itself
//! - [`types`] - Wire DTOs and the gateway's resource envelope
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing spans around gateway requests

pub mod client;
pub mod types;

pub use client::GatewayClient;
