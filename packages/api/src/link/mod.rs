//! Bank-account linking through the Plaid aggregator.
//!
//! The browser opens Plaid Link with a short-lived link token; after the user
//! picks a bank, Link hands back a public token which is exchanged here for an
//! access token and turned into [`flow::BankSummary`] values.

mod client;
mod config;

pub use client::PlaidClient;
pub use config::LinkConfig;
