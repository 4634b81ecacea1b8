//! Core trait definitions.
//!
//! - [`FuturesExchange`] - the three exchange calls the bot depends on
//! - [`Credentials`] - API key pair used to sign requests

mod exchange;

pub use exchange::{API_KEY_VAR, API_SECRET_VAR, Credentials, FuturesExchange};
