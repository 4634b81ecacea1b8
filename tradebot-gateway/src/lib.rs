//! # Tradebot Gateway
//!
//! Exchange connectivity for the tradebot futures order tool.
//!
//! This crate provides:
//! - REST client with HMAC-SHA256 request signing
//! - Binance USDT-M futures adapter implementing
//!   [`tradebot_core::traits::FuturesExchange`]
//! - [`session::ExchangeSession`], the authenticated session used by the CLI
//!
//! # Example
//!
//! ```ignore
//! use tradebot_core::config::{BotConfig, credentials_from_env};
//! use tradebot_gateway::session::ExchangeSession;
//!
//! let session = ExchangeSession::connect(credentials_from_env()?, &BotConfig::from_env()?)?;
//! if session.validate_connection().await {
//!     println!("connected");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

/// REST client infrastructure
pub mod rest;

/// Binance USDT-M futures adapter
pub mod binance;

/// Authenticated exchange session
pub mod session;

#[cfg(test)]
mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::binance::BinanceFuturesClient;
    pub use crate::rest::{RequestSigner, RestClient, RestConfig, RestConfigBuilder};
    pub use crate::session::ExchangeSession;
}
