//! Binance USDT-M futures adapter.
//!
//! REST client for order placement, account checks and mark prices
//! against the futures API (testnet by default).

mod client;
mod types;

pub use client::BinanceFuturesClient;
pub use types::*;
