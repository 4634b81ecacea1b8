//! REST client infrastructure.
//!
//! - Request signing (HMAC-SHA256, hex)
//! - Transport error mapping onto [`tradebot_core::error::NetworkError`]
//!
//! Retries are not done here. The order service decides what to retry.
//!
//! # Example
//!
//! ```ignore
//! use tradebot_gateway::rest::{RestClient, RestConfig};
//!
//! let config = RestConfig::builder()
//!     .base_url("https://testnet.binancefuture.com")
//!     .api_key("your_api_key")
//!     .api_secret("your_api_secret")
//!     .build();
//!
//! let client = RestClient::new(config)?;
//! let response = client.get("/fapi/v1/premiumIndex")
//!     .query("symbol", "BTCUSDT")
//!     .send()
//!     .await?;
//! ```

mod client;
mod config;
mod signer;

pub use client::{RequestBuilder, RestClient};
pub use config::{RestConfig, RestConfigBuilder};
pub use signer::{RequestSigner, build_query_string, timestamp_ms};
