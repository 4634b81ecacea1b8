//! Configuration management.
//!
//! Configuration comes from the process environment, optionally seeded
//! from a `.env` file:
//! - `BINANCE_API_KEY` / `BINANCE_API_SECRET` - required credentials
//! - `TRADEBOT_BASE_URL` - REST endpoint, defaults to the futures testnet
//! - `TRADEBOT_TIMEOUT_MS` - per-request timeout
//! - `TRADEBOT_RECV_WINDOW_MS` - signed request validity window
//! - `TRADEBOT_LOG_LEVEL` - default log filter
//!
//! # Example
//!
//! ```rust,ignore
//! use tradebot_core::config::{BotConfig, load_env_file};
//!
//! load_env_file(".env")?;
//! let config = BotConfig::from_env()?;
//! let credentials = tradebot_core::config::credentials_from_env()?;
//! ```

mod app;
mod env;

pub use app::{
    BotConfig, DEFAULT_BASE_URL, DEFAULT_RECV_WINDOW_MS, DEFAULT_TIMEOUT_MS, credentials_from_env,
    load_env_file,
};
pub use env::EnvOverride;
