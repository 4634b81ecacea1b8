//! # Tradebot Core
//!
//! Core types, traits, and interfaces for the tradebot futures order tool.
//!
//! This crate provides:
//! - `NewType` wrappers for financial primitives (Price, Quantity, MarkPrice, Symbol)
//! - Order data structures (`OrderRequest`, `ProtectiveOrderRequest`, `OrderParams`)
//! - Error types and the exchange API error code table
//! - The [`traits::FuturesExchange`] seam implemented by exchange adapters
//! - Environment-based configuration with `.env` support

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

/// Core type definitions and 'NewType' wrappers
pub mod types;

/// Order and account data structures
pub mod data;

/// Error types and handling
pub mod error;

/// Core trait definitions
pub mod traits;

/// Configuration management
pub mod config;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::data::*;
    pub use crate::error::*;
    pub use crate::traits::*;
    pub use crate::types::*;
}
