//! # Tradebot Engine
//!
//! Order submission logic for the tradebot futures order tool.
//!
//! This crate provides:
//! - [`RetryPolicy`] - bounded exponential backoff for transient failures
//! - [`Sleeper`] - injectable backoff delay ([`TokioSleeper`] in production)
//! - [`OrderService`] - primary orders, stop-loss and take-profit placement
//!
//! The service only sees the exchange through
//! [`tradebot_core::traits::FuturesExchange`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

/// Retry policy and backoff sleeping
pub mod retry;

/// Order service
pub mod service;

pub use retry::{RetryPolicy, Sleeper, TokioSleeper};
pub use service::OrderService;
