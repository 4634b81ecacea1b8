//! Command implementations.

pub mod health;
pub mod trade;
