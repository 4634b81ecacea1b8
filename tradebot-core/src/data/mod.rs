//! Order data model.
//!
//! - [`OrderRequest`] - validated primary order (MARKET or LIMIT)
//! - [`ProtectiveOrderRequest`] - stop-loss or take-profit for an opened position
//! - [`OrderParams`] - the exact parameter set sent to the exchange
//! - [`OrderResponse`] / [`AccountStatus`] - decoded exchange answers

mod account;
mod order;
mod params;

pub use account::AccountStatus;
pub use order::{
    OrderRequest, OrderResponse, OrderSide, OrderStatus, OrderType, ProtectiveKind,
    ProtectiveOrderRequest, TimeInForce,
};
pub use params::OrderParams;
