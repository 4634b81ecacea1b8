//! Futures account status.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Subset of the futures account payload used to confirm the API key works.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountStatus {
    /// Whether the account may place orders
    pub can_trade: bool,
    /// Total wallet balance in the margin asset
    pub total_wallet_balance: Decimal,
    /// Balance available for new positions
    pub available_balance: Decimal,
}
