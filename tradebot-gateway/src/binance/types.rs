//! Binance USDT-M futures REST payloads.

#![allow(clippy::doc_markdown)]

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tradebot_core::data::{AccountStatus, OrderResponse, OrderStatus};
use tradebot_core::error::DataError;
use tradebot_core::types::{MarkPrice, Quantity, Symbol};

/// REST endpoints used by the futures client.
pub mod endpoints {
    /// Order creation (signed, POST).
    pub const ORDER: &str = "/fapi/v1/order";
    /// Account information (signed, GET).
    pub const ACCOUNT: &str = "/fapi/v2/account";
    /// Mark price and funding (public, GET).
    pub const PREMIUM_INDEX: &str = "/fapi/v1/premiumIndex";
}

/// Order response (`newOrderRespType=RESULT` or the default ACK shape).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinanceOrderResponse {
    /// Order ID
    pub order_id: i64,
    /// Symbol
    pub symbol: String,
    /// Order status
    pub status: OrderStatus,
    /// Client order ID
    #[serde(default)]
    pub client_order_id: Option<String>,
    /// Executed quantity
    #[serde(default)]
    pub executed_qty: Option<String>,
    /// Average price
    #[serde(default)]
    pub avg_price: Option<String>,
    /// Original quantity
    #[serde(default)]
    pub orig_qty: Option<String>,
    /// Update time
    #[serde(default)]
    pub update_time: Option<i64>,
}

impl TryFrom<BinanceOrderResponse> for OrderResponse {
    type Error = DataError;

    fn try_from(resp: BinanceOrderResponse) -> Result<Self, Self::Error> {
        let symbol = Symbol::new(resp.symbol).map_err(|e| DataError::InvalidValue {
            field: "symbol".to_string(),
            reason: e.to_string(),
        })?;

        let executed_qty = match resp.executed_qty.as_deref() {
            Some(raw) => raw
                .parse::<Quantity>()
                .map_err(|e| DataError::InvalidValue {
                    field: "executedQty".to_string(),
                    reason: e.to_string(),
                })?,
            None => Quantity::ZERO,
        };

        let avg_price = resp
            .avg_price
            .as_deref()
            .map(|raw| {
                raw.parse::<Decimal>().map_err(|e| DataError::InvalidValue {
                    field: "avgPrice".to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            order_id: resp.order_id,
            symbol,
            status: resp.status,
            executed_qty,
            avg_price,
        })
    }
}

/// Futures account information. Only the fields the bot reads are declared.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinanceFuturesAccount {
    /// Can trade
    pub can_trade: bool,
    /// Total wallet balance
    #[serde(default)]
    pub total_wallet_balance: Option<String>,
    /// Available balance
    #[serde(default)]
    pub available_balance: Option<String>,
}

impl TryFrom<BinanceFuturesAccount> for AccountStatus {
    type Error = DataError;

    fn try_from(account: BinanceFuturesAccount) -> Result<Self, Self::Error> {
        Ok(Self {
            can_trade: account.can_trade,
            total_wallet_balance: parse_decimal_field(
                "totalWalletBalance",
                account.total_wallet_balance.as_deref(),
            )?,
            available_balance: parse_decimal_field(
                "availableBalance",
                account.available_balance.as_deref(),
            )?,
        })
    }
}

/// Premium index entry for a single symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinancePremiumIndex {
    /// Symbol
    pub symbol: String,
    /// Mark price
    pub mark_price: String,
    /// Index price
    #[serde(default)]
    pub index_price: Option<String>,
    /// Last funding rate
    #[serde(default)]
    pub last_funding_rate: Option<String>,
}

impl TryFrom<BinancePremiumIndex> for MarkPrice {
    type Error = DataError;

    fn try_from(index: BinancePremiumIndex) -> Result<Self, Self::Error> {
        index
            .mark_price
            .parse::<MarkPrice>()
            .map_err(|e| DataError::InvalidValue {
                field: "markPrice".to_string(),
                reason: e.to_string(),
            })
    }
}

/// Binance API error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinanceApiError {
    /// Error code
    pub code: i32,
    /// Error message
    pub msg: String,
}

fn parse_decimal_field(field: &str, raw: Option<&str>) -> Result<Decimal, DataError> {
    match raw {
        Some(s) => s.parse().map_err(|e: rust_decimal::Error| DataError::InvalidValue {
            field: field.to_string(),
            reason: e.to_string(),
        }),
        None => Ok(Decimal::ZERO),
    }
}
