//! In-memory exchange for command tests.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use tradebot_core::data::{AccountStatus, OrderParams, OrderResponse, OrderStatus};
use tradebot_core::error::TradeError;
use tradebot_core::traits::FuturesExchange;
use tradebot_core::types::{MarkPrice, Quantity, Symbol};
use tradebot_engine::Sleeper;

/// Accepts every order and reports a fixed mark price.
pub(crate) struct PaperExchange {
    mark_price: MarkPrice,
    account: Result<AccountStatus, TradeError>,
    submitted: Mutex<Vec<OrderParams>>,
}

impl PaperExchange {
    pub(crate) fn at(mark: Decimal) -> Self {
        Self {
            mark_price: MarkPrice::new(mark).unwrap(),
            account: Ok(AccountStatus {
                can_trade: true,
                total_wallet_balance: dec!(1000),
                available_balance: dec!(1000),
            }),
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_account(mut self, account: Result<AccountStatus, TradeError>) -> Self {
        self.account = account;
        self
    }

    pub(crate) fn submitted_types(&self) -> Vec<String> {
        self.submitted
            .lock()
            .iter()
            .filter_map(|p| p.get("type").map(str::to_string))
            .collect()
    }
}

#[async_trait]
impl FuturesExchange for PaperExchange {
    fn name(&self) -> &str {
        "paper"
    }

    async fn place_order(&self, params: &OrderParams) -> Result<OrderResponse, TradeError> {
        let mut submitted = self.submitted.lock();
        submitted.push(params.clone());
        Ok(OrderResponse {
            order_id: i64::try_from(submitted.len()).unwrap(),
            symbol: Symbol::new("BTCUSDT").unwrap(),
            status: OrderStatus::New,
            executed_qty: Quantity::ZERO,
            avg_price: None,
        })
    }

    async fn futures_account(&self) -> Result<AccountStatus, TradeError> {
        self.account.clone()
    }

    async fn mark_price(&self, _symbol: &Symbol) -> Result<MarkPrice, TradeError> {
        Ok(self.mark_price)
    }
}

/// Skips backoff delays.
pub(crate) struct NoSleep;

#[async_trait]
impl Sleeper for NoSleep {
    async fn sleep(&self, _duration: Duration) {}
}
