//! Order placement workflow.
//!
//! Submits the primary order, then the optional stop-loss and take-profit.
//! A failing protective order leaves the primary order in place.

use anyhow::Result;
use tracing::info;

use tradebot_core::data::{OrderRequest, OrderResponse, ProtectiveKind, ProtectiveOrderRequest};
use tradebot_core::error::TradeError;
use tradebot_core::traits::FuturesExchange;
use tradebot_core::types::Price;
use tradebot_engine::{OrderService, Sleeper};

/// Validated trading-mode input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeOrder {
    /// Primary MARKET or LIMIT order
    pub request: OrderRequest,
    /// Stop-loss trigger for the opened position
    pub stop_loss: Option<Price>,
    /// Take-profit trigger for the opened position
    pub take_profit: Option<Price>,
}

/// Renders the summary printed before submission.
#[must_use]
pub fn format_summary(request: &OrderRequest) -> String {
    let price = request
        .price()
        .map(|price| format!("\nPrice: {price}"))
        .unwrap_or_default();
    format!(
        "\nOrder Request Summary:\nSymbol: {}\nSide: {}\nType: {}\nQuantity: {}{price}",
        request.symbol(),
        request.side(),
        request.order_type(),
        request.quantity()
    )
}

/// Renders the exchange response fields.
#[must_use]
pub fn format_response(response: &OrderResponse) -> String {
    let avg_price = response
        .avg_price
        .map_or_else(|| "N/A".to_string(), |p| p.normalize().to_string());
    format!(
        "\nOrder Response:\nOrder ID: {}\nStatus: {}\nExecuted Quantity: {}\nAvg Price: {avg_price}",
        response.order_id, response.status, response.executed_qty
    )
}

/// Places the primary order and any protective orders.
///
/// Returns the primary order's response.
pub async fn execute<E, S>(
    service: &OrderService<E, S>,
    order: &TradeOrder,
) -> Result<OrderResponse, TradeError>
where
    E: FuturesExchange,
    S: Sleeper,
{
    let response = service.submit_order(&order.request).await?;

    if let Some(stop_price) = order.stop_loss {
        let stop_loss =
            ProtectiveOrderRequest::for_order(&order.request, ProtectiveKind::StopLoss, stop_price);
        service.place_protective(&stop_loss).await?;
    }

    if let Some(target_price) = order.take_profit {
        let take_profit = ProtectiveOrderRequest::for_order(
            &order.request,
            ProtectiveKind::TakeProfit,
            target_price,
        );
        service.place_protective(&take_profit).await?;
    }

    Ok(response)
}

/// Prints the summary, executes the order and prints the response.
pub async fn run<E, S>(service: &OrderService<E, S>, order: &TradeOrder) -> Result<()>
where
    E: FuturesExchange,
    S: Sleeper,
{
    println!("{}", format_summary(&order.request));

    let response = execute(service, order).await?;
    info!(order_id = response.order_id, "Trading workflow completed");

    println!("{}", format_response(&response));
    println!("\n✅ Order placed successfully!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{NoSleep, PaperExchange};
    use rust_decimal_macros::dec;
    use tradebot_core::data::{OrderSide, OrderStatus, OrderType};
    use tradebot_core::error::OrderValidationError;
    use tradebot_core::types::{Quantity, Symbol};

    fn order(
        side: OrderSide,
        stop_loss: Option<rust_decimal::Decimal>,
        take_profit: Option<rust_decimal::Decimal>,
    ) -> TradeOrder {
        TradeOrder {
            request: OrderRequest::new(
                Symbol::new("BTCUSDT").unwrap(),
                side,
                OrderType::Market,
                Quantity::new(dec!(0.01)).unwrap(),
                None,
            )
            .unwrap(),
            stop_loss: stop_loss.map(|p| Price::new(p).unwrap()),
            take_profit: take_profit.map(|p| Price::new(p).unwrap()),
        }
    }

    #[test]
    fn test_format_summary() {
        let market = order(OrderSide::Buy, None, None);
        assert_eq!(
            format_summary(&market.request),
            "\nOrder Request Summary:\nSymbol: BTCUSDT\nSide: BUY\nType: MARKET\nQuantity: 0.01"
        );

        let limit = OrderRequest::new(
            Symbol::new("ETHUSDT").unwrap(),
            OrderSide::Sell,
            OrderType::Limit,
            Quantity::new(dec!(1.5)).unwrap(),
            Some(Price::new(dec!(3200.50)).unwrap()),
        )
        .unwrap();
        assert!(format_summary(&limit).ends_with("Quantity: 1.5\nPrice: 3200.5"));
    }

    #[test]
    fn test_format_response() {
        let mut response = OrderResponse {
            order_id: 4_067_741_114,
            symbol: Symbol::new("BTCUSDT").unwrap(),
            status: OrderStatus::Filled,
            executed_qty: Quantity::new(dec!(0.010)).unwrap(),
            avg_price: Some(dec!(42123.40000)),
        };
        assert_eq!(
            format_response(&response),
            "\nOrder Response:\nOrder ID: 4067741114\nStatus: FILLED\nExecuted Quantity: 0.01\nAvg Price: 42123.4"
        );

        response.avg_price = None;
        assert!(format_response(&response).ends_with("Avg Price: N/A"));
    }

    #[tokio::test]
    async fn test_primary_then_protective_orders() {
        let service = OrderService::with_sleeper(PaperExchange::at(dec!(50000)), NoSleep);
        let trade = order(OrderSide::Buy, Some(dec!(48000)), Some(dec!(52000)));

        let response = execute(&service, &trade).await.unwrap();
        assert_eq!(response.order_id, 1);
        assert_eq!(
            service.exchange().submitted_types(),
            vec!["MARKET", "STOP_MARKET", "TAKE_PROFIT_MARKET"]
        );
    }

    #[tokio::test]
    async fn test_primary_only_without_triggers() {
        let service = OrderService::with_sleeper(PaperExchange::at(dec!(50000)), NoSleep);

        execute(&service, &order(OrderSide::Sell, None, None))
            .await
            .unwrap();
        assert_eq!(service.exchange().submitted_types(), vec!["MARKET"]);
    }

    #[tokio::test]
    async fn test_rejected_stop_loss_keeps_primary() {
        let service = OrderService::with_sleeper(PaperExchange::at(dec!(50000)), NoSleep);
        let trade = order(OrderSide::Sell, Some(dec!(49000)), Some(dec!(45000)));

        let err = execute(&service, &trade).await.unwrap_err();
        assert!(matches!(
            err,
            TradeError::Validation(OrderValidationError::StopLossDirection { .. })
        ));
        assert_eq!(
            err.to_string(),
            "[Validation] Stop loss must be ABOVE current price for SHORT."
        );
        assert_eq!(service.exchange().submitted_types(), vec!["MARKET"]);
    }
}
