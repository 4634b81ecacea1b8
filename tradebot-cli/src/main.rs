//! # Tradebot CLI
//!
//! Places orders on the Binance USDT-M futures testnet.
//!
//! ```text
//! tradebot --health
//! tradebot --symbol BTCUSDT --side buy --type market --quantity 0.01
//! tradebot --symbol BTCUSDT --side buy --type limit --quantity 0.01 --price 42000 \
//!     --stop-loss 40000 --take-profit 45000
//! ```
//!
//! Credentials come from `BINANCE_API_KEY` and `BINANCE_API_SECRET`, read
//! after loading the `.env` file if one exists.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod commands;
#[cfg(test)]
mod testing;
mod validate;

use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use rust_decimal::Decimal;
use tracing::{error, info};

use tradebot_core::config::{BotConfig, credentials_from_env, load_env_file};
use tradebot_core::data::OrderRequest;
use tradebot_core::error::ConfigError;
use tradebot_core::traits::FuturesExchange;
use tradebot_engine::{OrderService, Sleeper};
use tradebot_gateway::session::ExchangeSession;
use tradebot_telemetry::logging::{LogConfig, init_logging};

use commands::trade::TradeOrder;
use commands::{health, trade};

const MISSING_TRADE_FIELDS: &str =
    "For trading mode, --symbol, --side, --type, and --quantity are required.";

/// Binance Futures Testnet Trading Bot
#[derive(Parser, Debug)]
#[command(name = "tradebot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Trading symbol (e.g., BTCUSDT)
    #[arg(long)]
    symbol: Option<String>,

    /// BUY or SELL
    #[arg(long)]
    side: Option<String>,

    /// MARKET or LIMIT
    #[arg(long = "type", value_name = "TYPE")]
    order_type: Option<String>,

    /// Order quantity
    #[arg(long)]
    quantity: Option<Decimal>,

    /// Price (required for LIMIT)
    #[arg(long)]
    price: Option<Decimal>,

    /// Stop loss price
    #[arg(long)]
    stop_loss: Option<Decimal>,

    /// Take profit price
    #[arg(long)]
    take_profit: Option<Decimal>,

    /// Check API connectivity
    #[arg(long)]
    health: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Log file path
    #[arg(long, default_value = "trading_bot.log")]
    log_file: PathBuf,

    /// Environment file with API credentials
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,

    /// REST endpoint override (defaults to the futures testnet)
    #[arg(long)]
    base_url: Option<String>,
}

impl Cli {
    fn has_trade_fields(&self) -> bool {
        self.symbol.is_some()
            && self.side.is_some()
            && self.order_type.is_some()
            && self.quantity.is_some()
    }

    fn log_config(&self, config: Option<&BotConfig>) -> LogConfig {
        let level = config.map_or("info", |c| c.log_level.as_str());
        let log_config = LogConfig::default()
            .with_level(level)
            .with_file(Some(self.log_file.clone()));
        if self.verbose {
            log_config.verbose()
        } else {
            log_config
        }
    }

    fn trade_order(&self) -> Result<TradeOrder> {
        let (Some(symbol), Some(side), Some(order_type), Some(quantity)) =
            (&self.symbol, &self.side, &self.order_type, self.quantity)
        else {
            anyhow::bail!(MISSING_TRADE_FIELDS);
        };

        let symbol = validate::validate_symbol(symbol)?;
        let side = validate::validate_side(side)?;
        let order_type = validate::validate_order_type(order_type)?;
        let quantity = validate::validate_quantity(quantity)?;
        let price = validate::validate_price(self.price, order_type)?;

        Ok(TradeOrder {
            request: OrderRequest::new(symbol, side, order_type, quantity, price)?,
            stop_loss: validate::validate_trigger(self.stop_loss)?,
            take_profit: validate::validate_trigger(self.take_profit)?,
        })
    }
}

async fn run(
    cli: Cli,
    env_file: Result<bool, ConfigError>,
    config: Result<BotConfig, ConfigError>,
) -> Result<()> {
    if env_file? {
        info!(path = %cli.env_file.display(), "Loaded environment file");
    }

    let mut config = config?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url);
        config.validate()?;
    }

    let credentials = credentials_from_env()?;
    let session = ExchangeSession::connect(&credentials, &config)?;
    dispatch(&cli, &OrderService::new(session)).await
}

/// Runs health mode or trading mode against a connected session.
///
/// A failed connectivity check is reported but is not an error.
async fn dispatch<E, S>(cli: &Cli, service: &OrderService<ExchangeSession<E>, S>) -> Result<()>
where
    E: FuturesExchange,
    S: Sleeper,
{
    if cli.health {
        health::run(service.exchange()).await;
        return Ok(());
    }

    let order = cli.trade_order()?;
    trade::run(service, &order).await
}

fn failure_message(e: &dyn fmt::Display) -> String {
    format!("\n❌ Error: {e}")
}

/// Logs and prints a top-level failure.
fn report_failure(e: &dyn fmt::Display) -> ExitCode {
    error!("{e}");
    println!("{}", failure_message(e));
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if !cli.health && !cli.has_trade_fields() {
        Cli::command()
            .error(ErrorKind::MissingRequiredArgument, MISSING_TRADE_FIELDS)
            .exit();
    }

    let env_file = load_env_file(&cli.env_file);
    let config = BotConfig::from_env();

    let _guard = match init_logging(&cli.log_config(config.as_ref().ok())) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", failure_message(&e));
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => return report_failure(&e),
    };

    match runtime.block_on(run(cli, env_file, config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_failure(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{NoSleep, PaperExchange};
    use rust_decimal_macros::dec;
    use tradebot_core::data::{OrderSide, OrderType};
    use tradebot_core::error::{ExchangeError, OrderValidationError};

    type PaperService = OrderService<ExchangeSession<PaperExchange>, NoSleep>;

    fn paper_service(exchange: PaperExchange) -> PaperService {
        OrderService::with_sleeper(ExchangeSession::from_exchange(exchange), NoSleep)
    }

    fn submitted_types(service: &PaperService) -> Vec<String> {
        service.exchange().exchange().submitted_types()
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tradebot").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_market_order() {
        let cli = parse(&[
            "--symbol", "BTCUSDT", "--side", "buy", "--type", "market", "--quantity", "0.01",
        ]);
        assert!(cli.has_trade_fields());
        assert_eq!(cli.log_file, PathBuf::from("trading_bot.log"));
        assert_eq!(cli.env_file, PathBuf::from(".env"));

        let order = cli.trade_order().unwrap();
        assert_eq!(order.request.side(), OrderSide::Buy);
        assert_eq!(order.request.order_type(), OrderType::Market);
        assert_eq!(order.request.quantity().as_decimal(), dec!(0.01));
        assert_eq!(order.request.price(), None);
        assert_eq!(order.stop_loss, None);
    }

    #[test]
    fn test_parse_limit_with_triggers() {
        let cli = parse(&[
            "--symbol",
            "ETHUSDT",
            "--side",
            "SELL",
            "--type",
            "limit",
            "--quantity",
            "2",
            "--price",
            "3000",
            "--stop-loss",
            "3100",
            "--take-profit",
            "2800",
        ]);

        let order = cli.trade_order().unwrap();
        assert_eq!(order.request.price().map(|p| p.as_decimal()), Some(dec!(3000)));
        assert_eq!(order.stop_loss.map(|p| p.as_decimal()), Some(dec!(3100)));
        assert_eq!(order.take_profit.map(|p| p.as_decimal()), Some(dec!(2800)));
    }

    #[test]
    fn test_limit_without_price_rejected() {
        let cli = parse(&[
            "--symbol", "BTCUSDT", "--side", "buy", "--type", "limit", "--quantity", "0.01",
        ]);
        let err = cli.trade_order().unwrap_err();
        assert_eq!(
            err.downcast_ref::<OrderValidationError>(),
            Some(&OrderValidationError::MissingPrice)
        );
    }

    #[test]
    fn test_health_needs_no_order_fields() {
        let cli = parse(&["--health"]);
        assert!(cli.health);
        assert!(!cli.has_trade_fields());
        assert_eq!(cli.trade_order().unwrap_err().to_string(), MISSING_TRADE_FIELDS);
    }

    #[test]
    fn test_non_numeric_quantity_is_usage_error() {
        let result = Cli::try_parse_from(["tradebot", "--quantity", "lots"]);
        assert_eq!(result.unwrap_err().kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_verbose_log_config() {
        let cli = parse(&["--health", "-v", "--log-file", "/tmp/bot.log"]);
        let config = cli.log_config(Some(&BotConfig::default()));
        assert_eq!(config.level, "debug");
        assert!(config.console);
        assert_eq!(config.file, Some(PathBuf::from("/tmp/bot.log")));

        let quiet = parse(&["--health"]).log_config(None);
        assert_eq!(quiet.level, "info");
        assert!(!quiet.console);
    }

    #[tokio::test]
    async fn test_dispatch_health_mode() {
        let cli = parse(&["--health"]);
        let service = paper_service(PaperExchange::at(dec!(50000)));
        dispatch(&cli, &service).await.unwrap();

        let rejected = paper_service(PaperExchange::at(dec!(50000)).with_account(Err(
            ExchangeError::Api {
                code: -2015,
                message: "Invalid API-key, IP, or permissions for action.".to_string(),
            }
            .into(),
        )));
        dispatch(&cli, &rejected).await.unwrap();
        assert!(submitted_types(&rejected).is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_trade_mode() {
        let cli = parse(&[
            "--symbol",
            "BTCUSDT",
            "--side",
            "buy",
            "--type",
            "market",
            "--quantity",
            "0.01",
            "--take-profit",
            "52000",
        ]);
        let service = paper_service(PaperExchange::at(dec!(50000)));

        dispatch(&cli, &service).await.unwrap();
        assert_eq!(submitted_types(&service), vec!["MARKET", "TAKE_PROFIT_MARKET"]);
    }

    #[tokio::test]
    async fn test_dispatch_failure_is_reported() {
        let cli = parse(&[
            "--symbol",
            "BTCUSDT",
            "--side",
            "sell",
            "--type",
            "market",
            "--quantity",
            "0.01",
            "--stop-loss",
            "49000",
        ]);
        let service = paper_service(PaperExchange::at(dec!(50000)));

        let err = dispatch(&cli, &service).await.unwrap_err();
        assert_eq!(
            failure_message(&err),
            "\n❌ Error: [Validation] Stop loss must be ABOVE current price for SHORT."
        );
        assert_eq!(report_failure(&err), ExitCode::FAILURE);
        assert_eq!(submitted_types(&service), vec!["MARKET"]);
    }

    #[tokio::test]
    async fn test_dispatch_rejects_unpriced_limit_before_submitting() {
        let cli = parse(&[
            "--symbol", "BTCUSDT", "--side", "buy", "--type", "limit", "--quantity", "0.01",
        ]);
        let service = paper_service(PaperExchange::at(dec!(50000)));

        let err = dispatch(&cli, &service).await.unwrap_err();
        assert!(failure_message(&err).starts_with("\n❌ Error: "));
        assert!(submitted_types(&service).is_empty());
    }
}
