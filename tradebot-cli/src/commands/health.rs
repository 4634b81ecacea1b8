//! Connectivity check.

use tradebot_core::traits::FuturesExchange;
use tradebot_gateway::session::ExchangeSession;

/// Printed when the account endpoint answers.
pub const HEALTHY: &str = "✅ API connection healthy.";
/// Printed on any failure.
pub const UNHEALTHY: &str = "❌ API connection failed.";

/// Returns the line printed for a connectivity check.
#[must_use]
pub fn message(healthy: bool) -> &'static str {
    if healthy { HEALTHY } else { UNHEALTHY }
}

/// Checks the session and prints the result.
pub async fn run<E: FuturesExchange>(session: &ExchangeSession<E>) -> bool {
    let healthy = session.validate_connection().await;
    println!("{}", message(healthy));
    healthy
}
