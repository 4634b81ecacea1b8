//! Log line formatter.
//!
//! Every event becomes one line:
//! `2024-01-15 10:30:00,123 - INFO - tradebot_engine::service - Placing order: BUY 0.01 BTCUSDT`.
//! Structured fields follow the message as `key=value` pairs.

use std::fmt;

use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::masking::SensitiveDataMasker;

/// Formats events as `timestamp - LEVEL - target - message`.
#[derive(Debug, Clone, Default)]
pub struct LineFormat {
    masker: Option<SensitiveDataMasker>,
}

impl LineFormat {
    /// Creates a formatter that writes fields unmodified.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Masks secrets in the rendered message and fields.
    #[must_use]
    pub fn with_masker(mut self, masker: SensitiveDataMasker) -> Self {
        self.masker = Some(masker);
        self
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();

        let mut fields = String::new();
        ctx.field_format()
            .format_fields(Writer::new(&mut fields), event)?;

        let fields = match &self.masker {
            Some(masker) => masker.mask_string(&fields),
            None => fields.as_str().into(),
        };

        writeln!(
            writer,
            "{} - {} - {} - {}",
            format_timestamp(),
            format_level(*metadata.level()),
            metadata.target(),
            fields
        )
    }
}

/// Format a log level for display.
#[must_use]
pub fn format_level(level: tracing::Level) -> &'static str {
    match level {
        tracing::Level::TRACE => "TRACE",
        tracing::Level::DEBUG => "DEBUG",
        tracing::Level::INFO => "INFO",
        tracing::Level::WARN => "WARNING",
        tracing::Level::ERROR => "ERROR",
    }
}

/// Format the current local time with millisecond precision.
#[must_use]
pub fn format_timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S,%3f")
        .to_string()
}
