//! Sensitive data masking for logs.
//!
//! Masks API keys, secrets and request signatures so that debug output
//! of signed requests can go to the log file.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Patterns for detecting sensitive data.
static PATTERNS: LazyLock<Vec<SensitivePattern>> = LazyLock::new(|| {
    vec![
        // API keys, including the X-MBX-APIKEY header
        SensitivePattern {
            regex: Regex::new(
                r#"(?i)(x-mbx-apikey|api[_-]?key|apikey)["\s:=]+["']?([a-zA-Z0-9]{16,64})["']?"#,
            )
            .unwrap(),
            group: 2,
        },
        // Secret keys
        SensitivePattern {
            regex: Regex::new(
                r#"(?i)(secret[_-]?key|secretkey|api[_-]?secret)["\s:=]+["']?([a-zA-Z0-9]{16,64})["']?"#,
            )
            .unwrap(),
            group: 2,
        },
        // HMAC-SHA256 query signatures
        SensitivePattern {
            regex: Regex::new(r"(?i)signature=([a-f0-9]{64})").unwrap(),
            group: 1,
        },
        // Bare Binance API keys
        SensitivePattern {
            regex: Regex::new(r"\b[a-zA-Z0-9]{64}\b").unwrap(),
            group: 0,
        },
    ]
});

struct SensitivePattern {
    regex: Regex,
    group: usize,
}

/// Masks sensitive data in strings.
#[derive(Debug, Clone)]
pub struct SensitiveDataMasker {
    /// Minimum length of string to consider for masking
    min_length: usize,
    /// Characters to show at start of masked value
    show_start: usize,
    /// Characters to show at end of masked value
    show_end: usize,
    /// Mask character
    mask_char: char,
}

impl Default for SensitiveDataMasker {
    fn default() -> Self {
        Self::new()
    }
}

impl SensitiveDataMasker {
    /// Create a new masker with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(8, 3, 3)
    }

    /// Create a masker with custom settings.
    #[must_use]
    pub fn with_settings(min_length: usize, show_start: usize, show_end: usize) -> Self {
        Self {
            min_length,
            show_start,
            show_end,
            mask_char: '*',
        }
    }

    /// Mask a known sensitive value.
    ///
    /// # Example
    ///
    /// ```
    /// use tradebot_telemetry::masking::SensitiveDataMasker;
    ///
    /// let masker = SensitiveDataMasker::new();
    /// assert_eq!(masker.mask_value("abcdefghijklmnop"), "abc***nop");
    /// assert_eq!(masker.mask_value("short"), "*****");
    /// ```
    #[must_use]
    pub fn mask_value(&self, value: &str) -> String {
        let len = value.chars().count();
        let mask = self.mask_char.to_string();
        if len < self.min_length {
            return mask.repeat(len.max(3));
        }

        let start: String = value.chars().take(self.show_start).collect();
        let end: String = if len > self.show_end {
            value.chars().skip(len - self.show_end).collect()
        } else {
            String::new()
        };

        format!("{start}{}{end}", mask.repeat(3))
    }

    /// Mask every sensitive value found in a string.
    ///
    /// # Example
    ///
    /// ```
    /// use tradebot_telemetry::masking::SensitiveDataMasker;
    ///
    /// let masker = SensitiveDataMasker::new();
    /// let masked = masker.mask_string(r#"{"api_key": "abcdefghijklmnop1234567890"}"#);
    /// assert!(masked.contains("abc***890"));
    /// ```
    #[must_use]
    pub fn mask_string<'a>(&self, input: &'a str) -> Cow<'a, str> {
        let mut result = Cow::Borrowed(input);

        for pattern in PATTERNS.iter() {
            let found: Vec<String> = pattern
                .regex
                .captures_iter(&result)
                .filter_map(|captures| captures.get(pattern.group))
                .map(|matched| matched.as_str().to_string())
                .collect();

            for secret in found {
                let masked = self.mask_value(&secret);
                result = Cow::Owned(result.replace(&secret, &masked));
            }
        }

        result
    }

    /// Check if a string contains sensitive patterns.
    #[must_use]
    pub fn contains_sensitive(&self, input: &str) -> bool {
        PATTERNS.iter().any(|p| p.regex.is_match(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIGNATURE: &str = "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71";

    #[test]
    fn test_mask_value() {
        let masker = SensitiveDataMasker::new();
        assert_eq!(masker.mask_value("abcdefghijklmnop"), "abc***nop");
        assert_eq!(masker.mask_value("short"), "*****");
        assert_eq!(masker.mask_value("ab"), "***");

        let wide = SensitiveDataMasker::with_settings(4, 1, 1);
        assert_eq!(wide.mask_value("abcd"), "a***d");
    }

    #[test]
    fn test_mask_api_key_header() {
        let masker = SensitiveDataMasker::new();
        let input = "x-mbx-apikey: vmPUZE6mv9SD5VNHk4HlWFsOr6aKE2zvsw0MuIgwCIPy6utIco14y7Ju91duEh8A";
        let result = masker.mask_string(input);

        assert_eq!(result, "x-mbx-apikey: vmP***h8A");
    }

    #[test]
    fn test_mask_secret_in_env_line() {
        let masker = SensitiveDataMasker::new();
        let result = masker.mask_string("BINANCE_API_SECRET=mysupersecretkey1234567890");
        assert_eq!(result, "BINANCE_API_SECRET=mys***890");
    }

    #[test]
    fn test_mask_every_signature() {
        let masker = SensitiveDataMasker::new();
        let input = format!(
            "url=/fapi/v1/order?symbol=BTCUSDT&timestamp=1&signature={SIGNATURE} retry of signature={SIGNATURE}"
        );
        let result = masker.mask_string(&input);

        assert!(!result.contains(SIGNATURE));
        assert_eq!(result.matches("signature=c8d***b71").count(), 2);
        assert!(result.contains("symbol=BTCUSDT"));
    }

    #[test]
    fn test_no_sensitive_data() {
        let masker = SensitiveDataMasker::new();
        let input = "Placing order: BUY 0.01 BTCUSDT";
        let result = masker.mask_string(input);

        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, input);
    }

    #[test]
    fn test_contains_sensitive() {
        let masker = SensitiveDataMasker::new();

        assert!(masker.contains_sensitive(r#"api_key: "test1234567890123456""#));
        assert!(masker.contains_sensitive(&format!("signature={SIGNATURE}")));
        assert!(!masker.contains_sensitive("Order ID: 4067741114"));
    }
}
