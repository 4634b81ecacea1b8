//! REST client implementation with request signing.

use reqwest::{Client, Method, Response, header};
use tracing::debug;
use tradebot_core::error::{ConfigError, NetworkError, TradeError};

use super::config::RestConfig;
use super::signer::{RequestSigner, build_query_string, timestamp_ms};

/// REST client with request signing.
///
/// The API key is installed as a default `X-MBX-APIKEY` header, so every
/// request carries it. Signed requests additionally get `timestamp`,
/// `recvWindow` and `signature` query parameters.
///
/// # Example
///
/// ```ignore
/// use tradebot_gateway::rest::{RestClient, RestConfig};
///
/// let config = RestConfig::builder()
///     .base_url("https://testnet.binancefuture.com")
///     .api_key("your_key")
///     .api_secret("your_secret")
///     .build();
///
/// let client = RestClient::new(config)?;
/// let response = client.get("/fapi/v2/account").signed().send().await?;
/// ```
pub struct RestClient {
    config: RestConfig,
    http_client: Client,
    signer: Option<RequestSigner>,
}

impl RestClient {
    /// Creates a new REST client.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the user agent or API key
    /// cannot be sent as a header, and `NetworkError` if the HTTP client
    /// cannot be created.
    pub fn new(config: RestConfig) -> Result<Self, TradeError> {
        let mut headers = header::HeaderMap::new();

        headers.insert(
            header::USER_AGENT,
            config
                .user_agent
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    field: "user_agent".to_string(),
                    reason: "not a valid header value".to_string(),
                })?,
        );

        if let Some(api_key) = &config.api_key {
            headers.insert(
                header::HeaderName::from_static("x-mbx-apikey"),
                api_key.parse().map_err(|_| ConfigError::InvalidValue {
                    field: "api_key".to_string(),
                    reason: "not a valid header value".to_string(),
                })?,
            );
        }

        let http_client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| NetworkError::ConnectionFailed {
                reason: format!("Failed to create HTTP client: {e}"),
            })?;

        let signer = config.api_secret.as_ref().map(RequestSigner::hmac_sha256);

        Ok(Self {
            config,
            http_client,
            signer,
        })
    }

    /// Creates a GET request builder.
    #[must_use]
    pub fn get(&self, path: &str) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::GET, path)
    }

    /// Creates a POST request builder.
    #[must_use]
    pub fn post(&self, path: &str) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::POST, path)
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &RestConfig {
        &self.config
    }

    /// Returns the signer if configured.
    #[must_use]
    pub fn signer(&self) -> Option<&RequestSigner> {
        self.signer.as_ref()
    }

    /// Builds the full URL for a path.
    #[must_use]
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
        }
    }

    async fn execute_request(
        &self,
        method: Method,
        url: &str,
        query: Option<&str>,
    ) -> Result<Response, NetworkError> {
        let full_url = match query {
            Some(q) => format!("{url}?{q}"),
            None => url.to_string(),
        };

        debug!(
            method = %method,
            url = %url,
            exchange = %self.config.exchange,
            "Sending request"
        );

        self.http_client
            .request(method, &full_url)
            .send()
            .await
            .map_err(|e| self.map_transport_error(&e))
    }

    fn map_transport_error(&self, e: &reqwest::Error) -> NetworkError {
        if e.is_timeout() {
            NetworkError::Timeout {
                timeout_ms: self.config.timeout_ms,
            }
        } else if e.is_connect() {
            NetworkError::ConnectionFailed {
                reason: e.to_string(),
            }
        } else {
            NetworkError::Http {
                status_code: e.status().map_or(0, |s| s.as_u16()),
                reason: e.to_string(),
            }
        }
    }
}

/// Request builder for REST API calls.
pub struct RequestBuilder<'a> {
    client: &'a RestClient,
    method: Method,
    path: String,
    query_params: Vec<(String, String)>,
    sign: bool,
}

impl<'a> RequestBuilder<'a> {
    fn new(client: &'a RestClient, method: Method, path: &str) -> Self {
        Self {
            client,
            method,
            path: path.to_string(),
            query_params: Vec::new(),
            sign: false,
        }
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((key.into(), value.into()));
        self
    }

    /// Adds multiple query parameters, keeping their order.
    #[must_use]
    pub fn queries<K, V>(mut self, params: &[(K, V)]) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in params {
            self.query_params
                .push((key.as_ref().to_string(), value.as_ref().to_string()));
        }
        self
    }

    /// Enables request signing.
    #[must_use]
    pub fn signed(mut self) -> Self {
        self.sign = true;
        self
    }

    /// Renders the final query string, signing it when requested.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if signing is requested without an API secret.
    pub fn build_query(&self) -> Result<Option<String>, ConfigError> {
        self.build_query_at(timestamp_ms())
    }

    fn build_query_at(&self, timestamp: i64) -> Result<Option<String>, ConfigError> {
        let mut params: Vec<(&str, String)> = self
            .query_params
            .iter()
            .map(|(k, v)| (k.as_str(), v.clone()))
            .collect();

        if self.sign {
            params.push(("timestamp", timestamp.to_string()));
            params.push(("recvWindow", self.client.config.recv_window_ms.to_string()));
        }

        if params.is_empty() {
            return Ok(None);
        }

        let borrowed: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let query = build_query_string(&borrowed);

        if !self.sign {
            return Ok(Some(query));
        }

        let signer = self.client.signer().ok_or_else(|| ConfigError::InvalidValue {
            field: "api_secret".to_string(),
            reason: "signed request requires an API secret".to_string(),
        })?;
        signer.sign_query(&query).map(Some)
    }

    /// Sends the request and returns the raw response.
    ///
    /// Non-2xx statuses are not errors at this layer.
    ///
    /// # Errors
    ///
    /// Returns `TradeError::Network` on transport failure and
    /// `TradeError::Config` if the request cannot be signed.
    pub async fn send(self) -> Result<Response, TradeError> {
        let url = self.client.build_url(&self.path);
        let query = self.build_query()?;

        let response = self
            .client
            .execute_request(self.method, &url, query.as_deref())
            .await?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(with_secret: bool) -> RestClient {
        let mut builder = RestConfig::builder()
            .base_url("https://testnet.binancefuture.com/")
            .api_key("key")
            .exchange("binance");
        if with_secret {
            builder = builder.api_secret("secret");
        }
        RestClient::new(builder.build()).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = client(true);
        assert_eq!(client.config().exchange, "binance");
        assert!(client.signer().is_some());
    }

    #[test]
    fn test_build_url() {
        let client = client(false);

        assert_eq!(
            client.build_url("/fapi/v1/order"),
            "https://testnet.binancefuture.com/fapi/v1/order"
        );
        assert_eq!(
            client.build_url("https://other.com/path"),
            "https://other.com/path"
        );
    }

    #[test]
    fn test_invalid_api_key_header() {
        let config = RestConfig::builder()
            .base_url("https://testnet.binancefuture.com")
            .api_key("bad\nkey")
            .build();
        let err = RestClient::new(config).err().unwrap();
        assert!(matches!(err, TradeError::Config(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_unsigned_query_keeps_order() {
        let client = client(false);
        let builder = client
            .get("/fapi/v1/premiumIndex")
            .query("symbol", "BTCUSDT")
            .query("limit", "5");

        assert_eq!(
            builder.build_query().unwrap().as_deref(),
            Some("symbol=BTCUSDT&limit=5")
        );
        assert_eq!(client.get("/fapi/v1/time").build_query().unwrap(), None);
    }

    #[test]
    fn test_signed_query_appends_timestamp_window_and_signature() {
        let client = client(true);
        let builder = client
            .post("/fapi/v1/order")
            .queries(&[("symbol", "BTCUSDT"), ("side", "BUY")])
            .signed();

        let query = builder.build_query_at(1_499_827_319_559).unwrap().unwrap();
        let unsigned = "symbol=BTCUSDT&side=BUY&timestamp=1499827319559&recvWindow=5000";
        let expected = RequestSigner::hmac_sha256("secret").sign(unsigned).unwrap();
        assert_eq!(query, format!("{unsigned}&signature={expected}"));
    }

    #[test]
    fn test_signed_query_without_secret_fails() {
        let client = client(false);
        let err = client.get("/fapi/v2/account").signed().build_query().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
