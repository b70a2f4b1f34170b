//! HTTP client for downloading weekly bundles.

use async_trait::async_trait;
use bytes::Bytes;
use ratedata_types::BundleKey;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use crate::BundleSource;
use crate::url::{BASE_URL, bundle_url_with_base};

/// Configuration for the download client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Maximum concurrent downloads.
    pub concurrency: usize,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retry attempts for transient failures. Missing bundles are never retried.
    pub max_retries: u32,
    /// Base delay for exponential backoff (in milliseconds).
    pub base_delay_ms: u64,
    /// Maximum delay between retries (in milliseconds).
    pub max_delay_ms: u64,
    /// User agent string.
    pub user_agent: String,
    /// Archive root, without trailing slash.
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            concurrency: 4, // Weekly bundles are large; a few at a time is enough
            timeout: Duration::from_secs(120),
            max_retries: 3,
            base_delay_ms: 500,
            max_delay_ms: 10_000,
            user_agent: format!("ratedata/{}", env!("CARGO_PKG_VERSION")),
            base_url: BASE_URL.to_string(),
        }
    }
}

/// Errors that can occur during downloads.
#[derive(Error, Debug)]
pub enum DownloadError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error status.
    #[error("Server error: {status}")]
    ServerError {
        /// HTTP status code.
        status: u16,
    },

    /// Reading from a local mirror failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP client with connection pooling and retry logic.
#[derive(Debug, Clone)]
pub struct DownloadClient {
    client: Client,
    config: ClientConfig,
}

impl DownloadClient {
    /// Creates a new download client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .pool_max_idle_per_host(config.concurrency)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the URL a bundle is fetched from.
    #[must_use]
    pub fn url_for(&self, key: &BundleKey) -> String {
        bundle_url_with_base(&self.config.base_url, key)
    }

    /// Downloads a single archive, returning its bytes.
    ///
    /// Returns `Ok(None)` if the archive does not exist (404).
    ///
    /// # Errors
    ///
    /// Returns an error if the download fails after all retries.
    pub async fn download(&self, url: &str) -> Result<Option<Bytes>, DownloadError> {
        let mut attempts = 0;

        loop {
            match self.client.get(url).send().await {
                Ok(response) => {
                    if response.status() == reqwest::StatusCode::NOT_FOUND {
                        return Ok(None); // Not every symbol has every week
                    }

                    // Retry on server errors (5xx) and rate limiting (429)
                    if response.status().is_server_error()
                        || response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS
                    {
                        if attempts < self.config.max_retries {
                            attempts += 1;
                            let delay = self.calculate_backoff_delay(attempts);
                            tracing::debug!(
                                url,
                                status = %response.status(),
                                attempts,
                                ?delay,
                                "retrying"
                            );
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                        return Err(DownloadError::ServerError {
                            status: response.status().as_u16(),
                        });
                    }

                    response.error_for_status_ref()?;
                    return Ok(Some(response.bytes().await?));
                }
                Err(e) if self.is_retryable_error(&e) && attempts < self.config.max_retries => {
                    attempts += 1;
                    let delay = self.calculate_backoff_delay(attempts);
                    tracing::debug!(url, error = %e, attempts, ?delay, "retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Calculates the backoff delay with exponential backoff and jitter.
    fn calculate_backoff_delay(&self, attempt: u32) -> Duration {
        let exp_delay = self
            .config
            .base_delay_ms
            .saturating_mul(1u64 << attempt.min(10));

        let capped_delay = exp_delay.min(self.config.max_delay_ms);

        // Deterministic jitter of up to 25% either way
        let jitter_range = capped_delay / 4;
        let jitter = if jitter_range > 0 {
            let jitter_offset = (u64::from(attempt) * 17) % (jitter_range * 2);
            jitter_offset as i64 - jitter_range as i64
        } else {
            0
        };

        let final_delay = (capped_delay as i64 + jitter).max(100) as u64;
        Duration::from_millis(final_delay)
    }

    /// Determines if an error is retryable.
    fn is_retryable_error(&self, error: &reqwest::Error) -> bool {
        if error.is_builder() {
            return false;
        }

        error.is_timeout() || error.is_connect() || error.is_request()
    }
}

#[async_trait]
impl BundleSource for DownloadClient {
    async fn fetch(&self, key: &BundleKey) -> Result<Option<Bytes>, DownloadError> {
        self.download(&self.url_for(key)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves `response` verbatim to the first connection and returns the base URL.
    async fn serve_once(response: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _read = socket.read(&mut buf).await.unwrap();
            socket.write_all(response).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client_for(base_url: String) -> DownloadClient {
        DownloadClient::new(ClientConfig {
            base_url,
            max_retries: 0,
            ..Default::default()
        })
        .unwrap()
    }

    fn key() -> BundleKey {
        BundleKey::new("EUR_USD".parse().unwrap(), 2015, 3, 1)
    }

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.base_url, BASE_URL);
        assert!(config.user_agent.starts_with("ratedata/"));
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = DownloadClient::with_defaults();
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_backoff_delay_calculation() {
        let client = DownloadClient::with_defaults().unwrap();

        // First attempt: base_delay * 2 = 1000ms (plus jitter)
        let delay1 = client.calculate_backoff_delay(1);
        assert!(delay1.as_millis() >= 750 && delay1.as_millis() <= 1250);

        // Second attempt: base_delay * 4 = 2000ms (plus jitter)
        let delay2 = client.calculate_backoff_delay(2);
        assert!(delay2.as_millis() >= 1500 && delay2.as_millis() <= 2500);

        // High attempt should be capped at max_delay
        let delay_high = client.calculate_backoff_delay(20);
        assert!(delay_high.as_millis() <= 12_500);
    }

    #[tokio::test]
    async fn test_url_for_uses_configured_base() {
        let client = client_for("http://mirror.local".to_string());
        assert_eq!(
            client.url_for(&key()),
            "http://mirror.local/2015/03 March/EUR_USD_Week1.zip"
        );
    }

    #[tokio::test]
    async fn test_missing_bundle_is_none() {
        let base = serve_once(
            b"HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;
        let result = client_for(base).fetch(&key()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_bundle_bytes_returned() {
        let base = serve_once(
            b"HTTP/1.1 200 OK\r\ncontent-length: 4\r\nconnection: close\r\n\r\nPK\x03\x04",
        )
        .await;
        let bytes = client_for(base).fetch(&key()).await.unwrap().unwrap();
        assert_eq!(&bytes[..], b"PK\x03\x04");
    }

    #[tokio::test]
    async fn test_server_error_after_retries() {
        let base = serve_once(
            b"HTTP/1.1 503 Service Unavailable\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;
        let err = client_for(base).fetch(&key()).await.unwrap_err();
        assert!(matches!(err, DownloadError::ServerError { status: 503 }));
    }
}
