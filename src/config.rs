use std::time::Duration;

/// Retry policy for transport failures: a fixed attempt count with a fixed
/// backoff interval between attempts. Codec errors are never retried.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub backoff: Duration,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every request path is resolved against.
    pub base_url: url::Url,

    /// When enabled, the client stores response cookies and attaches matching
    /// ones to outgoing requests.
    pub auto_cookies: bool,

    pub connect_timeout: Duration,
    pub read_timeout: Duration,

    pub retry: RetryConfig,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(5000),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: url::Url) -> Self {
        Self {
            base_url,
            auto_cookies: false,
            connect_timeout: Duration::from_millis(30000),
            read_timeout: Duration::from_millis(30000),
            retry: RetryConfig::default(),
        }
    }
}
