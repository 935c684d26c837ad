//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

use shared::query::DEFAULT_PAGE_SIZE;

/// Shortest dashboard poll period; a zero period would spin
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Retry policy for read queries. Mutations are never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first failure
    pub max_retries: u32,
    /// Delay before the first retry; doubled on each further attempt
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Fail on the first error
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Delay before retry number `attempt` (0-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

/// Client configuration for connecting to the restaurant backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "http://localhost:5000/api")
    pub base_url: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout
    pub timeout: Duration,

    /// Directory holding `session.json`; `None` keeps the session in memory
    pub data_dir: Option<PathBuf>,

    /// Retry policy for read queries
    pub retry: RetryPolicy,

    /// How long a cached query stays fresh
    pub stale_time: Duration,

    /// Admin dashboard refresh period
    pub dashboard_poll_interval: Duration,

    /// Default page size for list views
    pub page_size: u32,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: Duration::from_secs(30),
            data_dir: None,
            retry: RetryPolicy::default(),
            stale_time: Duration::from_secs(60),
            dashboard_poll_interval: Duration::from_secs(30),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `TAVOLA_API_URL` | `http://localhost:5000/api` |
    /// | `TAVOLA_TIMEOUT_SECS` | 30 |
    /// | `TAVOLA_DATA_DIR` | `<platform data dir>/tavola` |
    /// | `TAVOLA_PAGE_SIZE` | 10 |
    /// | `TAVOLA_POLL_SECS` | 30 |
    /// | `TAVOLA_STALE_SECS` | 60 |
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("TAVOLA_API_URL").unwrap_or_else(|_| "http://localhost:5000/api".into()),
        );

        if let Some(secs) = env_u64("TAVOLA_TIMEOUT_SECS") {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = env_u64("TAVOLA_POLL_SECS") {
            config.dashboard_poll_interval = Duration::from_secs(secs.max(1));
        }
        if let Some(secs) = env_u64("TAVOLA_STALE_SECS") {
            config.stale_time = Duration::from_secs(secs);
        }
        if let Some(size) = env_u64("TAVOLA_PAGE_SIZE") {
            config.page_size = size.clamp(1, 100) as u32;
        }
        config.data_dir = std::env::var("TAVOLA_DATA_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .or_else(default_data_dir);

        config
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Persist the session under `dir`
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = stale_time;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.dashboard_poll_interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Path of the persisted session file
    pub fn session_path(&self) -> Option<PathBuf> {
        self.data_dir.as_ref().map(|dir| dir.join("session.json"))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000/api")
    }
}

/// `tavola` under the platform data directory, e.g. `~/.local/share/tavola`
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("tavola"))
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
