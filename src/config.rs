use crate::error::{Error, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://image.pollinations.ai/prompt/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollinationsConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for PollinationsConfig {
    fn default() -> Self {
        PollinationsConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl PollinationsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `POLLINATIONS_BASE_URL` and `POLLINATIONS_TIMEOUT_SECS`, keeping
    /// the defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(base_url) = env::var("POLLINATIONS_BASE_URL") {
            if !base_url.trim().is_empty() {
                config = config.with_base_url(base_url.trim());
            }
        }

        if let Ok(raw) = env::var("POLLINATIONS_TIMEOUT_SECS") {
            config.timeout = parse_timeout(&raw)?;
        }

        Ok(config)
    }

    /// The prompt is appended directly to the base, so a trailing `/` is
    /// added when missing.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs: u64 = raw.trim().parse().map_err(|_| {
        Error::Config(format!(
            "POLLINATIONS_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
            raw
        ))
    })?;
    if secs == 0 {
        return Err(Error::Config(
            "POLLINATIONS_TIMEOUT_SECS must be greater than zero".into(),
        ));
    }
    Ok(Duration::from_secs(secs))
}
