use std::time::Duration;

use crate::error::{ClientError, Result};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5005/";

/// Number of messages the backend returns per page.
pub const DEFAULT_PAGE_SIZE: usize = 25;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Always ends with `/` so paths can be appended directly.
    pub backend_url: String,
    pub page_size: usize,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    /// Reads `SLACKR_BACKEND_URL`, `SLACKR_PAGE_SIZE` and `SLACKR_TIMEOUT_SECS`,
    /// falling back to the defaults for any that are unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let backend_url = lookup("SLACKR_BACKEND_URL").unwrap_or(defaults.backend_url);

        let page_size = match lookup("SLACKR_PAGE_SIZE") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ClientError::Config(format!("SLACKR_PAGE_SIZE={raw}")))?,
            None => defaults.page_size,
        };

        let request_timeout = match lookup("SLACKR_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ClientError::Config(format!("SLACKR_TIMEOUT_SECS={raw}")))?,
            None => defaults.request_timeout,
        };

        Ok(Self {
            backend_url: normalize_base(backend_url),
            page_size,
            request_timeout,
        })
    }

    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = normalize_base(url.into());
        self
    }
}

fn normalize_base(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}
