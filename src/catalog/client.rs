//! Blocking HTTP client for the catalog API: optional delay between requests and retries
//! with backoff for transient failures.

use crate::catalog::error::CatalogError;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::warn;

const DEFAULT_USER_AGENT: &str = "slotdoc/0.1 (+game write-up converter)";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DELAY_SECS: u64 = 0;
const MAX_REDIRECTS: usize = 10;
/// Attempts per request (initial plus retries).
const DEFAULT_RETRY_COUNT: u32 = 3;
const DEFAULT_BACKOFF_SECS: [u64; 2] = [1, 2];

/// Blocking JSON client with politeness delay and retries.
#[derive(Debug)]
pub struct CatalogClient {
    inner: reqwest::blocking::Client,
    delay: Duration,
    last_request: Option<Instant>,
    retry_count: u32,
    backoff_secs: Vec<u64>,
}

impl CatalogClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::builder().build()
    }

    pub fn builder() -> CatalogClientBuilder {
        CatalogClientBuilder::default()
    }

    /// GET `url` and decode the JSON body.
    ///
    /// Timeouts, connection errors, HTTP 5xx and 429 are retried; any other non-success
    /// status is returned as [CatalogError::HttpStatus].
    pub fn get_json<T: DeserializeOwned>(&mut self, url: &Url) -> Result<T, CatalogError> {
        let response = self.send_with_retry(url)?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().map_err(|e| CatalogError::BodyRead {
            url: url.to_string(),
            source: e,
        })?;
        serde_json::from_str(&body).map_err(|e| CatalogError::Decode {
            url: url.to_string(),
            source: e,
        })
    }

    fn send_with_retry(
        &mut self,
        url: &Url,
    ) -> Result<reqwest::blocking::Response, CatalogError> {
        let mut attempt = 0u32;
        loop {
            self.wait_delay();
            let result = self.inner.get(url.clone()).send();
            self.last_request = Some(Instant::now());
            let last_attempt = attempt + 1 >= self.retry_count;
            match result {
                Ok(response) => {
                    let status = response.status();
                    let retryable = status.is_server_error() || status.as_u16() == 429;
                    if !retryable || last_attempt {
                        return Ok(response);
                    }
                    warn!("HTTP {} from {}; retrying", status.as_u16(), url);
                }
                Err(e) => {
                    if !(e.is_timeout() || e.is_connect()) || last_attempt {
                        return Err(CatalogError::Network {
                            url: url.to_string(),
                            source: e,
                        });
                    }
                    warn!("request to {} failed: {}; retrying", url, e);
                }
            }
            std::thread::sleep(Duration::from_secs(self.backoff(attempt)));
            attempt += 1;
        }
    }

    /// Backoff before retry `attempt`; the last configured value repeats.
    fn backoff(&self, attempt: u32) -> u64 {
        self.backoff_secs
            .get(attempt as usize)
            .or_else(|| self.backoff_secs.last())
            .copied()
            .unwrap_or(1)
    }

    fn wait_delay(&self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.delay {
                std::thread::sleep(self.delay - elapsed);
            }
        }
    }
}

/// Builder for [CatalogClient].
#[derive(Debug)]
pub struct CatalogClientBuilder {
    user_agent: Option<String>,
    delay_secs: u64,
    timeout_secs: u64,
    retry_count: u32,
    retry_backoff_secs: Vec<u64>,
}

impl Default for CatalogClientBuilder {
    fn default() -> Self {
        Self {
            user_agent: None,
            delay_secs: DEFAULT_DELAY_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retry_count: DEFAULT_RETRY_COUNT,
            retry_backoff_secs: DEFAULT_BACKOFF_SECS.to_vec(),
        }
    }
}

impl CatalogClientBuilder {
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Delay between requests in seconds. Default 0.
    pub fn delay_secs(mut self, secs: u64) -> Self {
        self.delay_secs = secs;
        self
    }

    /// Request timeout in seconds. Default 30.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Attempts per request for transient failures (default 3, minimum 1).
    pub fn retry_count(mut self, n: u32) -> Self {
        self.retry_count = n.max(1);
        self
    }

    /// Seconds to wait before each retry; the last value is reused when shorter than needed.
    pub fn retry_backoff_secs(mut self, secs: Vec<u64>) -> Self {
        self.retry_backoff_secs = secs;
        self
    }

    pub fn build(self) -> Result<CatalogClient, reqwest::Error> {
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let inner = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(self.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;
        Ok(CatalogClient {
            inner,
            delay: Duration::from_secs(self.delay_secs),
            last_request: None,
            retry_count: self.retry_count,
            backoff_secs: self.retry_backoff_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_reuses_last_value() -> Result<(), reqwest::Error> {
        let client = CatalogClient::builder()
            .retry_backoff_secs(vec![1, 5])
            .build()?;
        assert_eq!(client.backoff(0), 1);
        assert_eq!(client.backoff(1), 5);
        assert_eq!(client.backoff(4), 5);
        Ok(())
    }

    #[test]
    fn empty_backoff_defaults_to_one_second() -> Result<(), reqwest::Error> {
        let client = CatalogClient::builder().retry_backoff_secs(vec![]).build()?;
        assert_eq!(client.backoff(0), 1);
        Ok(())
    }

    #[test]
    fn retry_count_is_at_least_one() -> Result<(), reqwest::Error> {
        let client = CatalogClient::builder().retry_count(0).build()?;
        assert_eq!(client.retry_count, 1);
        Ok(())
    }
}
